//! Category routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{Category, CategorySummary, CreateCategoryRequest, UpdateCategoryRequest};

use super::check_id;

/// GET /categories - List all categories as {id, name} pairs
pub async fn list_categories(
    State(db): State<Database>,
) -> ServerResult<Json<Vec<CategorySummary>>> {
    let categories = db.list_categories()?;

    let summaries = categories
        .into_iter()
        .map(|c| CategorySummary {
            id: c.category_id,
            name: c.category_name,
        })
        .collect();

    Ok(Json(summaries))
}

/// GET /categories/:id - Get a single category
pub async fn get_category(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Category>> {
    let id = check_id(id)?;

    let category = db
        .get_category(id)?
        .ok_or_else(|| ServerError::NotFound(format!("Category {} not found", id)))?;

    Ok(Json(category))
}

/// POST /categories - Create a category with a max-plus-one id
pub async fn create_category(
    State(db): State<Database>,
    Json(req): Json<CreateCategoryRequest>,
) -> ServerResult<(StatusCode, Json<Category>)> {
    if req.category_name.is_empty() {
        return Err(ServerError::BadRequest(
            "CategoryName cannot be empty".into(),
        ));
    }

    let category = db.create_category(&req)?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/:id - Partial update; absent fields are left unchanged
pub async fn update_category(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> ServerResult<Json<Category>> {
    let id = check_id(id)?;

    let category = db
        .update_category(id, &req)?
        .ok_or_else(|| ServerError::NotFound(format!("Category {} not found", id)))?;

    Ok(Json(category))
}

/// DELETE /categories/:id - Delete a category
pub async fn delete_category(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<serde_json::Value>> {
    let id = check_id(id)?;

    if !db.delete_category(id)? {
        return Err(ServerError::NotFound(format!("Category {} not found", id)));
    }

    Ok(Json(json!({ "deleted": true })))
}
