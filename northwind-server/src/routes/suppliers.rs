//! Supplier routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{CreateSupplierRequest, Supplier, SupplierProduct, UpdateSupplierRequest};

use super::check_id;

/// GET /suppliers - List all suppliers
pub async fn list_suppliers(State(db): State<Database>) -> ServerResult<Json<Vec<Supplier>>> {
    Ok(Json(db.list_suppliers()?))
}

/// GET /suppliers/:id - Get a single supplier
pub async fn get_supplier(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Supplier>> {
    let id = check_id(id)?;

    let supplier = db
        .get_supplier(id)?
        .ok_or_else(|| ServerError::NotFound(format!("Supplier {} not found", id)))?;

    Ok(Json(supplier))
}

/// GET /suppliers/:id/products - Products of a supplier, newest id first.
/// A supplier with no products is a 404.
pub async fn supplier_products(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Vec<SupplierProduct>>> {
    let id = check_id(id)?;

    let products = db.list_supplier_products(id)?;
    if products.is_empty() {
        return Err(ServerError::NotFound(format!(
            "No products for supplier {}",
            id
        )));
    }

    Ok(Json(products))
}

/// POST /suppliers - Create a supplier with a max-plus-one id
pub async fn create_supplier(
    State(db): State<Database>,
    Json(req): Json<CreateSupplierRequest>,
) -> ServerResult<(StatusCode, Json<Supplier>)> {
    if req.company_name.is_empty() {
        return Err(ServerError::BadRequest(
            "CompanyName cannot be empty".into(),
        ));
    }

    let supplier = db.create_supplier(&req)?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

/// PUT /suppliers/:id - Partial update; absent fields are left unchanged
pub async fn update_supplier(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSupplierRequest>,
) -> ServerResult<Json<Supplier>> {
    let id = check_id(id)?;

    let supplier = db
        .update_supplier(id, &req)?
        .ok_or_else(|| ServerError::NotFound(format!("Supplier {} not found", id)))?;

    Ok(Json(supplier))
}

/// DELETE /suppliers/:id - Delete a supplier, 204 on success
pub async fn delete_supplier(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<StatusCode> {
    let id = check_id(id)?;

    if !db.delete_supplier(id)? {
        return Err(ServerError::NotFound(format!("Supplier {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
