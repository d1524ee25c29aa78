//! Shipper routes

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::Shipper;

use super::check_id;

/// GET /shippers - List all shippers
pub async fn list_shippers(State(db): State<Database>) -> ServerResult<Json<Vec<Shipper>>> {
    Ok(Json(db.list_shippers()?))
}

/// GET /shippers/:id - Get a single shipper
pub async fn get_shipper(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Shipper>> {
    let id = check_id(id)?;

    let shipper = db
        .get_shipper(id)?
        .ok_or_else(|| ServerError::NotFound("Shipper not found".into()))?;

    Ok(Json(shipper))
}
