//! Employee routes

use axum::{
    extract::{Query, State},
    Json,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{EmployeeOrder, EmployeeQueryParams, EmployeeRow};

/// GET /employees - Projected listing with whitelisted ordering.
/// Available orders: id, last_name, first_name, city.
pub async fn list_employees(
    State(db): State<Database>,
    Query(params): Query<EmployeeQueryParams>,
) -> ServerResult<Json<Vec<EmployeeRow>>> {
    let limit = params.limit.unwrap_or(0);
    let offset = params.offset.unwrap_or(0);

    let order = params
        .order
        .as_deref()
        .unwrap_or("id")
        .parse::<EmployeeOrder>()
        .map_err(|_| ServerError::BadRequest("Bad request".into()))?;

    if limit < 0 || offset < 0 {
        return Err(ServerError::BadRequest("Bad request".into()));
    }

    let employees = db.list_employees(limit, offset, order)?;
    Ok(Json(employees))
}
