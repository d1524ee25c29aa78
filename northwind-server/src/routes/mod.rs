//! Route handlers for the Northwind catalog API
//!
//! Organized by entity:
//! - categories: category listing and CRUD
//! - customers: customer listings
//! - products: product listings, joins, per-product orders
//! - employees: paginated/ordered employee listing
//! - shippers: shipper lookups
//! - suppliers: supplier CRUD and per-supplier products
//! - health: health check endpoint

pub mod categories;
pub mod customers;
pub mod employees;
pub mod health;
pub mod products;
pub mod shippers;
pub mod suppliers;

pub use categories::*;
pub use customers::*;
pub use employees::*;
pub use health::*;
pub use products::*;
pub use shippers::*;
pub use suppliers::*;

use axum::Json;

use crate::error::{ServerError, ServerResult};

/// GET / - Hello world
pub async fn main_page() -> Json<&'static str> {
    Json("Hello world")
}

/// Path ids must be positive integers
pub(crate) fn check_id(id: i64) -> ServerResult<i64> {
    if id < 1 {
        return Err(ServerError::BadRequest(
            "id must be a positive integer".into(),
        ));
    }
    Ok(id)
}
