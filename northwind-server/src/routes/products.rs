//! Product routes

use axum::{
    extract::{Path, State},
    Json,
};

use crate::db::Database;
use crate::error::{ServerError, ServerResult};
use crate::models::{ExtendedProduct, ProductOrder, ProductSummary, ProductsResponse};

use super::check_id;

/// GET /products - Product name roster plus count
pub async fn list_products(State(db): State<Database>) -> ServerResult<Json<ProductsResponse>> {
    let products = db.list_products()?;
    let products_counter = products.len();

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(|p| p.product_name).collect(),
        products_counter,
    }))
}

/// GET /products/:id - Get a single product as {id, name}
pub async fn get_product(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<ProductSummary>> {
    let id = check_id(id)?;

    let product = db
        .get_product(id)?
        .ok_or_else(|| ServerError::NotFound("Product not found".into()))?;

    Ok(Json(ProductSummary {
        id: product.product_id,
        name: product.product_name,
    }))
}

/// GET /products_extended - Products joined with category and supplier names
pub async fn products_extended(
    State(db): State<Database>,
) -> ServerResult<Json<Vec<ExtendedProduct>>> {
    Ok(Json(db.list_products_extended()?))
}

/// GET /products/:id/orders - Order lines for a product, priced after discount
pub async fn product_orders(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> ServerResult<Json<Vec<ProductOrder>>> {
    let id = check_id(id)?;

    if db.get_product(id)?.is_none() {
        return Err(ServerError::NotFound("Product not found".into()));
    }

    let orders = db
        .list_product_orders(id)?
        .into_iter()
        .map(|row| ProductOrder {
            id: row.order_id,
            customer: row.company_name,
            quantity: row.quantity,
            total_price: row.quantity as f64 * row.unit_price * (1.0 - row.discount),
        })
        .collect();

    Ok(Json(orders))
}
