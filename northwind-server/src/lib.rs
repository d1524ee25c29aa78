//! northwind-server: HTTP interface to the Northwind product catalog
//!
//! Exposes the classic Northwind entities (categories, customers, products,
//! employees, shippers, suppliers and their orders) as a stateless JSON API
//! backed by a SQLite database.

pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use db::Database;
pub use error::{ServerError, ServerResult};
