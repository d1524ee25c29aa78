//! Main server module - Axum setup and router configuration
//!
//! Starts an HTTP server exposing the Northwind catalog routes.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::db::Database;
use crate::routes::{self, health::ServerState};

/// Server command-line arguments
#[derive(Parser, Debug, Clone)]
pub struct ServerArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "3030")]
    pub port: u16,

    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Database file path (default: ~/.northwind/northwind.db)
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            port: 3030,
            bind: "127.0.0.1".to_string(),
            db_path: None,
            timeout: 30,
        }
    }
}

/// Run the server with the given arguments
pub async fn run_server(args: ServerArgs) -> anyhow::Result<()> {
    // Determine database path
    let db_path = args.db_path.unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".northwind")
            .join("northwind.db")
    });

    info!("Opening database at {}", db_path.display());
    let db = Database::open(&db_path)?;

    // Create shared state
    let state = Arc::new(RwLock::new(ServerState::new(db.clone())));

    // Build router
    let app = create_router(db, state, args.timeout);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;

    info!("Starting northwind-server on http://{}", addr);
    info!("Database: {}", db_path.display());

    // Create listener
    let listener = TcpListener::bind(addr).await?;

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum router with all routes
pub fn create_router(db: Database, state: Arc<RwLock<ServerState>>, timeout_secs: u64) -> Router {
    // CORS layer for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Middleware stack
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(timeout_secs)))
        .layer(cors);

    // Build routes
    Router::new()
        // Root & health
        .route("/", get(routes::main_page))
        .route("/health", get(routes::health_check))
        // Categories
        .route(
            "/categories",
            get(routes::list_categories).post(routes::create_category),
        )
        .route(
            "/categories/{id}",
            get(routes::get_category)
                .put(routes::update_category)
                .delete(routes::delete_category),
        )
        // Customers
        .route("/customers", get(routes::list_customers))
        .route("/customers_details", get(routes::customers_details))
        // Products
        .route("/products", get(routes::list_products))
        .route("/products_extended", get(routes::products_extended))
        .route("/products/{id}", get(routes::get_product))
        .route("/products/{id}/orders", get(routes::product_orders))
        // Employees
        .route("/employees", get(routes::list_employees))
        // Shippers
        .route("/shippers", get(routes::list_shippers))
        .route("/shippers/{id}", get(routes::get_shipper))
        // Suppliers
        .route(
            "/suppliers",
            get(routes::list_suppliers).post(routes::create_supplier),
        )
        .route(
            "/suppliers/{id}",
            get(routes::get_supplier)
                .put(routes::update_supplier)
                .delete(routes::delete_supplier),
        )
        .route("/suppliers/{id}/products", get(routes::supplier_products))
        // State
        .with_state(db)
        // Health needs full state for uptime
        .layer(axum::Extension(state))
        .layer(middleware)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let db = Database::open_in_memory().unwrap();
        let state = Arc::new(RwLock::new(ServerState::new(db.clone())));
        create_router(db, state, 30)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!("Hello world"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let health = body_json(response).await;
        assert_eq!(health["status"], "ok");
        assert_eq!(health["database"]["connected"], true);
        assert_eq!(health["database"]["path"], ":memory:");
    }

    #[tokio::test]
    async fn test_categories_crud() {
        let app = test_app();

        // Create
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/categories")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"CategoryName": "Beverages", "Description": "Soft drinks"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["CategoryID"], 1);

        // List
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed, serde_json::json!([{"id": 1, "name": "Beverages"}]));

        // Partial update: description untouched
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/categories/1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"CategoryName": "Drinks"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["CategoryName"], "Drinks");
        assert_eq!(updated["Description"], "Soft drinks");

        // Delete, then the row is gone
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/categories/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/categories/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_suppliers_crud() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/suppliers")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"CompanyName": "Exotic Liquids", "City": "London"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["SupplierID"], 1);
        assert_eq!(created["City"], "London");

        // Partial update keeps the untouched fields
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/suppliers/1")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"Phone": "(171) 555-2222"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["CompanyName"], "Exotic Liquids");
        assert_eq!(updated["Phone"], "(171) 555-2222");

        // No products yet: 404
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/suppliers/1/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Delete is a 204, repeating it a 404
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/suppliers/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/suppliers/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_employee_param_validation() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/employees?order=salary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/employees?limit=-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/employees?order=last_name")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_nonpositive_ids_rejected() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/products/0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/shippers/-3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_product_orders_pricing() {
        let db = Database::open_in_memory().unwrap();
        db.execute_batch(
            r#"
            INSERT INTO Customers (CustomerID, CompanyName) VALUES ('ALFKI', 'Alfreds Futterkiste');
            INSERT INTO Products (ProductID, ProductName, UnitPrice) VALUES (1, 'Chai', 18.0);
            INSERT INTO Orders (OrderID, CustomerID) VALUES (10248, 'ALFKI'), (10249, 'ALFKI');
            INSERT INTO OrderDetails (OrderID, ProductID, UnitPrice, Quantity, Discount) VALUES
                (10248, 1, 18.0, 10, 0.25),
                (10249, 1, 18.0, 4, 0.0);
            "#,
        )
        .unwrap();
        let state = Arc::new(RwLock::new(ServerState::new(db.clone())));
        let app = create_router(db, state, 30);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/products/1/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // 18.0 * 10 * (1 - 0.25) and 18.0 * 4 with no discount
        assert_eq!(
            body,
            serde_json::json!([
                {"id": 10248, "customer": "Alfreds Futterkiste", "quantity": 10, "total_price": 135.0},
                {"id": 10249, "customer": "Alfreds Futterkiste", "quantity": 4, "total_price": 72.0}
            ])
        );

        // Unknown product is a 404, not an empty list
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products/99/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_products_listing_shape() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["products_counter"], 0);
        assert!(body["products"].as_array().unwrap().is_empty());
    }
}
