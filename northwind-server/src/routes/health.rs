//! Health route - liveness plus a peek at the backing store

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::Extension, Json};
use tokio::sync::RwLock;

use crate::db::Database;
use crate::models::{DatabaseHealth, HealthResponse};

/// Remembers when the server came up, for the uptime readout
pub struct ServerState {
    pub db: Database,
    pub started: Instant,
}

impl ServerState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            started: Instant::now(),
        }
    }
}

/// Shared state wrapper
pub type SharedState = Arc<RwLock<ServerState>>;

/// GET /health - Liveness check reporting uptime and the SQLite file backing
/// the catalog
pub async fn health_check(Extension(state): Extension<SharedState>) -> Json<HealthResponse> {
    let state = state.read().await;
    let db = &state.db;

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started.elapsed().as_secs(),
        database: DatabaseHealth {
            connected: true,
            path: db.path().display().to_string(),
            size_bytes: db.size_bytes(),
        },
    })
}
