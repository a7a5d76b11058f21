//! API Routes
//!
//! This module organizes all HTTP endpoints for the application:
//! - `/run` - The report pipeline endpoint
//! - `/` - Liveness message
//! - `/api/health` - Health check

pub mod health;
pub mod run;

use axum::Router;
use tracing::info;

use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(run::router(state))
        .merge(health::router())
}
