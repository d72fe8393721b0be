//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/directions", post(handlers::directions::directions))
        .route("/routes/optimal", post(handlers::optimization::optimal_route))
        .with_state(state)
}
