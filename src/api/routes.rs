use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use super::handlers::*;

pub fn create_router() -> Router {
    Router::new()
        .route("/api/trajectory", post(compute_trajectory))
        .route("/api/trajectory/report", post(trajectory_report))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(16 * 1024 * 1024)) // 16MB limit
                .layer(CorsLayer::permissive())
        )
}
