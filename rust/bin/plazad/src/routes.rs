//! Route registration — collects all module routes + system endpoints.

use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tracing::info;

/// Build the complete router with all routes.
///
/// Module routers already carry their state and use absolute legacy
/// paths, so they are merged at the root rather than nested.
pub fn build_router(module_routes: Vec<(String, Router)>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for (name, router) in module_routes {
        info!("mounting module routes: {}", name);
        app = app.merge(router);
    }

    app
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "plazad",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
