use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use plaza_core::ServiceError;

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/degrade-posts", post(degrade_posts))
}

/// POST /degrade-posts — run the trend decay batch synchronously.
///
/// Invokes the identical routine the daily scheduler runs, so the two
/// paths cannot drift.
async fn degrade_posts(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let decayed = svc.decay_trends().map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "message": format!("trend decay complete, {decayed} posts updated"),
    })))
}
