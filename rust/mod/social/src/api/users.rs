use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use plaza_core::ServiceError;

use crate::api::AppState;
use crate::model::CreateUser;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/user", axum::routing::post(create_user))
        .route("/api/user/{uid}", get(get_user))
        .route(
            "/api/user/{uid}/follow",
            get(follow_state).post(toggle_follow),
        )
}

#[derive(Debug, Deserialize)]
struct UidQuery {
    uid: Option<String>,
}

impl UidQuery {
    fn require(self) -> Result<String, ServiceError> {
        self.uid
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| ServiceError::Validation("missing uid parameter".into()))
    }
}

async fn create_user(
    State(svc): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let user = svc.create_user(input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::to_value(user).map_err(|e| ServiceError::Internal(e.to_string()))?),
    ))
}

async fn get_user(
    State(svc): State<AppState>,
    Path(uid): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user = svc.get_user(&uid).map_err(ServiceError::from)?;
    Ok(Json(
        serde_json::to_value(user).map_err(|e| ServiceError::Internal(e.to_string()))?,
    ))
}

/// GET /api/user/{creatorId}/follow?uid= — whether `uid` follows the creator.
async fn follow_state(
    State(svc): State<AppState>,
    Path(creator_id): Path<String>,
    Query(q): Query<UidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let uid = q.require()?;
    let followed = svc
        .is_following(&uid, &creator_id)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "followed": followed })))
}

/// POST /api/user/{creatorId}/follow?uid= — toggle the follow edge.
async fn toggle_follow(
    State(svc): State<AppState>,
    Path(creator_id): Path<String>,
    Query(q): Query<UidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let uid = q.require()?;
    let outcome = svc
        .toggle_follow(&uid, &creator_id)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "followed": outcome.followed,
        "followerCount": outcome.follower_count,
    })))
}
