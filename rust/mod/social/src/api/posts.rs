use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};

use plaza_core::{ListParams, ServiceError};

use crate::api::AppState;
use crate::model::CreatePost;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{post_id}", get(get_post))
        .route("/api/posts/{post_id}/like/{id}", post(toggle_like))
        .route("/api/aiposts", get(list_ai_posts).post(create_ai_post))
}

/// The liker id the upstream identity layer attached to the request.
pub(crate) fn user_id_header(headers: &HeaderMap) -> Result<String, ServiceError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .ok_or_else(|| ServiceError::Validation("missing x-user-id header".into()))
}

async fn create_post(
    State(svc): State<AppState>,
    Json(input): Json<CreatePost>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let post = svc.create_post(input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::to_value(post).map_err(|e| ServiceError::Internal(e.to_string()))?),
    ))
}

async fn list_posts(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_posts(&params).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}

async fn get_post(
    State(svc): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let post = svc.get_post(&post_id).map_err(ServiceError::from)?;
    Ok(Json(
        serde_json::to_value(post).map_err(|e| ServiceError::Internal(e.to_string()))?,
    ))
}

/// POST /api/posts/{postId}/like/{id} — toggle a like as user `{id}`.
///
/// The path liker id must match the verified `x-user-id` header; a
/// mismatch means the caller is acting as someone else.
async fn toggle_like(
    State(svc): State<AppState>,
    Path((post_id, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let verified = user_id_header(&headers)?;
    if verified != id {
        return Err(ServiceError::PermissionDenied(
            "x-user-id does not match the liker id".into(),
        ));
    }

    let outcome = svc
        .toggle_post_like(&post_id, &id)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "likeCount": outcome.like_count,
        "likedBy": outcome.liked_by,
        "authorPhoto": outcome.author_photo,
    })))
}

async fn create_ai_post(
    State(svc): State<AppState>,
    Json(input): Json<CreatePost>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let post = svc.create_ai_post(input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::to_value(post).map_err(|e| ServiceError::Internal(e.to_string()))?),
    ))
}

async fn list_ai_posts(
    State(svc): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let result = svc.list_ai_posts(&params).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "items": result.items,
        "total": result.total,
    })))
}
