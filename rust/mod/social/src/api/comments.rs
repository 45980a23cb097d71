use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};

use plaza_core::ServiceError;

use crate::api::posts::user_id_header;
use crate::api::AppState;
use crate::model::CreateComment;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/comments", post(create_comment))
        .route("/api/posts/{post_id}/comments", get(list_comments))
        .route("/api/comments/{comment_id}/like", post(toggle_like))
}

async fn create_comment(
    State(svc): State<AppState>,
    Json(input): Json<CreateComment>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let comment = svc.create_comment(input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(serde_json::to_value(comment).map_err(|e| ServiceError::Internal(e.to_string()))?),
    ))
}

async fn list_comments(
    State(svc): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let comments = svc.list_comments(&post_id).map_err(ServiceError::from)?;
    Ok(Json(
        serde_json::to_value(comments).map_err(|e| ServiceError::Internal(e.to_string()))?,
    ))
}

/// POST /api/comments/{commentId}/like — toggle a like as the verified
/// `x-user-id` caller. Legacy response shape uses `likes`, not `likeCount`.
async fn toggle_like(
    State(svc): State<AppState>,
    Path(comment_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let user_id = user_id_header(&headers)?;
    let outcome = svc
        .toggle_comment_like(&comment_id, &user_id)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "likes": outcome.like_count,
        "likedBy": outcome.liked_by,
        "authorPhoto": outcome.author_photo,
    })))
}
