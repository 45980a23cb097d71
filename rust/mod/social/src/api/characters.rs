use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use plaza_core::ServiceError;

use crate::api::AppState;
use crate::model::CreateCharacter;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/char", post(create_character))
        .route("/api/char/{char_id}", get(get_character))
        .route("/api/char/{char_id}/like", post(toggle_like))
}

#[derive(Debug, Deserialize)]
struct UidQuery {
    uid: Option<String>,
}

async fn create_character(
    State(svc): State<AppState>,
    Json(input): Json<CreateCharacter>,
) -> Result<(axum::http::StatusCode, Json<serde_json::Value>), ServiceError> {
    let character = svc.create_character(input).map_err(ServiceError::from)?;
    Ok((
        axum::http::StatusCode::CREATED,
        Json(
            serde_json::to_value(character)
                .map_err(|e| ServiceError::Internal(e.to_string()))?,
        ),
    ))
}

/// GET /api/char/{charId} — fetch a character. Every fetch counts a view.
async fn get_character(
    State(svc): State<AppState>,
    Path(char_id): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let character = svc.get_character(&char_id).map_err(ServiceError::from)?;
    Ok(Json(
        serde_json::to_value(character).map_err(|e| ServiceError::Internal(e.to_string()))?,
    ))
}

/// POST /api/char/{charId}/like?uid= — toggle a like on a character.
async fn toggle_like(
    State(svc): State<AppState>,
    Path(char_id): Path<String>,
    Query(q): Query<UidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let uid = q
        .uid
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| ServiceError::Validation("missing uid parameter".into()))?;
    let outcome = svc
        .toggle_character_like(&char_id, &uid)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({
        "liked": outcome.liked,
        "likeCount": outcome.like_count,
    })))
}
