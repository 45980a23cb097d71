use axum::extract::{Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;

use plaza_core::ServiceError;

use crate::api::AppState;
use crate::model::AddNotification;

/// Legacy notification endpoints. Parameter names (`uid`, `notid`, the
/// `not` body field) are wire-compatible with the original frontend.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notify/add", post(add))
        .route("/notify/data", get(data))
        .route("/notify/read", get(mark_read))
        .route("/notify/delete", delete(remove))
        .route("/notify/number", get(number))
        .route("/notify/readall", post(read_all))
        .route("/notify/clear", delete(clear))
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

#[derive(Debug, Deserialize)]
struct NotidQuery {
    notid: Option<String>,
}

impl NotidQuery {
    fn require(self) -> Result<String, ServiceError> {
        self.notid
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ServiceError::Validation("missing notid parameter".into()))
    }
}

async fn add(
    State(svc): State<AppState>,
    Json(input): Json<AddNotification>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let notification = svc
        .add_notification(&input.uid, &input.message, &input.category)
        .map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "id": notification.id })))
}

async fn data(
    State(svc): State<AppState>,
    Query(q): Query<UidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let uid = q.require()?;
    let notifications = svc.list_notifications(&uid).map_err(ServiceError::from)?;
    Ok(Json(
        serde_json::to_value(notifications)
            .map_err(|e| ServiceError::Internal(e.to_string()))?,
    ))
}

/// GET /notify/read?notid= — mark one notification read. A GET that
/// mutates, kept for wire compatibility. Silent success on a missing id.
async fn mark_read(
    State(svc): State<AppState>,
    Query(q): Query<NotidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let notid = q.require()?;
    svc.mark_read(&notid).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

/// DELETE /notify/delete?notid= — silent success on a missing id.
async fn remove(
    State(svc): State<AppState>,
    Query(q): Query<NotidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let notid = q.require()?;
    svc.delete_notification(&notid).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn number(
    State(svc): State<AppState>,
    Query(q): Query<UidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let uid = q.require()?;
    let count = svc.unread_count(&uid).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "unreadCount": count })))
}

async fn read_all(
    State(svc): State<AppState>,
    Query(q): Query<UidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let uid = q.require()?;
    let updated = svc.mark_all_read(&uid).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

async fn clear(
    State(svc): State<AppState>,
    Query(q): Query<UidQuery>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let uid = q.require()?;
    let deleted = svc.clear_all(&uid).map_err(ServiceError::from)?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
