mod admin;
mod characters;
mod comments;
mod notifications;
mod posts;
mod users;

use std::sync::Arc;

use axum::Router;

use crate::service::SocialService;

/// Shared application state.
pub type AppState = Arc<SocialService>;

/// Build the complete social API router.
///
/// Paths are absolute (`/api/...`, `/notify/...`, `/degrade-posts`) for
/// wire compatibility with the legacy frontend — the caller merges this
/// router at the root rather than nesting it.
pub fn build_router(svc: Arc<SocialService>) -> Router {
    Router::new()
        .merge(users::routes())
        .merge(posts::routes())
        .merge(comments::routes())
        .merge(characters::routes())
        .merge(notifications::routes())
        .merge(admin::routes())
        .with_state(svc)
}
