//! Social module — follower graph, likes, notifications, trend decay.
//!
//! # Resources
//!
//! - **User** — externally-identified profile with a `following` edge
//!   list and a denormalized follower count
//! - **Post** / **AIPost** — content with a like ledger, comment count,
//!   and a decaying trend score
//! - **Comment** — threaded via a best-effort `@mention` heuristic
//! - **Character** — AI character with a like ledger and a raw view count
//! - **Notification** — one-way message with read/unread state
//!
//! # Usage
//!
//! ```ignore
//! use social::SocialModule;
//!
//! let module = SocialModule::new(sql)?;
//! let router = module.routes(); // merge at the root
//! ```

pub mod api;
pub mod model;
pub mod service;
pub mod worker;

use std::sync::Arc;

use axum::Router;

use plaza_core::Module;

use crate::service::SocialService;

/// Social module implementing the Module trait.
///
/// Holds the SocialService and provides HTTP routes for all social
/// endpoints. The trend decay worker is started separately via
/// [`worker::start`] so the caller controls its lifecycle.
pub struct SocialModule {
    service: Arc<SocialService>,
}

impl SocialModule {
    /// Create a new SocialModule.
    pub fn new(
        sql: Arc<dyn plaza_sql::SQLStore>,
    ) -> Result<Self, plaza_core::ServiceError> {
        let service = SocialService::new(sql).map_err(plaza_core::ServiceError::from)?;
        Ok(Self { service })
    }

    /// Get a reference to the underlying SocialService.
    pub fn service(&self) -> &Arc<SocialService> {
        &self.service
    }
}

impl Module for SocialModule {
    fn name(&self) -> &str {
        "social"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
