use serde::{Deserialize, Serialize};

/// Notification categories written by this module.
pub mod category {
    pub const FOLLOW: &str = "Follow";
    pub const LIKE: &str = "Like";
    pub const COMMENT: &str = "Comment";
}

/// A one-way message record targeted at a recipient user.
///
/// Notifications have no owner-side cascade: deleting a user leaves
/// their notifications in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,

    pub recipient_id: String,

    pub message: String,

    pub category: String,

    /// RFC 3339 creation timestamp.
    pub time: String,

    /// Read state. The legacy wire name is `status`; false = unread.
    #[serde(rename = "status", default)]
    pub read: bool,
}

/// Body of the legacy `POST /notify/add` endpoint.
///
/// Field names are wire-compatible with the original API: `uid` is the
/// recipient and `not` is the message text.
#[derive(Debug, Clone, Deserialize)]
pub struct AddNotification {
    pub uid: String,

    #[serde(rename = "not")]
    pub message: String,

    pub category: String,
}
