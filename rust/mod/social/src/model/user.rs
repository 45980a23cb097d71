use serde::{Deserialize, Serialize};

/// A platform user.
///
/// The `uid` is issued by the external identity provider; this service
/// never generates one. `followers` is a denormalized count of the users
/// whose `following` list contains this uid — kept eventually consistent
/// by the follow toggle, not by a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Externally-issued opaque identity.
    pub uid: String,

    /// Display name.
    pub display_name: String,

    /// Avatar photo URL.
    #[serde(default)]
    pub photo: String,

    /// Profile bio.
    #[serde(default)]
    pub bio: String,

    /// Denormalized follower count. Never negative.
    #[serde(default)]
    pub followers: i64,

    /// Uids of users this user follows (the owned side of the edge).
    #[serde(default)]
    pub following: Vec<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for registering a user record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub uid: String,
    pub display_name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub bio: String,
}
