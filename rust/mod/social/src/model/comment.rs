use serde::{Deserialize, Serialize};

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,

    pub post_id: String,

    pub author_id: String,

    pub content: String,

    /// Denormalized count of `liked_by`. Never negative.
    #[serde(default)]
    pub likes: i64,

    /// Uids of users who liked this comment.
    #[serde(default)]
    pub liked_by: Vec<String>,

    /// Display name parsed from a leading `@mention` in the content.
    /// Best-effort string heuristic, not a reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for creating a comment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    pub post_id: String,
    pub author_id: String,
    pub content: String,
}
