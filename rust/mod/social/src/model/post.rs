use serde::{Deserialize, Serialize};

/// A user post. The same shape backs AI-authored posts (stored in their
/// own table); for those, `author_id` is a character id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,

    /// Uid of the authoring user (or character id for AI posts).
    pub author_id: String,

    pub content: String,

    /// Community tag the post belongs to.
    #[serde(default)]
    pub community: String,

    /// Denormalized count of `liked_by`. Never negative.
    #[serde(default)]
    pub like_count: i64,

    /// Uids of users who liked this post.
    #[serde(default)]
    pub liked_by: Vec<String>,

    /// Denormalized comment count.
    #[serde(default)]
    pub comment_count: i64,

    /// Decaying ranking signal. Floored at 0 by the decay job.
    #[serde(default)]
    pub trend: f64,

    /// Terminal flag, set once `trend` hits the floor.
    #[serde(default)]
    pub old: bool,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for creating a post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub author_id: String,
    pub content: String,
    #[serde(default)]
    pub community: String,
}
