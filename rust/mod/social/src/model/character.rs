use serde::{Deserialize, Serialize};

/// An AI character created by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,

    /// Uid of the creating user.
    pub creator_id: String,

    /// Denormalized creator display name.
    pub creator: String,

    pub name: String,

    /// Denormalized count of `liked_by`. Never negative.
    #[serde(default)]
    pub like_count: i64,

    /// Uids of users who liked this character.
    #[serde(default)]
    pub liked_by: Vec<String>,

    /// Incremented on every fetch. Not capped or deduplicated.
    #[serde(default)]
    pub view_count: i64,

    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Input for creating a character.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacter {
    pub creator_id: String,
    pub name: String,
}
