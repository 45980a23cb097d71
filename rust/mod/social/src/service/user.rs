use plaza_core::now_rfc3339;
use plaza_sql::Value;

use crate::model::{CreateUser, User};
use crate::service::{SocialError, SocialService};

impl SocialService {
    /// Register a user record under its externally-issued uid.
    pub fn create_user(&self, input: CreateUser) -> Result<User, SocialError> {
        if input.uid.is_empty() {
            return Err(SocialError::Validation("uid must not be empty".into()));
        }
        if input.display_name.is_empty() {
            return Err(SocialError::Validation("displayName must not be empty".into()));
        }

        let now = now_rfc3339();
        let user = User {
            uid: input.uid,
            display_name: input.display_name,
            photo: input.photo,
            bio: input.bio,
            followers: 0,
            following: Vec::new(),
            created_at: now.clone(),
        };

        let indexes: Vec<(&str, Value)> = vec![
            ("display_name", Value::Text(user.display_name.clone())),
            ("followers", Value::Integer(0)),
            ("created_at", Value::Text(now)),
        ];

        self.insert_record("users", &user.uid, &user, &indexes)?;
        Ok(user)
    }

    /// Get a user by uid.
    pub fn get_user(&self, uid: &str) -> Result<User, SocialError> {
        self.get_record("users", uid)
    }

    /// Persist a mutated user document, syncing the indexed follower count.
    pub(crate) fn save_user(&self, user: &User) -> Result<(), SocialError> {
        self.update_record(
            "users",
            &user.uid,
            user,
            &[("followers", Value::Integer(user.followers))],
        )
    }
}
