use serde::Serialize;

use plaza_core::{new_id, now_rfc3339};
use plaza_sql::Value;

use crate::model::notification::category;
use crate::model::{Character, CreateCharacter};
use crate::service::{SocialError, SocialService};

/// Result of a character like toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterLikeOutcome {
    pub liked: bool,
    pub like_count: i64,
}

impl SocialService {
    /// Create a character, denormalizing the creator's display name.
    pub fn create_character(&self, input: CreateCharacter) -> Result<Character, SocialError> {
        if input.name.is_empty() {
            return Err(SocialError::Validation("name must not be empty".into()));
        }
        let creator = self.get_user(&input.creator_id)?;

        let now = now_rfc3339();
        let character = Character {
            id: new_id(),
            creator_id: input.creator_id,
            creator: creator.display_name,
            name: input.name,
            like_count: 0,
            liked_by: Vec::new(),
            view_count: 0,
            created_at: now.clone(),
        };

        let indexes: Vec<(&str, Value)> = vec![
            ("creator_id", Value::Text(character.creator_id.clone())),
            ("like_count", Value::Integer(0)),
            ("view_count", Value::Integer(0)),
            ("created_at", Value::Text(now)),
        ];
        self.insert_record("characters", &character.id, &character, &indexes)?;
        Ok(character)
    }

    /// Fetch a character, counting the view.
    ///
    /// Every fetch increments `view_count` — no cap, no dedup. The bump
    /// is a single atomic statement; SET expressions see the pre-update
    /// row, so the JSON copy and the column stay in step.
    pub fn get_character(&self, id: &str) -> Result<Character, SocialError> {
        let affected = self
            .sql
            .exec(
                "UPDATE characters
                 SET view_count = view_count + 1,
                     data = json_set(data, '$.viewCount', view_count + 1)
                 WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        if affected == 0 {
            return Err(SocialError::NotFound(format!("characters/{}", id)));
        }
        self.get_record("characters", id)
    }

    /// Toggle `user_id`'s like on a character. The creator gets a "Like"
    /// notification on the like transition unless they liked their own.
    pub fn toggle_character_like(
        &self,
        char_id: &str,
        user_id: &str,
    ) -> Result<CharacterLikeOutcome, SocialError> {
        let liker = self.get_user(user_id)?;
        let mut character: Character = self.get_record("characters", char_id)?;

        let liked = if let Some(pos) = character.liked_by.iter().position(|uid| uid == user_id) {
            character.liked_by.remove(pos);
            character.like_count = (character.like_count - 1).max(0);
            false
        } else {
            character.liked_by.push(user_id.to_string());
            character.like_count += 1;
            true
        };

        self.update_record(
            "characters",
            char_id,
            &character,
            &[("like_count", Value::Integer(character.like_count))],
        )?;

        if liked && user_id != character.creator_id {
            self.add_notification(
                &character.creator_id,
                &format!("{} liked your character {}", liker.display_name, character.name),
                category::LIKE,
            )?;
        }

        Ok(CharacterLikeOutcome {
            liked,
            like_count: character.like_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{CreateCharacter, CreateUser};
    use crate::service::testutil::{seed_user, test_service};
    use crate::service::SocialError;

    #[test]
    fn test_create_denormalizes_creator_name() {
        let svc = test_service();
        seed_user(&svc, "u5", "Ida");
        let character = svc
            .create_character(CreateCharacter {
                creator_id: "u5".into(),
                name: "Captain Byte".into(),
            })
            .unwrap();
        assert_eq!(character.creator, "Ida");
        assert_eq!(character.view_count, 0);
    }

    #[test]
    fn test_every_fetch_counts_a_view() {
        let svc = test_service();
        seed_user(&svc, "u5", "Ida");
        let id = svc
            .create_character(CreateCharacter {
                creator_id: "u5".into(),
                name: "Captain Byte".into(),
            })
            .unwrap()
            .id;

        assert_eq!(svc.get_character(&id).unwrap().view_count, 1);
        assert_eq!(svc.get_character(&id).unwrap().view_count, 2);
        assert_eq!(svc.get_character(&id).unwrap().view_count, 3);
    }

    #[test]
    fn test_fetch_missing_character_is_not_found() {
        let svc = test_service();
        let err = svc.get_character("missing").unwrap_err();
        assert!(matches!(err, SocialError::NotFound(_)));
    }

    #[test]
    fn test_like_toggle_and_creator_notification() {
        let svc = test_service();
        seed_user(&svc, "u5", "Ida");
        svc.create_user(CreateUser {
            uid: "u6".into(),
            display_name: "Jo".into(),
            photo: String::new(),
            bio: String::new(),
        })
        .unwrap();
        let id = svc
            .create_character(CreateCharacter {
                creator_id: "u5".into(),
                name: "Captain Byte".into(),
            })
            .unwrap()
            .id;

        let liked = svc.toggle_character_like(&id, "u6").unwrap();
        assert!(liked.liked);
        assert_eq!(liked.like_count, 1);
        let notifications = svc.list_notifications("u5").unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("Captain Byte"));

        let unliked = svc.toggle_character_like(&id, "u6").unwrap();
        assert!(!unliked.liked);
        assert_eq!(unliked.like_count, 0);
        assert_eq!(svc.list_notifications("u5").unwrap().len(), 1);

        // Creator liking their own character: count moves, no notification.
        svc.toggle_character_like(&id, "u5").unwrap();
        assert_eq!(svc.list_notifications("u5").unwrap().len(), 1);
    }
}
