use serde::Serialize;

use plaza_core::{new_id, now_rfc3339, ListParams, ListResult};
use plaza_sql::Value;

use crate::model::notification::category;
use crate::model::{CreatePost, Post};
use crate::service::{SocialError, SocialService};

/// Trend score a fresh post starts with. With the daily 0.5 decay step
/// this gives a post ten days on the trending surface.
pub const INITIAL_TREND: f64 = 5.0;

/// Result of a post or comment like toggle, including the author's
/// photo for the legacy response shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeOutcome {
    pub liked: bool,
    pub like_count: i64,
    pub liked_by: Vec<String>,
    pub author_photo: String,
}

impl SocialService {
    /// Create a user post.
    pub fn create_post(&self, input: CreatePost) -> Result<Post, SocialError> {
        self.get_user(&input.author_id)?;
        self.insert_post("posts", input)
    }

    /// Create an AI post. The author id is a character id supplied by
    /// the (trusted) AI proxy, so no user lookup here.
    pub fn create_ai_post(&self, input: CreatePost) -> Result<Post, SocialError> {
        self.insert_post("ai_posts", input)
    }

    fn insert_post(&self, table: &str, input: CreatePost) -> Result<Post, SocialError> {
        if input.content.is_empty() {
            return Err(SocialError::Validation("content must not be empty".into()));
        }

        let now = now_rfc3339();
        let post = Post {
            id: new_id(),
            author_id: input.author_id,
            content: input.content,
            community: input.community,
            like_count: 0,
            liked_by: Vec::new(),
            comment_count: 0,
            trend: INITIAL_TREND,
            old: false,
            created_at: now.clone(),
        };

        let indexes: Vec<(&str, Value)> = vec![
            ("author_id", Value::Text(post.author_id.clone())),
            ("community", Value::Text(post.community.clone())),
            ("like_count", Value::Integer(0)),
            ("comment_count", Value::Integer(0)),
            ("trend", Value::Real(post.trend)),
            ("is_old", Value::Integer(0)),
            ("created_at", Value::Text(now)),
        ];

        self.insert_record(table, &post.id, &post, &indexes)?;
        Ok(post)
    }

    /// Get a post by id.
    pub fn get_post(&self, id: &str) -> Result<Post, SocialError> {
        self.get_record("posts", id)
    }

    /// List posts newest-first, optionally filtered by community.
    pub fn list_posts(&self, params: &ListParams) -> Result<ListResult<Post>, SocialError> {
        self.list_posts_in("posts", params)
    }

    /// List AI posts newest-first, optionally filtered by community.
    pub fn list_ai_posts(&self, params: &ListParams) -> Result<ListResult<Post>, SocialError> {
        self.list_posts_in("ai_posts", params)
    }

    fn list_posts_in(
        &self,
        table: &str,
        params: &ListParams,
    ) -> Result<ListResult<Post>, SocialError> {
        let mut filters: Vec<(&str, Value)> = Vec::new();
        if let Some(community) = &params.community {
            filters.push(("community", Value::Text(community.clone())));
        }
        let (items, total) = self.list_records(
            table,
            &filters,
            "created_at DESC",
            params.limit,
            params.offset,
        )?;
        Ok(ListResult { items, total })
    }

    /// Toggle `user_id`'s like on a post.
    ///
    /// Membership in `liked_by` decides the branch; the count floors at
    /// zero. A "Like" notification goes to the author on the like
    /// transition, and only when the liker is someone else.
    pub fn toggle_post_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> Result<LikeOutcome, SocialError> {
        let liker = self.get_user(user_id)?;
        let mut post: Post = self.get_record("posts", post_id)?;

        let liked = if let Some(pos) = post.liked_by.iter().position(|uid| uid == user_id) {
            post.liked_by.remove(pos);
            post.like_count = (post.like_count - 1).max(0);
            false
        } else {
            post.liked_by.push(user_id.to_string());
            post.like_count += 1;
            true
        };

        self.update_record(
            "posts",
            post_id,
            &post,
            &[("like_count", Value::Integer(post.like_count))],
        )?;

        let author = self.get_user(&post.author_id)?;
        if liked && user_id != post.author_id {
            self.add_notification(
                &post.author_id,
                &format!("{} liked your post", liker.display_name),
                category::LIKE,
            )?;
        }

        Ok(LikeOutcome {
            liked,
            like_count: post.like_count,
            liked_by: post.liked_by,
            author_photo: author.photo,
        })
    }
}

#[cfg(test)]
mod tests {
    use plaza_core::ListParams;

    use crate::model::notification::category;
    use crate::model::CreatePost;
    use crate::service::post::INITIAL_TREND;
    use crate::service::testutil::{seed_user, test_service};
    use crate::service::SocialError;

    #[test]
    fn test_create_and_list_posts() {
        let svc = test_service();
        seed_user(&svc, "u1", "Uma");

        let p1 = svc
            .create_post(CreatePost {
                author_id: "u1".into(),
                content: "hello".into(),
                community: "general".into(),
            })
            .unwrap();
        assert_eq!(p1.trend, INITIAL_TREND);
        assert!(!p1.old);

        svc.create_post(CreatePost {
            author_id: "u1".into(),
            content: "elsewhere".into(),
            community: "art".into(),
        })
        .unwrap();

        let all = svc.list_posts(&ListParams::default()).unwrap();
        assert_eq!(all.total, 2);

        let art = svc
            .list_posts(&ListParams {
                community: Some("art".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(art.total, 1);
        assert_eq!(art.items[0].content, "elsewhere");
    }

    #[test]
    fn test_post_author_must_exist() {
        let svc = test_service();
        let err = svc
            .create_post(CreatePost {
                author_id: "ghost".into(),
                content: "x".into(),
                community: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, SocialError::NotFound(_)));
    }

    #[test]
    fn test_like_toggle_round_trip_and_floor() {
        let svc = test_service();
        seed_user(&svc, "u2", "Vik");
        seed_user(&svc, "u3", "Wren");
        let post = svc
            .create_post(CreatePost {
                author_id: "u3".into(),
                content: "p1".into(),
                community: String::new(),
            })
            .unwrap();

        let liked = svc.toggle_post_like(&post.id, "u2").unwrap();
        assert!(liked.liked);
        assert_eq!(liked.like_count, 1);
        assert_eq!(liked.liked_by, vec!["u2".to_string()]);
        assert_eq!(liked.author_photo, "https://img.example/u3.png");

        let unliked = svc.toggle_post_like(&post.id, "u2").unwrap();
        assert!(!unliked.liked);
        assert_eq!(unliked.like_count, 0);
        assert!(unliked.liked_by.is_empty());

        // Count never goes negative, whatever state the toggle finds.
        let again = svc.toggle_post_like(&post.id, "u2").unwrap();
        assert!(again.liked);
        let and_back = svc.toggle_post_like(&post.id, "u2").unwrap();
        assert_eq!(and_back.like_count, 0);
        assert!(svc.get_post(&post.id).unwrap().like_count >= 0);
    }

    #[test]
    fn test_unlike_with_drifted_count_floors_at_zero() {
        let svc = test_service();
        seed_user(&svc, "u2", "Vik");
        seed_user(&svc, "u3", "Wren");
        let post = svc
            .create_post(CreatePost {
                author_id: "u3".into(),
                content: "p1".into(),
                community: String::new(),
            })
            .unwrap();

        // Membership present but the denormalized count already at zero.
        svc.toggle_post_like(&post.id, "u2").unwrap();
        svc.sql
            .exec(
                "UPDATE posts
                 SET like_count = 0, data = json_set(data, '$.likeCount', 0)
                 WHERE id = ?1",
                &[plaza_sql::Value::Text(post.id.clone())],
            )
            .unwrap();

        let unliked = svc.toggle_post_like(&post.id, "u2").unwrap();
        assert!(!unliked.liked);
        assert_eq!(unliked.like_count, 0);
    }

    #[test]
    fn test_like_notifies_author_but_not_self_like() {
        let svc = test_service();
        seed_user(&svc, "u2", "Vik");
        seed_user(&svc, "u3", "Wren");
        let post = svc
            .create_post(CreatePost {
                author_id: "u3".into(),
                content: "p1".into(),
                community: String::new(),
            })
            .unwrap();

        // Someone else likes: author is notified.
        svc.toggle_post_like(&post.id, "u2").unwrap();
        let notifications = svc.list_notifications("u3").unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].category, category::LIKE);
        assert!(notifications[0].message.contains("Vik"));

        // Unlike: no new notification.
        svc.toggle_post_like(&post.id, "u2").unwrap();
        assert_eq!(svc.list_notifications("u3").unwrap().len(), 1);

        // Author likes their own post: count moves, no notification.
        let own = svc.toggle_post_like(&post.id, "u3").unwrap();
        assert!(own.liked);
        assert_eq!(own.like_count, 1);
        assert_eq!(svc.list_notifications("u3").unwrap().len(), 1);
    }

    #[test]
    fn test_like_missing_post_is_not_found() {
        let svc = test_service();
        seed_user(&svc, "u2", "Vik");
        let err = svc.toggle_post_like("missing", "u2").unwrap_err();
        assert!(matches!(err, SocialError::NotFound(_)));
    }

    #[test]
    fn test_ai_posts_live_in_their_own_table() {
        let svc = test_service();
        svc.create_ai_post(CreatePost {
            author_id: "char-9".into(),
            content: "generated".into(),
            community: "ai".into(),
        })
        .unwrap();

        assert_eq!(svc.list_ai_posts(&ListParams::default()).unwrap().total, 1);
        assert_eq!(svc.list_posts(&ListParams::default()).unwrap().total, 0);
    }
}
