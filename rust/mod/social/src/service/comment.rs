use plaza_core::{new_id, now_rfc3339};
use plaza_sql::Value;

use crate::model::notification::category;
use crate::model::{Comment, CreateComment, Post};
use crate::service::post::LikeOutcome;
use crate::service::{SocialError, SocialService};

/// Extract the display name from a leading `@mention`.
///
/// Best-effort string matching only — the result is a display name, not
/// a user reference, and nothing validates it. A mention anywhere past
/// the first character is ignored.
pub fn parse_reply_mention(content: &str) -> Option<String> {
    let rest = content.strip_prefix('@')?;
    let name: String = rest.chars().take_while(|c| !c.is_whitespace()).collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

impl SocialService {
    /// Create a comment on a post.
    ///
    /// Bumps the post's denormalized `comment_count` and notifies the
    /// post author unless they are the commenter.
    pub fn create_comment(&self, input: CreateComment) -> Result<Comment, SocialError> {
        if input.content.is_empty() {
            return Err(SocialError::Validation("content must not be empty".into()));
        }
        let author = self.get_user(&input.author_id)?;
        let mut post: Post = self.get_record("posts", &input.post_id)?;

        let now = now_rfc3339();
        let comment = Comment {
            id: new_id(),
            post_id: input.post_id,
            author_id: input.author_id,
            reply_to: parse_reply_mention(&input.content),
            content: input.content,
            likes: 0,
            liked_by: Vec::new(),
            created_at: now.clone(),
        };

        let indexes: Vec<(&str, Value)> = vec![
            ("post_id", Value::Text(comment.post_id.clone())),
            ("author_id", Value::Text(comment.author_id.clone())),
            ("likes", Value::Integer(0)),
            ("created_at", Value::Text(now)),
        ];
        self.insert_record("comments", &comment.id, &comment, &indexes)?;

        post.comment_count += 1;
        self.update_record(
            "posts",
            &post.id,
            &post,
            &[("comment_count", Value::Integer(post.comment_count))],
        )?;

        if comment.author_id != post.author_id {
            self.add_notification(
                &post.author_id,
                &format!("{} commented on your post", author.display_name),
                category::COMMENT,
            )?;
        }

        Ok(comment)
    }

    /// List a post's comments in conversation order (oldest first).
    pub fn list_comments(&self, post_id: &str) -> Result<Vec<Comment>, SocialError> {
        let (items, _total) = self.list_records(
            "comments",
            &[("post_id", Value::Text(post_id.to_string()))],
            "created_at ASC",
            1000,
            0,
        )?;
        Ok(items)
    }

    /// Toggle `user_id`'s like on a comment. Same semantics as post
    /// likes; the notification goes to the comment author.
    pub fn toggle_comment_like(
        &self,
        comment_id: &str,
        user_id: &str,
    ) -> Result<LikeOutcome, SocialError> {
        let liker = self.get_user(user_id)?;
        let mut comment: Comment = self.get_record("comments", comment_id)?;

        let liked = if let Some(pos) = comment.liked_by.iter().position(|uid| uid == user_id) {
            comment.liked_by.remove(pos);
            comment.likes = (comment.likes - 1).max(0);
            false
        } else {
            comment.liked_by.push(user_id.to_string());
            comment.likes += 1;
            true
        };

        self.update_record(
            "comments",
            comment_id,
            &comment,
            &[("likes", Value::Integer(comment.likes))],
        )?;

        let author = self.get_user(&comment.author_id)?;
        if liked && user_id != comment.author_id {
            self.add_notification(
                &comment.author_id,
                &format!("{} liked your comment", liker.display_name),
                category::LIKE,
            )?;
        }

        Ok(LikeOutcome {
            liked,
            like_count: comment.likes,
            liked_by: comment.liked_by,
            author_photo: author.photo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::parse_reply_mention;
    use crate::model::notification::category;
    use crate::model::{CreateComment, CreatePost};
    use crate::service::testutil::{seed_user, test_service};
    use crate::service::{SocialError, SocialService};
    use std::sync::Arc;

    fn seed_post(svc: &Arc<SocialService>, author: &str) -> String {
        svc.create_post(CreatePost {
            author_id: author.into(),
            content: "a post".into(),
            community: String::new(),
        })
        .unwrap()
        .id
    }

    #[test]
    fn test_parse_reply_mention() {
        assert_eq!(parse_reply_mention("@Wren thanks!"), Some("Wren".into()));
        assert_eq!(parse_reply_mention("@Wren"), Some("Wren".into()));
        assert_eq!(parse_reply_mention("thanks @Wren"), None);
        assert_eq!(parse_reply_mention("@ odd"), None);
        assert_eq!(parse_reply_mention("plain text"), None);
        assert_eq!(parse_reply_mention(""), None);
    }

    #[test]
    fn test_create_comment_bumps_count_and_notifies() {
        let svc = test_service();
        seed_user(&svc, "u3", "Wren");
        seed_user(&svc, "u4", "Remy");
        let post_id = seed_post(&svc, "u3");

        let comment = svc
            .create_comment(CreateComment {
                post_id: post_id.clone(),
                author_id: "u4".into(),
                content: "@Wren nice one".into(),
            })
            .unwrap();
        assert_eq!(comment.reply_to, Some("Wren".into()));

        assert_eq!(svc.get_post(&post_id).unwrap().comment_count, 1);

        let notifications = svc.list_notifications("u3").unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].category, category::COMMENT);

        // Commenting on your own post stays silent.
        svc.create_comment(CreateComment {
            post_id: post_id.clone(),
            author_id: "u3".into(),
            content: "replying to myself".into(),
        })
        .unwrap();
        assert_eq!(svc.get_post(&post_id).unwrap().comment_count, 2);
        assert_eq!(svc.list_notifications("u3").unwrap().len(), 1);
    }

    #[test]
    fn test_list_comments_in_conversation_order() {
        let svc = test_service();
        seed_user(&svc, "u3", "Wren");
        let post_id = seed_post(&svc, "u3");

        for (i, time) in ["2026-08-01", "2026-08-02"].iter().enumerate() {
            let c = svc
                .create_comment(CreateComment {
                    post_id: post_id.clone(),
                    author_id: "u3".into(),
                    content: format!("c{i}"),
                })
                .unwrap();
            svc.sql
                .exec(
                    "UPDATE comments SET created_at = ?1 WHERE id = ?2",
                    &[
                        plaza_sql::Value::Text(format!("{time}T00:00:00+00:00")),
                        plaza_sql::Value::Text(c.id),
                    ],
                )
                .unwrap();
        }

        let comments = svc.list_comments(&post_id).unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].content, "c0");
        assert_eq!(comments[1].content, "c1");
    }

    #[test]
    fn test_comment_like_toggle_and_notification() {
        let svc = test_service();
        seed_user(&svc, "u3", "Wren");
        seed_user(&svc, "u4", "Remy");
        let post_id = seed_post(&svc, "u3");
        let comment = svc
            .create_comment(CreateComment {
                post_id,
                author_id: "u3".into(),
                content: "mine".into(),
            })
            .unwrap();

        let liked = svc.toggle_comment_like(&comment.id, "u4").unwrap();
        assert!(liked.liked);
        assert_eq!(liked.like_count, 1);
        assert_eq!(liked.author_photo, "https://img.example/u3.png");
        assert_eq!(svc.list_notifications("u3").unwrap().len(), 1);

        let unliked = svc.toggle_comment_like(&comment.id, "u4").unwrap();
        assert!(!unliked.liked);
        assert_eq!(unliked.like_count, 0);
        assert_eq!(svc.list_notifications("u3").unwrap().len(), 1);
    }

    #[test]
    fn test_comment_on_missing_post_is_not_found() {
        let svc = test_service();
        seed_user(&svc, "u4", "Remy");
        let err = svc
            .create_comment(CreateComment {
                post_id: "missing".into(),
                author_id: "u4".into(),
                content: "hi".into(),
            })
            .unwrap_err();
        assert!(matches!(err, SocialError::NotFound(_)));
    }
}
