use serde::Serialize;

use crate::model::notification::category;
use crate::service::{SocialError, SocialService};

/// Result of a follow toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowOutcome {
    pub followed: bool,
    pub follower_count: i64,
}

impl SocialService {
    /// Toggle the follow edge from `follower_uid` to `target_uid`.
    ///
    /// The edge is owned by the follower (`following` list); the target
    /// carries the denormalized `followers` count. The two documents are
    /// written independently — there is no transaction tying them
    /// together, so a crash between the writes can leave the count
    /// drifted from the edge set. A "Follow" notification goes to the
    /// target on the follow transition only.
    pub fn toggle_follow(
        &self,
        follower_uid: &str,
        target_uid: &str,
    ) -> Result<FollowOutcome, SocialError> {
        if follower_uid == target_uid {
            return Err(SocialError::InvalidOperation(
                "cannot follow yourself".into(),
            ));
        }

        let mut follower = self.get_user(follower_uid)?;
        let mut target = self.get_user(target_uid)?;

        let followed = if let Some(pos) =
            follower.following.iter().position(|uid| uid == target_uid)
        {
            follower.following.remove(pos);
            target.followers = (target.followers - 1).max(0);
            false
        } else {
            follower.following.push(target_uid.to_string());
            target.followers += 1;
            true
        };

        // Edge first, then count. See above: not atomic across the pair.
        self.save_user(&follower)?;
        self.save_user(&target)?;

        if followed {
            self.add_notification(
                target_uid,
                &format!("{} started following you", follower.display_name),
                category::FOLLOW,
            )?;
        }

        Ok(FollowOutcome {
            followed,
            follower_count: target.followers,
        })
    }

    /// Whether `follower_uid` currently follows `target_uid`.
    pub fn is_following(
        &self,
        follower_uid: &str,
        target_uid: &str,
    ) -> Result<bool, SocialError> {
        // Ensure the target exists so a bad id reads as 404, not "false".
        self.get_user(target_uid)?;
        let follower = self.get_user(follower_uid)?;
        Ok(follower.following.iter().any(|uid| uid == target_uid))
    }
}
