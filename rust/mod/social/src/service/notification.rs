use plaza_core::{new_id, now_rfc3339};
use plaza_sql::Value;

use crate::model::Notification;
use crate::service::{SocialError, SocialService};

impl SocialService {
    /// Create a notification for a recipient.
    ///
    /// The recipient is not checked for existence: notifications may
    /// outlive their users (no cascade either way), and the legacy add
    /// endpoint accepted any uid.
    pub fn add_notification(
        &self,
        recipient_id: &str,
        message: &str,
        category: &str,
    ) -> Result<Notification, SocialError> {
        if recipient_id.is_empty() {
            return Err(SocialError::Validation("uid must not be empty".into()));
        }

        let notification = Notification {
            id: new_id(),
            recipient_id: recipient_id.to_string(),
            message: message.to_string(),
            category: category.to_string(),
            time: now_rfc3339(),
            read: false,
        };

        let indexes: Vec<(&str, Value)> = vec![
            ("recipient_id", Value::Text(notification.recipient_id.clone())),
            ("category", Value::Text(notification.category.clone())),
            ("status", Value::Integer(0)),
            ("time", Value::Text(notification.time.clone())),
        ];

        self.insert_record("notifications", &notification.id, &notification, &indexes)?;
        Ok(notification)
    }

    /// List a recipient's notifications: unread before read, newest
    /// first within each group.
    pub fn list_notifications(
        &self,
        recipient_id: &str,
    ) -> Result<Vec<Notification>, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT data FROM notifications
                 WHERE recipient_id = ?1
                 ORDER BY status ASC, time DESC",
                &[Value::Text(recipient_id.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let data = row
                .get_str("data")
                .ok_or_else(|| SocialError::Internal("missing data column".into()))?;
            items.push(
                serde_json::from_str(data).map_err(|e| SocialError::Internal(e.to_string()))?,
            );
        }
        Ok(items)
    }

    /// Mark a notification read. Idempotent: a missing or already-read
    /// id matches zero rows and succeeds silently.
    pub fn mark_read(&self, notification_id: &str) -> Result<(), SocialError> {
        self.sql
            .exec(
                "UPDATE notifications
                 SET status = 1, data = json_set(data, '$.status', json('true'))
                 WHERE id = ?1",
                &[Value::Text(notification_id.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Delete a notification. Idempotent: a missing id is a silent success.
    pub fn delete_notification(&self, notification_id: &str) -> Result<(), SocialError> {
        self.sql
            .exec(
                "DELETE FROM notifications WHERE id = ?1",
                &[Value::Text(notification_id.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        Ok(())
    }

    /// Mark all of a recipient's unread notifications read, as one
    /// conditional bulk update. Returns how many were flipped.
    pub fn mark_all_read(&self, recipient_id: &str) -> Result<u64, SocialError> {
        self.sql
            .exec(
                "UPDATE notifications
                 SET status = 1, data = json_set(data, '$.status', json('true'))
                 WHERE recipient_id = ?1 AND status = 0",
                &[Value::Text(recipient_id.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))
    }

    /// Delete all of a recipient's notifications. Returns how many went.
    pub fn clear_all(&self, recipient_id: &str) -> Result<u64, SocialError> {
        self.sql
            .exec(
                "DELETE FROM notifications WHERE recipient_id = ?1",
                &[Value::Text(recipient_id.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))
    }

    /// Count a recipient's unread notifications.
    pub fn unread_count(&self, recipient_id: &str) -> Result<i64, SocialError> {
        let rows = self
            .sql
            .query(
                "SELECT COUNT(*) as cnt FROM notifications
                 WHERE recipient_id = ?1 AND status = 0",
                &[Value::Text(recipient_id.to_string())],
            )
            .map_err(|e| SocialError::Storage(e.to_string()))?;
        Ok(rows.first().and_then(|r| r.get_i64("cnt")).unwrap_or(0))
    }
}
