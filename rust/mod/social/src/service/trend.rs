use tracing::debug;

use crate::service::{SocialError, SocialService};

/// How much a post's trend score drops per decay tick.
pub const DECAY_STEP: f64 = 0.5;

impl SocialService {
    /// Decay the trend score of every post still trending.
    ///
    /// One conditional bulk UPDATE per table: rows with `trend > 0` lose
    /// [`DECAY_STEP`], floored at 0, and the terminal `old` flag is set
    /// when the floor is reached. The JSON document and the indexed
    /// columns are updated in the same statement. Both the scheduled
    /// worker and the manual admin trigger call this exact routine.
    ///
    /// Returns the total number of posts touched.
    pub fn decay_trends(&self) -> Result<u64, SocialError> {
        let posts = self.decay_table("posts")?;
        let ai_posts = self.decay_table("ai_posts")?;
        debug!(posts, ai_posts, "trend decay tick");
        Ok(posts + ai_posts)
    }

    fn decay_table(&self, table: &str) -> Result<u64, SocialError> {
        // SET expressions see the pre-update row, so every reference to
        // `trend` below is the score before this tick.
        let sql = format!(
            "UPDATE {table}
             SET data = json_set(data,
                     '$.trend', max(trend - ?1, 0.0),
                     '$.old', json(CASE WHEN trend - ?1 <= 0 THEN 'true' ELSE 'false' END)),
                 trend = max(trend - ?1, 0.0),
                 is_old = CASE WHEN trend - ?1 <= 0 THEN 1 ELSE 0 END
             WHERE trend > 0"
        );
        self.sql
            .exec(&sql, &[plaza_sql::Value::Real(DECAY_STEP)])
            .map_err(|e| SocialError::Storage(e.to_string()))
    }
}
