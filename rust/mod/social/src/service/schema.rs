use plaza_sql::SQLStore;

use crate::service::SocialError;

/// Initialize the SQLite schema for all social resources.
///
/// Every table carries the full document in `data` (JSON) plus the
/// columns the service filters, orders, or bulk-updates on.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), SocialError> {
    let statements = [
        // Users: identity + denormalized follower count.
        "CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            display_name TEXT NOT NULL,
            followers INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_users_name ON users(display_name)",

        // Posts: user-authored. `trend` and `is_old` are bulk-updated by
        // the decay job, so they must be real columns, not just JSON fields.
        "CREATE TABLE IF NOT EXISTS posts (
            id TEXT PRIMARY KEY,
            author_id TEXT NOT NULL,
            community TEXT NOT NULL DEFAULT '',
            like_count INTEGER NOT NULL DEFAULT 0,
            comment_count INTEGER NOT NULL DEFAULT 0,
            trend REAL NOT NULL DEFAULT 0,
            is_old INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_posts_author ON posts(author_id)",
        "CREATE INDEX IF NOT EXISTS idx_posts_community ON posts(community)",
        "CREATE INDEX IF NOT EXISTS idx_posts_trend ON posts(trend)",

        // AI posts: same shape as posts, separate table.
        "CREATE TABLE IF NOT EXISTS ai_posts (
            id TEXT PRIMARY KEY,
            author_id TEXT NOT NULL,
            community TEXT NOT NULL DEFAULT '',
            like_count INTEGER NOT NULL DEFAULT 0,
            comment_count INTEGER NOT NULL DEFAULT 0,
            trend REAL NOT NULL DEFAULT 0,
            is_old INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_ai_posts_trend ON ai_posts(trend)",

        // Comments on posts.
        "CREATE TABLE IF NOT EXISTS comments (
            id TEXT PRIMARY KEY,
            post_id TEXT NOT NULL,
            author_id TEXT NOT NULL,
            likes INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id)",

        // AI characters.
        "CREATE TABLE IF NOT EXISTS characters (
            id TEXT PRIMARY KEY,
            creator_id TEXT NOT NULL,
            like_count INTEGER NOT NULL DEFAULT 0,
            view_count INTEGER NOT NULL DEFAULT 0,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_characters_creator ON characters(creator_id)",

        // Notifications. `status` is 0 = unread, 1 = read. There is no
        // foreign key to users: deleting a user does not cascade here.
        "CREATE TABLE IF NOT EXISTS notifications (
            id TEXT PRIMARY KEY,
            recipient_id TEXT NOT NULL,
            category TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 0,
            time TEXT NOT NULL,
            data TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_notifications_recipient
            ON notifications(recipient_id, status)",
    ];

    for stmt in statements {
        sql.exec(stmt, &[])
            .map_err(|e| SocialError::Storage(e.to_string()))?;
    }

    Ok(())
}
