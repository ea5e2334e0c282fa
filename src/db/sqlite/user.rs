//! SQLite UserRepository implementation.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use crate::db::{DbResult, User, UserRepository};

/// SQLx-backed user repository.
pub struct SqliteUserRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> UserRepository for SqliteUserRepository<'a> {
    async fn create(&self, user: &User) -> DbResult<()> {
        sqlx::query("INSERT INTO user (username, password) VALUES (?, ?)")
            .bind(&user.username)
            .bind(&user.password)
            .execute(self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<String>> {
        // Both values travel as bound parameters; quotes and comment markers stay data.
        let matched: Option<String> = sqlx::query_scalar(
            "SELECT username FROM user WHERE username = ? AND password = ? LIMIT 1",
        )
        .bind(username)
        .bind(password)
        .fetch_optional(self.pool)
        .await?;

        debug!(success = matched.is_some(), "login check");
        Ok(matched)
    }
}
