//! SQLite database connection and migration management.

use std::path::Path;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info, instrument};

use super::{SqliteCommentRepository, SqliteCustomerRepository, SqliteUserRepository};
use crate::config::DatabaseConfig;
use crate::db::{Database, DbError, DbResult};

// Embed migrations from data/sql/sqlite/ at compile time
static MIGRATOR: Migrator = sqlx::migrate!("data/sql/sqlite");

/// SQLite database implementation.
///
/// Owns the connection pool. Construct one and pass it to whatever needs
/// database access; repositories borrow the pool from it.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open a database described by `config`.
    #[instrument(skip(config), fields(path = %config.path.display()))]
    pub async fn open(config: &DatabaseConfig) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(config.create_if_missing)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: format!("{}: {}", config.path.display(), e),
            })?;

        info!("opened database");
        Ok(Self { pool })
    }

    /// Open a database file with default pool settings.
    pub async fn open_path<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::open(&DatabaseConfig::with_path(path.as_ref())).await
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every connection to `:memory:` sees its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Direct pool access for statements the repositories don't cover.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every connection in the pool.
    pub async fn close(self) {
        self.pool.close().await;
        debug!("database closed");
    }
}

impl Database for SqliteDatabase {
    type Comments<'a> = SqliteCommentRepository<'a>;
    type Customers<'a> = SqliteCustomerRepository<'a>;
    type Users<'a> = SqliteUserRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;
        debug!("migrations applied");
        Ok(())
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn comments(&self) -> Self::Comments<'_> {
        SqliteCommentRepository { pool: &self.pool }
    }

    fn customers(&self) -> Self::Customers<'_> {
        SqliteCustomerRepository { pool: &self.pool }
    }

    fn users(&self) -> Self::Users<'_> {
        SqliteUserRepository { pool: &self.pool }
    }
}
