//! SQLite CommentRepository implementation.

use futures_util::TryStreamExt;
use futures_util::stream::{BoxStream, StreamExt};
use sqlx::{Executor, SqliteConnection, SqlitePool, Statement};
use tracing::{debug, instrument, warn};

use crate::db::{Comment, CommentId, CommentRepository, DbError, DbResult};

const INSERT_COMMENT: &str = "INSERT INTO comments (email, comment) VALUES (?, ?)";
const SELECT_COMMENTS: &str = "SELECT id, email, comment FROM comments ORDER BY id";

/// SQLx-backed comment repository.
pub struct SqliteCommentRepository<'a> {
    pub(crate) pool: &'a SqlitePool,
}

impl<'a> CommentRepository for SqliteCommentRepository<'a> {
    #[instrument(skip_all, fields(email = %comment.email))]
    async fn insert(&self, comment: &Comment) -> DbResult<CommentId> {
        let result = sqlx::query(INSERT_COMMENT)
            .bind(&comment.email)
            .bind(&comment.comment)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(id, "inserted comment");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CommentId) -> DbResult<Comment> {
        sqlx::query_as::<_, Comment>("SELECT id, email, comment FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Comment", id))
    }

    async fn find_all(&self) -> DbResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(SELECT_COMMENTS)
            .fetch_all(self.pool)
            .await?;
        Ok(comments)
    }

    fn stream_all(&self) -> BoxStream<'_, DbResult<Comment>> {
        sqlx::query_as::<_, Comment>(SELECT_COMMENTS)
            .fetch(self.pool)
            .map_err(DbError::from)
            .boxed()
    }

    async fn count(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(self.pool)
            .await?;
        Ok(total)
    }

    #[instrument(skip_all, fields(rows = comments.len()))]
    async fn insert_prepared(&self, comments: &[Comment]) -> DbResult<Vec<CommentId>> {
        // The statement is bound to the connection that prepared it.
        let mut conn = self.pool.acquire().await?;
        let statement = (&mut *conn).prepare(INSERT_COMMENT).await?;

        let mut ids = Vec::with_capacity(comments.len());
        for comment in comments {
            let result = statement
                .query()
                .bind(comment.email.as_str())
                .bind(comment.comment.as_str())
                .execute(&mut *conn)
                .await?;
            ids.push(result.last_insert_rowid());
        }

        debug!(inserted = ids.len(), "prepared insert finished");
        Ok(ids)
    }

    #[instrument(skip_all, fields(rows = comments.len()))]
    async fn insert_batch(&self, comments: &[Comment]) -> DbResult<Vec<CommentId>> {
        if comments.is_empty() {
            return Ok(vec![]);
        }

        let mut tx = self.pool.begin().await?;

        match insert_each(&mut tx, comments).await {
            Ok(ids) => {
                tx.commit().await?;
                debug!(inserted = ids.len(), "batch committed");
                Ok(ids)
            }
            Err(e) => {
                warn!(error = %e, "batch failed, rolling back");
                // The statement error is the one the caller needs to see.
                if let Err(rb) = tx.rollback().await {
                    warn!(error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

async fn insert_each(conn: &mut SqliteConnection, comments: &[Comment]) -> DbResult<Vec<CommentId>> {
    let mut ids = Vec::with_capacity(comments.len());
    for comment in comments {
        let result = sqlx::query(INSERT_COMMENT)
            .bind(&comment.email)
            .bind(&comment.comment)
            .execute(&mut *conn)
            .await?;
        ids.push(result.last_insert_rowid());
    }
    Ok(ids)
}
