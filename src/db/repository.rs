//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing callers.

use futures_util::stream::BoxStream;

use crate::db::{
    DbResult,
    models::{Comment, CommentId, Customer, User},
};

/// Repository for Comment operations.
pub trait CommentRepository {
    /// Insert a comment and return the id assigned by storage.
    async fn insert(&self, comment: &Comment) -> DbResult<CommentId>;

    /// Get a comment by id.
    async fn find_by_id(&self, id: CommentId) -> DbResult<Comment>;

    /// Get all comments, ordered by id.
    async fn find_all(&self) -> DbResult<Vec<Comment>>;

    /// Stream all comments row by row. The stream cannot be restarted.
    fn stream_all(&self) -> BoxStream<'_, DbResult<Comment>>;

    /// Count stored comments.
    async fn count(&self) -> DbResult<i64>;

    /// Insert comments through a single prepared statement.
    ///
    /// Each row is committed on its own; a failure leaves earlier rows in place.
    async fn insert_prepared(&self, comments: &[Comment]) -> DbResult<Vec<CommentId>>;

    /// Insert comments atomically: all rows become visible, or none do.
    async fn insert_batch(&self, comments: &[Comment]) -> DbResult<Vec<CommentId>>;
}

/// Repository for Customer operations.
pub trait CustomerRepository {
    /// Create a new customer.
    async fn create(&self, customer: &Customer) -> DbResult<()>;

    /// Get a customer by id.
    async fn get(&self, id: &str) -> DbResult<Customer>;

    /// Get all customers, oldest first.
    async fn list(&self) -> DbResult<Vec<Customer>>;
}

/// Repository for User operations.
pub trait UserRepository {
    /// Create a new user.
    async fn create(&self, user: &User) -> DbResult<()>;

    /// Check credentials. Returns the username on success, `None` on a failed login.
    async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<String>>;
}

/// Combined database interface.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub trait Database: Send + Sync {
    type Comments<'a>: CommentRepository
    where
        Self: 'a;
    type Customers<'a>: CustomerRepository
    where
        Self: 'a;
    type Users<'a>: UserRepository
    where
        Self: 'a;

    /// Apply the embedded schema.
    async fn migrate(&self) -> DbResult<()>;

    /// Round-trip a trivial statement to confirm the session is alive.
    async fn ping(&self) -> DbResult<()>;

    /// Get the comment repository.
    fn comments(&self) -> Self::Comments<'_>;

    /// Get the customer repository.
    fn customers(&self) -> Self::Customers<'_>;

    /// Get the user repository.
    fn users(&self) -> Self::Users<'_>;
}
