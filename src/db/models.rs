//! Domain models for the tour database.
//!
//! These models are storage-agnostic. Nullable columns are `Option` fields,
//! decoded once by the repository that reads them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Storage-assigned comment identifier.
pub type CommentId = i64;

/// A comment left by an email address.
///
/// `id` is assigned by the storage engine on insert; any value set by the
/// caller before insert is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub email: String,
    pub comment: String,
}

impl Comment {
    /// Build a comment that has not been stored yet.
    pub fn new(email: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            id: 0,
            email: email.into(),
            comment: comment.into(),
        }
    }
}

/// A customer row. `email` and `birth_date` are nullable in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub balance: i32,
    pub rating: f64,
    pub birth_date: Option<NaiveDate>,
    pub married: bool,
    /// `None` lets the database stamp the insert time.
    pub created_at: Option<NaiveDateTime>,
}

impl Customer {
    /// A customer with only the required columns set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            balance: 0,
            rating: 0.0,
            birth_date: None,
            married: false,
            created_at: None,
        }
    }
}

/// Login credentials stored in the `user` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
}
