//! Database abstraction layer.
//!
//! This module provides trait-based abstractions for data access. Callers
//! open a concrete database and pass it around explicitly; there is no
//! process-wide connection.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types and driver error classification
//! - `models`: Domain entities (Comment, Customer, User)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod error;
pub mod models;
mod repository;
pub mod sqlite;


pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
