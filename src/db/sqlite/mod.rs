//! SQLite implementation of the database traits.
//!
//! This module provides a SQLx-backed implementation of the repository
//! traits defined in the parent module.

mod comment;
mod connection;
mod customer;
mod user;

#[cfg(test)]
mod user_test;

pub use comment::SqliteCommentRepository;
pub use connection::SqliteDatabase;
pub use customer::SqliteCustomerRepository;
pub use user::SqliteUserRepository;
