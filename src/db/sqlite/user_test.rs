//! Tests for SqliteUserRepository, including the injection contrast.

use sqlx::SqlitePool;

use crate::db::{Database, DbError, SqliteDatabase, User, UserRepository};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

/// Login check built by string concatenation. Never do this outside a test:
/// it exists to prove the parameterized path is not exploitable the same way.
async fn concatenated_login(pool: &SqlitePool, username: &str, password: &str) -> Option<String> {
    let sql = format!(
        "SELECT username FROM user WHERE username = '{}' AND password = '{}' LIMIT 1",
        username, password
    );
    sqlx::query_scalar(&sql)
        .fetch_optional(pool)
        .await
        .expect("Concatenated query should still be valid SQL")
}

#[tokio::test(flavor = "multi_thread")]
async fn seeded_admin_can_log_in() {
    let db = setup_db().await;

    let user = db
        .users()
        .authenticate("admin", "admin")
        .await
        .expect("Login check should succeed");

    assert_eq!(user.as_deref(), Some("admin"));
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_fails_login() {
    let db = setup_db().await;

    let user = db
        .users()
        .authenticate("admin", "salah")
        .await
        .expect("Login check should succeed");

    assert_eq!(user, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn created_user_can_log_in() {
    let db = setup_db().await;
    let users = db.users();

    users
        .create(&User {
            username: "eko".to_string(),
            password: "rahasia".to_string(),
        })
        .await
        .expect("Create should succeed");

    let user = users
        .authenticate("eko", "rahasia")
        .await
        .expect("Login check should succeed");
    assert_eq!(user.as_deref(), Some("eko"));
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicate_username_is_constraint_violation() {
    let db = setup_db().await;

    let err = db
        .users()
        .create(&User {
            username: "admin".to_string(),
            password: "other".to_string(),
        })
        .await
        .expect_err("Duplicate username should fail");

    assert!(matches!(err, DbError::Constraint { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_marker_in_username_is_exploitable_when_concatenated() {
    let db = setup_db().await;

    let user = concatenated_login(db.pool(), "admin' --", "salah").await;

    assert_eq!(
        user.as_deref(),
        Some("admin"),
        "concatenation lets the comment marker skip the password check"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_marker_in_username_is_data_when_parameterized() {
    let db = setup_db().await;

    let user = db
        .users()
        .authenticate("admin' --", "salah")
        .await
        .expect("Login check should succeed");

    assert_eq!(user, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn tautology_in_password_is_exploitable_when_concatenated() {
    let db = setup_db().await;

    let user = concatenated_login(db.pool(), "nobody", "' OR '1'='1").await;

    assert!(user.is_some(), "OR '1'='1' should match every row");
}

#[tokio::test(flavor = "multi_thread")]
async fn tautology_in_password_is_data_when_parameterized() {
    let db = setup_db().await;

    let user = db
        .users()
        .authenticate("nobody", "' OR '1'='1")
        .await
        .expect("Login check should succeed");

    assert_eq!(user, None);
}

#[tokio::test(flavor = "multi_thread")]
async fn quoted_credentials_round_trip_through_parameters() {
    let db = setup_db().await;
    let users = db.users();

    users
        .create(&User {
            username: "o'brien".to_string(),
            password: "pa'ss; DROP TABLE user".to_string(),
        })
        .await
        .expect("Create should succeed");

    let user = users
        .authenticate("o'brien", "pa'ss; DROP TABLE user")
        .await
        .expect("Login check should succeed");
    assert_eq!(user.as_deref(), Some("o'brien"));
}
