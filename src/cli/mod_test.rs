use clap::{CommandFactory, Parser};

use super::{Cli, Commands, CommentCommands, CustomerCommands, dispatch, needs_schema, open_database};
use crate::cli::error::CliError;
use crate::db::{Database, DbError, SqliteDatabase};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

fn parse(args: &[&str]) -> Commands {
    Cli::try_parse_from(args)
        .expect("Arguments should parse")
        .command
        .expect("A subcommand should be present")
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_global_db_flag_parses_after_subcommand() {
    let cli = Cli::try_parse_from(["sqlt", "ping", "--db", "/tmp/x.db"]).unwrap();
    assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/x.db")));
}

#[test]
fn test_no_create_flag_parses() {
    let cli = Cli::try_parse_from(["sqlt", "--no-create", "ping"]).unwrap();
    assert!(cli.no_create);
    let cli = Cli::try_parse_from(["sqlt", "ping"]).unwrap();
    assert!(!cli.no_create);
}

#[test]
fn test_ping_and_migrate_skip_auto_migration() {
    assert!(!needs_schema(&parse(&["sqlt", "ping"])));
    assert!(!needs_schema(&parse(&["sqlt", "migrate"])));
    assert!(needs_schema(&parse(&["sqlt", "comment", "list"])));
    assert!(needs_schema(&parse(&["sqlt", "login", "a", "b"])));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_unknown_database_without_create_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("unknown.db");

    let err = match open_database(Some(path.clone()), false, false).await {
        Ok(_) => panic!("Missing database should not be created"),
        Err(e) => e,
    };

    match &err {
        CliError::Database(db_err @ DbError::Connection { .. }) => {
            assert!(db_err.is_retryable());
        }
        other => panic!("expected connection error, got {other:?}"),
    }
    assert!(!path.exists());
    assert!(!dir.path().join("nested").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_open_existing_database_without_create_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tour.db");

    let db = open_database(Some(path.clone()), true, true)
        .await
        .expect("First open should create the file");
    db.close().await;

    let db = open_database(Some(path), false, false)
        .await
        .expect("Existing file should open without create");
    db.ping().await.expect("Ping should succeed");
    db.close().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ping_does_not_create_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bare.db");

    let db = open_database(Some(path), true, false).await.unwrap();
    let output = dispatch(&db, parse(&["sqlt", "ping"])).await.unwrap();
    assert_eq!(output, "✓ Connection OK");

    let tables: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'comments'",
    )
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!(tables, 0);
    db.close().await;
}

#[test]
fn test_seed_defaults_to_ten_prepared_rows() {
    match parse(&["sqlt", "comment", "seed"]) {
        Commands::Comment {
            command: CommentCommands::Seed { count, atomic },
        } => {
            assert_eq!(count, 10);
            assert!(!atomic);
        }
        _ => panic!("expected comment seed"),
    }
}

#[test]
fn test_customer_add_parses_birth_date() {
    match parse(&[
        "sqlt", "customer", "add", "--id", "eko", "--name", "Eko", "--birth-date", "1999-09-09",
    ]) {
        Commands::Customer {
            command: CustomerCommands::Add { birth_date, .. },
        } => {
            assert_eq!(birth_date, chrono::NaiveDate::from_ymd_opt(1999, 9, 9));
        }
        _ => panic!("expected customer add"),
    }
}

#[test]
fn test_customer_add_rejects_bad_birth_date() {
    let result = Cli::try_parse_from([
        "sqlt", "customer", "add", "--id", "eko", "--name", "Eko", "--birth-date", "09/09/1999",
    ]);
    assert!(result.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dispatch_add_then_get() {
    let db = setup_db().await;

    let added = dispatch(
        &db,
        parse(&["sqlt", "comment", "add", "--email", "a@b.c", "--text", "hi"]),
    )
    .await
    .expect("Add should succeed");
    assert_eq!(added, "✓ Inserted comment 1");

    let shown = dispatch(&db, parse(&["sqlt", "comment", "get", "1", "--format", "json"]))
        .await
        .expect("Get should succeed");
    assert!(shown.contains("\"comment\": \"hi\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dispatch_login() {
    let db = setup_db().await;
    let output = dispatch(&db, parse(&["sqlt", "login", "admin", "admin"]))
        .await
        .expect("Login should run");
    assert_eq!(output, "✓ Login succeeded for admin");
}
