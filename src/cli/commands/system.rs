use crate::cli::error::CliResult;
use crate::db::Database;

/// Apply the embedded schema
pub async fn migrate<D: Database>(db: &D) -> CliResult<String> {
    db.migrate().await?;
    Ok("✓ Database migrations complete".to_string())
}

/// Confirm the database answers
pub async fn ping<D: Database>(db: &D) -> CliResult<String> {
    db.ping().await?;
    Ok("✓ Connection OK".to_string())
}
