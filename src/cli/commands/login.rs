use crate::cli::error::CliResult;
use crate::db::{Database, UserRepository};

/// Check credentials with a parameterized query
pub async fn login<D: Database>(db: &D, username: &str, password: &str) -> CliResult<String> {
    match db.users().authenticate(username, password).await? {
        Some(user) => Ok(format!("✓ Login succeeded for {}", user)),
        None => Ok(format!("✗ Login failed for {}", username)),
    }
}
