use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to prepare database directory: {source}")]
    #[diagnostic(code(sql_tour::cli::io))]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(sql_tour::cli::output))]
    Output { message: String },
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
