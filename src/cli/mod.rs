mod commands;
pub mod error;
mod utils;


#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DatabaseConfig;
use crate::db::{Database, SqliteDatabase};
use commands::customer::NewCustomer;
use error::CliResult;

#[derive(Parser)]
#[command(name = "sqlt")]
#[command(author, version, about = "Relational database access walkthrough", long_about = None)]
pub struct Cli {
    /// Database file (default: SQLT_DB env or ~/.local/share/sqlt/<schema>.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Fail instead of creating the database file when it does not exist
    #[arg(long, global = true)]
    pub no_create: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the schema
    Migrate,
    /// Check that the database answers
    Ping,
    /// Comment commands
    Comment {
        #[command(subcommand)]
        command: CommentCommands,
    },
    /// Customer commands
    Customer {
        #[command(subcommand)]
        command: CustomerCommands,
    },
    /// Check a username/password pair
    Login { username: String, password: String },
}

#[derive(Subcommand)]
enum CommentCommands {
    /// Insert a comment
    Add {
        #[arg(long)]
        email: String,
        #[arg(long)]
        text: String,
    },
    /// Show a comment by id
    Get {
        id: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// List all comments
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Insert generated comments
    Seed {
        #[arg(long, default_value = "10")]
        count: usize,
        /// Insert inside one transaction instead of one prepared statement
        #[arg(long)]
        atomic: bool,
    },
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Insert a customer
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "0")]
        balance: i32,
        #[arg(long, default_value = "0")]
        rating: f64,
        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<NaiveDate>,
        #[arg(long)]
        married: bool,
    },
    /// List all customers
    List {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sql_tour=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// `ping` must report on the database as found and `migrate` runs the
/// migration itself; every other command expects the schema in place.
fn needs_schema(command: &Commands) -> bool {
    !matches!(command, Commands::Migrate | Commands::Ping)
}

async fn open_database(
    path: Option<PathBuf>,
    create_if_missing: bool,
    apply_schema: bool,
) -> CliResult<SqliteDatabase> {
    let mut config = match path {
        Some(path) => DatabaseConfig::with_path(path),
        None => DatabaseConfig::from_env()?,
    };
    config.create_if_missing = create_if_missing;

    if create_if_missing
        && let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    debug!(path = %config.path.display(), create_if_missing, "opening database");
    let db = SqliteDatabase::open(&config).await?;
    if apply_schema {
        db.migrate().await?;
    }
    Ok(db)
}

async fn dispatch<D: Database>(db: &D, command: Commands) -> CliResult<String> {
    match command {
        Commands::Migrate => commands::system::migrate(db).await,
        Commands::Ping => commands::system::ping(db).await,
        Commands::Comment { command } => match command {
            CommentCommands::Add { email, text } => {
                commands::comment::add_comment(db, &email, &text).await
            }
            CommentCommands::Get { id, format } => {
                commands::comment::get_comment(db, id, &format).await
            }
            CommentCommands::List { format } => {
                commands::comment::list_comments(db, &format).await
            }
            CommentCommands::Seed { count, atomic } => {
                commands::comment::seed_comments(db, count, atomic).await
            }
        },
        Commands::Customer { command } => match command {
            CustomerCommands::Add {
                id,
                name,
                email,
                balance,
                rating,
                birth_date,
                married,
            } => {
                let new = NewCustomer {
                    id,
                    name,
                    email,
                    balance,
                    rating,
                    birth_date,
                    married,
                };
                commands::customer::add_customer(db, new).await
            }
            CustomerCommands::List { format } => {
                commands::customer::list_customers(db, &format).await
            }
        },
        Commands::Login { username, password } => {
            commands::login::login(db, &username, &password).await
        }
    }
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        let _ = Cli::parse_from(["sqlt", "--help"]);
        return Ok(());
    };

    init_tracing();

    let apply_schema = needs_schema(&command);
    let db = open_database(cli.db, !cli.no_create, apply_schema).await?;
    let result = dispatch(&db, command).await;
    db.close().await;

    println!("{}", result?);
    Ok(())
}
