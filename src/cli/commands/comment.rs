use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use crate::db::{Comment, CommentRepository, Database};
use tabled::{Table, Tabled};

#[derive(Tabled)]
pub(crate) struct CommentDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Email")]
    pub(crate) email: String,
    #[tabled(rename = "Comment")]
    pub(crate) comment: String,
}

impl From<&Comment> for CommentDisplay {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            email: comment.email.clone(),
            comment: truncate_with_ellipsis(&comment.comment, 60),
        }
    }
}

/// Insert one comment
pub async fn add_comment<D: Database>(db: &D, email: &str, text: &str) -> CliResult<String> {
    let id = db.comments().insert(&Comment::new(email, text)).await?;
    Ok(format!("✓ Inserted comment {}", id))
}

/// Show one comment by id
pub async fn get_comment<D: Database>(db: &D, id: i64, format: &str) -> CliResult<String> {
    let comment = db.comments().find_by_id(id).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&comment)?),
        _ => Ok(format_table(std::slice::from_ref(&comment))),
    }
}

/// List every comment
pub async fn list_comments<D: Database>(db: &D, format: &str) -> CliResult<String> {
    let comments = db.comments().find_all().await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&comments)?),
        _ => Ok(format_table(&comments)),
    }
}

/// Insert `count` generated comments, either through one prepared statement
/// or atomically inside a transaction.
pub async fn seed_comments<D: Database>(db: &D, count: usize, atomic: bool) -> CliResult<String> {
    let comments: Vec<Comment> = (0..count)
        .map(|i| Comment::new(format!("user{}@example.com", i), format!("Comment number {}", i)))
        .collect();

    let repo = db.comments();
    let ids = if atomic {
        repo.insert_batch(&comments).await?
    } else {
        repo.insert_prepared(&comments).await?
    };

    let mode = if atomic { "transaction" } else { "prepared statement" };
    match (ids.first(), ids.last()) {
        (Some(first), Some(last)) => Ok(format!(
            "✓ Inserted {} comments via {} (ids {}..={})",
            ids.len(),
            mode,
            first,
            last
        )),
        _ => Ok("No comments inserted.".to_string()),
    }
}

pub(crate) fn format_table(comments: &[Comment]) -> String {
    if comments.is_empty() {
        return "No comments found.".to_string();
    }

    let display: Vec<CommentDisplay> = comments.iter().map(|c| c.into()).collect();
    let mut table = Table::new(display);
    apply_table_style(&mut table);
    table.to_string()
}
