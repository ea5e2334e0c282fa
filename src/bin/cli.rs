use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sql_tour::cli::run().await?;
    Ok(())
}
