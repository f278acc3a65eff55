use anyhow::Result;
use chatmode::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
