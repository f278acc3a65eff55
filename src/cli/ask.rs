use anyhow::Result;

use crate::chat::Adapter;
use crate::core::AppConfig;

pub async fn run(config: AppConfig, mode: &str, message: &str) -> Result<()> {
    let adapter = Adapter::from_config(&config);
    let resp = adapter.complete(message, &[], mode).await?;

    tracing::debug!("Used {} tokens", resp.total_tokens);
    println!("{}", resp.answer);

    Ok(())
}
