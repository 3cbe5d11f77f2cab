use anyhow::Result;
use folio_core::CompletionParams;

use super::{GlobalOptions, chat_service};

pub async fn run(
    options: &GlobalOptions,
    message: &str,
    offline: bool,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
) -> Result<()> {
    let service = chat_service(options, offline).await?;
    let params = CompletionParams::from_optional(max_tokens, temperature);
    let reply = service.reply(&[], message, params).await;
    tracing::debug!(source = ?reply.source, "Reply ready");
    println!("{}", reply.text);
    Ok(())
}
