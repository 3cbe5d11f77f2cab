use anyhow::Result;
use folio_core::Category;

use super::{GlobalOptions, chat_service};

pub async fn run(
    options: &GlobalOptions,
    category: Category,
    offline: bool,
    seed: Option<u64>,
) -> Result<()> {
    let mut service = chat_service(options, offline).await?;
    if let Some(seed) = seed {
        service = service.with_seed(seed);
    }
    println!("{} {}\n", category.icon(), category.prompt());
    let reply = service.category(category).await;
    tracing::debug!(source = ?reply.source, "Reply ready");
    println!("{}", reply.text);
    Ok(())
}
