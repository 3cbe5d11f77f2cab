use anyhow::{Context, Result};
use folio_server::{RelayState, run_relay};

use super::GlobalOptions;

pub async fn run(options: &GlobalOptions, bind: Option<String>) -> Result<()> {
    let config = options.load_config()?;
    let state = RelayState::from_config(&config).context("Failed to build provider client")?;
    let bind_addr = bind.unwrap_or_else(|| config.bind_addr.clone());
    run_relay(state, &bind_addr).await
}
