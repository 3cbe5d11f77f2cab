use anyhow::{Context, Result};
use folio_application::ChatService;
use folio_core::{ProfileRecord, ProfileRepository, RelayConfig};
use folio_infrastructure::{ConfigService, JsonProfileRepository};
use folio_interaction::RelayGateway;
use std::path::PathBuf;
use std::sync::Arc;

pub mod ask;
pub mod category;
pub mod classify;
pub mod serve;

/// Flags shared by every subcommand.
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub profile: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn load_config(&self) -> Result<RelayConfig> {
        let service = match &self.config {
            Some(path) => ConfigService::with_config_file(path),
            None => ConfigService::new(),
        };
        let mut config = service.load().context("Failed to load configuration")?;
        if let Some(profile) = &self.profile {
            config.profile_path = profile.clone();
        }
        Ok(config)
    }
}

pub async fn load_profile(config: &RelayConfig) -> Result<Arc<ProfileRecord>> {
    let profile = JsonProfileRepository::new(&config.profile_path)
        .load()
        .await
        .with_context(|| format!("Failed to load profile from {}", config.profile_path.display()))?;
    Ok(Arc::new(profile))
}

/// Builds the chat service; `offline` keeps the remote provider out of it.
pub async fn chat_service(options: &GlobalOptions, offline: bool) -> Result<ChatService> {
    let config = options.load_config()?;
    let profile = load_profile(&config).await?;
    let gateway = if offline {
        RelayGateway::disabled(&profile)
    } else {
        RelayGateway::from_config(&config, &profile).context("Failed to build relay gateway")?
    };
    Ok(ChatService::new(gateway, profile))
}
