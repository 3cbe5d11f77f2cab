//! JSON file-based ProfileRepository implementation.

use async_trait::async_trait;
use folio_core::{FolioError, ProfileRecord, ProfileRepository, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Reads the profile document from a JSON file.
///
/// The file is read on every [`load`](ProfileRepository::load); callers are
/// expected to load once at startup and share the record.
#[derive(Debug, Clone)]
pub struct JsonProfileRepository {
    path: PathBuf,
}

impl JsonProfileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn load(&self) -> Result<ProfileRecord> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(FolioError::not_found(
                "profile",
                self.path.display().to_string(),
            ));
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            FolioError::io(format!(
                "Failed to read profile {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let profile: ProfileRecord = serde_json::from_str(&content)?;
        tracing::info!(
            path = %self.path.display(),
            projects = profile.projects.len(),
            skills = profile.skills.len(),
            "Loaded profile"
        );
        Ok(profile)
    }
}
