//! Profile repository trait.
//!
//! Defines the interface for loading the static profile document.

use super::model::ProfileRecord;
use crate::error::Result;

/// An abstract source of the profile document.
///
/// The profile is read once at startup and never written back; this trait
/// only decouples where it lives (JSON file, embedded asset, test fixture)
/// from the code that consumes it.
#[async_trait::async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the profile document.
    ///
    /// # Returns
    ///
    /// - `Ok(ProfileRecord)`: The parsed profile
    /// - `Err(FolioError)`: The document is missing or malformed
    async fn load(&self) -> Result<ProfileRecord>;
}
