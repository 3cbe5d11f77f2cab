//! Path resolution for folio configuration files.
//!
//! ```text
//! <config dir>/folio/          # ~/.config/folio on Linux
//! └── config.toml              # Optional relay configuration
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "folio";
const CONFIG_FILE: &str = "config.toml";

pub struct FolioPaths;

impl FolioPaths {
    /// Returns the folio configuration directory, if the platform has one.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    }

    /// Returns the default location of `config.toml`.
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }
}
