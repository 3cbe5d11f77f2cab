//! File and environment adapters for Folio.

pub mod config_service;
pub mod json_profile_repository;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::json_profile_repository::JsonProfileRepository;
pub use crate::paths::FolioPaths;
