//! Domain types for the Folio portfolio chat relay.
//!
//! This crate has no I/O: it defines conversation turns, the completion
//! contract, the profile record, classification enums and configuration.

pub mod chat;
pub mod config;
pub mod error;
pub mod profile;
pub mod topic;

// Re-export common types
pub use chat::{
    ChatTurn, CompletionFailure, CompletionMessage, CompletionParams, CompletionResult,
    MessageRole,
};
pub use config::RelayConfig;
pub use error::{FolioError, Result};
pub use profile::{ProfileRecord, ProfileRepository};
pub use topic::{Category, Topic};
