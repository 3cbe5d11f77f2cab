//! Chat domain types: conversation turns and completion contracts.

pub mod completion;
pub mod message;

pub use completion::{
    CompletionFailure, CompletionMessage, CompletionParams, CompletionResult, DEFAULT_MAX_TOKENS,
    DEFAULT_TEMPERATURE,
};
pub use message::{ChatTurn, MessageRole};
