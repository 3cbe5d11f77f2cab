//! Completion request and result types shared by the gateway and its callers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::message::{ChatTurn, MessageRole};

/// Default output length requested from the provider.
pub const DEFAULT_MAX_TOKENS: u32 = 800;
/// Default sampling temperature requested from the provider.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// One `{role, content}` pair of an outbound completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMessage {
    pub role: MessageRole,
    pub content: String,
}

impl CompletionMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

impl From<&ChatTurn> for CompletionMessage {
    fn from(turn: &ChatTurn) -> Self {
        Self::new(turn.role, turn.content.clone())
    }
}

/// Generation parameters for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl CompletionParams {
    /// Builds params from optional client-supplied values.
    ///
    /// Missing or zero values take the defaults, matching how the relay
    /// treats falsy fields in its request body.
    pub fn from_optional(max_tokens: Option<u32>, temperature: Option<f32>) -> Self {
        let defaults = Self::default();
        Self {
            max_tokens: max_tokens
                .filter(|value| *value > 0)
                .unwrap_or(defaults.max_tokens),
            temperature: temperature
                .filter(|value| *value > 0.0)
                .unwrap_or(defaults.temperature),
        }
    }
}

/// Classified failure of a completion call.
///
/// Every variant is a signal for the caller to use the fallback responder;
/// none of them is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionFailure {
    /// Transport-level failure, including timeouts and cancellation.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// A success status whose body lacks `choices[0].message.content`.
    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),

    /// Remote completion is turned off by configuration.
    #[error("remote completion is disabled")]
    Disabled,
}

impl CompletionFailure {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::InvalidResponseShape(message.into())
    }

    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Upstream { .. } => "upstream",
            Self::InvalidResponseShape(_) => "invalid_response_shape",
            Self::Disabled => "disabled",
        }
    }
}

/// Outcome of a single gateway call.
pub type CompletionResult = std::result::Result<String, CompletionFailure>;
