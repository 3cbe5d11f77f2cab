//! Outbound transport seam for completion providers.

use async_trait::async_trait;
use folio_core::{CompletionFailure, CompletionMessage, CompletionParams};
use serde::Serialize;

const TOP_P: f32 = 0.95;

/// JSON body posted to the completion provider.
///
/// Sampling knobs other than `max_tokens` and `temperature` are fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    pub messages: Vec<CompletionMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub stop: Option<Vec<String>>,
}

impl ProviderRequest {
    pub fn new(messages: Vec<CompletionMessage>, params: CompletionParams) -> Self {
        Self {
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: TOP_P,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: None,
        }
    }
}

/// Raw HTTP outcome, before any shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one provider request and returns the raw response.
///
/// Implementations only report transport failures (as
/// [`CompletionFailure::Network`]); status and body interpretation belong to
/// [`ProviderClient`](crate::gateway::ProviderClient).
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn send(&self, request: &ProviderRequest) -> Result<TransportResponse, CompletionFailure>;
}
