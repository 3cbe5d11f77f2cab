//! Remote provider integration and the rule-based fallback responder.

pub mod azure_openai_transport;
pub mod fallback;
pub mod gateway;
pub mod system_prompt;
pub mod transport;

pub use azure_openai_transport::AzureOpenAiTransport;
pub use fallback::{classify, respond, respond_to_category, respond_to_input};
pub use gateway::{ProviderClient, RelayGateway};
pub use system_prompt::build_system_prompt;
pub use transport::{CompletionTransport, ProviderRequest, TransportResponse};
