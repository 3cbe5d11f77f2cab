use async_trait::async_trait;
use folio_application::{ChatService, Conversation, ReplySource};
use folio_core::{Category, ChatTurn, CompletionFailure, CompletionParams, ProfileRecord};
use folio_interaction::{
    CompletionTransport, ProviderClient, ProviderRequest, RelayGateway, TransportResponse,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CannedTransport {
    status: u16,
    body: String,
    calls: AtomicUsize,
}

impl CannedTransport {
    fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionTransport for CannedTransport {
    async fn send(&self, _request: &ProviderRequest) -> Result<TransportResponse, CompletionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TransportResponse::new(self.status, self.body.clone()))
    }
}

fn profile() -> Arc<ProfileRecord> {
    let mut profile = ProfileRecord::default();
    profile.hero.name = "Hi, I'm Ada".into();
    profile.hero.role = "Engineer".into();
    profile.skills = ["Rust", "Go", "SQL", "Kafka"]
        .into_iter()
        .map(String::from)
        .collect();
    profile.contact.email = "ada@example.com".into();
    Arc::new(profile)
}

fn service_with(transport: Arc<CannedTransport>) -> ChatService {
    let profile = profile();
    let gateway = RelayGateway::new(ProviderClient::new(transport), &profile);
    ChatService::new(gateway, profile).with_seed(11)
}

#[tokio::test]
async fn remote_success_is_returned_verbatim() {
    let transport = CannedTransport::new(
        200,
        r#"{"choices":[{"message":{"role":"assistant","content":"Hello from the model"}}]}"#,
    );
    let service = service_with(transport.clone());

    let reply = service
        .reply(&[], "Tell me about your skills", CompletionParams::default())
        .await;

    assert_eq!(reply.source, ReplySource::Remote);
    assert_eq!(reply.text, "Hello from the model");
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn upstream_error_falls_back_to_profile_reply() {
    let transport = CannedTransport::new(500, r#"{"error":{"message":"boom"}}"#);
    let service = service_with(transport.clone());

    let reply = service
        .reply(&[], "Tell me about your skills", CompletionParams::default())
        .await;

    assert_eq!(reply.source, ReplySource::Fallback);
    assert!(!reply.text.trim().is_empty());
    assert!(reply.text.contains("Rust"));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn empty_body_falls_back() {
    let transport = CannedTransport::new(200, "{}");
    let service = service_with(transport);

    let reply = service
        .reply(&[], "What's your email?", CompletionParams::default())
        .await;

    assert_eq!(reply.source, ReplySource::Fallback);
    assert!(reply.text.contains("[ada@example.com](mailto:ada@example.com)"));
}

#[tokio::test]
async fn disabled_gateway_makes_no_calls() {
    let transport = CannedTransport::new(200, "{}");
    let profile = profile();
    let gateway =
        RelayGateway::new(ProviderClient::new(transport.clone()), &profile).with_remote_enabled(false);
    let service = ChatService::new(gateway, profile);

    let reply = service
        .reply(&[ChatTurn::user("hi")], "Who are you?", CompletionParams::default())
        .await;

    assert_eq!(reply.source, ReplySource::Fallback);
    assert!(!reply.text.is_empty());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn blank_message_skips_remote() {
    let transport = CannedTransport::new(200, "{}");
    let service = service_with(transport.clone());

    let reply = service.reply(&[], "   ", CompletionParams::default()).await;

    assert_eq!(reply.source, ReplySource::Fallback);
    assert_eq!(reply.text, "Hi, I'm Ada.");
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn send_appends_both_turns() {
    let transport = CannedTransport::new(503, "");
    let service = service_with(transport);
    let mut conversation = Conversation::new(service.profile());

    let reply = service
        .send(&mut conversation, "Where did you study?", CompletionParams::default())
        .await;

    assert_eq!(conversation.len(), 3);
    assert_eq!(conversation.turns()[1].content, "Where did you study?");
    assert_eq!(conversation.turns()[2].content, reply.text);
}

#[tokio::test]
async fn category_falls_back_to_markdown_sections() {
    let transport = CannedTransport::new(500, "");
    let service = service_with(transport.clone());

    let reply = service.category(Category::Skills).await;

    assert_eq!(reply.source, ReplySource::Fallback);
    assert!(reply.text.starts_with("### Skills & Expertise"));
    assert_eq!(transport.call_count(), 1);
}
