//! Chat service: remote completion first, rule-based reply otherwise.
//!
//! Every failure of the relay gateway is logged and answered from the
//! profile, so callers always get non-empty text and never see the error.

use folio_core::{Category, ChatTurn, CompletionFailure, CompletionParams, ProfileRecord};
use folio_interaction::{RelayGateway, respond_to_category, respond_to_input};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::conversation::Conversation;

/// Where a reply came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Fallback,
}

/// The text shown to the visitor for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

impl ChatReply {
    fn remote(text: String) -> Self {
        Self {
            text,
            source: ReplySource::Remote,
        }
    }

    fn fallback(text: String) -> Self {
        Self {
            text,
            source: ReplySource::Fallback,
        }
    }
}

pub struct ChatService {
    gateway: RelayGateway,
    profile: Arc<ProfileRecord>,
    rng: Mutex<StdRng>,
}

impl ChatService {
    pub fn new(gateway: RelayGateway, profile: Arc<ProfileRecord>) -> Self {
        Self {
            gateway,
            profile,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Fixes the random source used for category replies.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn profile(&self) -> &ProfileRecord {
        &self.profile
    }

    pub fn gateway(&self) -> &RelayGateway {
        &self.gateway
    }

    /// Answers `message` given the prior `history`.
    pub async fn reply(
        &self,
        history: &[ChatTurn],
        message: &str,
        params: CompletionParams,
    ) -> ChatReply {
        self.reply_cancellable(history, message, params, &CancellationToken::new())
            .await
    }

    /// Like [`reply`](Self::reply); a fired `cancel` falls back immediately.
    pub async fn reply_cancellable(
        &self,
        history: &[ChatTurn],
        message: &str,
        params: CompletionParams,
        cancel: &CancellationToken,
    ) -> ChatReply {
        let message = message.trim();
        if message.is_empty() {
            return ChatReply::fallback(respond_to_input(message, &self.profile));
        }

        match self
            .gateway
            .complete_cancellable(history, message, params, cancel)
            .await
        {
            Ok(text) => ChatReply::remote(text),
            Err(failure) => {
                log_failure(&failure);
                ChatReply::fallback(respond_to_input(message, &self.profile))
            }
        }
    }

    /// Appends the visitor's message and the reply to `conversation`.
    pub async fn send(
        &self,
        conversation: &mut Conversation,
        message: &str,
        params: CompletionParams,
    ) -> ChatReply {
        let reply = self.reply(conversation.turns(), message, params).await;
        conversation.push(ChatTurn::user(message.trim()));
        conversation.push(ChatTurn::assistant(reply.text.clone()));
        reply
    }

    /// Answers a quick navigation action.
    pub async fn category(&self, category: Category) -> ChatReply {
        match self
            .gateway
            .complete(&[], category.prompt(), CompletionParams::default())
            .await
        {
            Ok(text) => ChatReply::remote(text),
            Err(failure) => {
                log_failure(&failure);
                let mut rng = self.rng.lock().await;
                ChatReply::fallback(respond_to_category(category, &self.profile, &mut *rng))
            }
        }
    }
}

fn log_failure(failure: &CompletionFailure) {
    match failure {
        CompletionFailure::Disabled => {
            tracing::debug!("Remote completion disabled; using fallback responder")
        }
        _ => tracing::warn!(
            kind = failure.kind(),
            error = %failure,
            "Remote completion failed; using fallback responder"
        ),
    }
}
