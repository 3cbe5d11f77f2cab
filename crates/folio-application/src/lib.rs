//! Application layer for Folio.
//!
//! Composes the relay gateway and the fallback responder into a chat
//! service that always produces a reply.

pub mod chat_service;
pub mod conversation;

pub use chat_service::{ChatReply, ChatService, ReplySource};
pub use conversation::Conversation;
