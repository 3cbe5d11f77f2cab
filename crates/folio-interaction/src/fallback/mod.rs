//! Fallback responder: network-free replies built from the profile record.
//!
//! Used whenever the relay gateway reports a failure or is disabled. All
//! entry points are total and return non-empty text.

pub mod category;
pub mod classifier;
pub mod responder;

pub use category::{pick_highlight_skills, respond_to_category};
pub use classifier::{classify, keywords};
pub use responder::{respond, respond_to_input};
