//! HTTP relay for Folio: the only component that holds the provider secret.

pub mod relay;

pub use relay::{RelayState, router, run_relay};
