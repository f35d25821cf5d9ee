//! Language-model integration
//!
//! Provider-neutral chat-completion client. The idea generator talks to it
//! through [`LlmClient`]; providers implement [`providers::LlmProvider`].

pub mod client;
pub mod config;
pub mod error;
pub mod providers;
pub mod types;

pub use client::LlmClient;
pub use config::{LlmConfig, LlmProvider};
pub use error::{LlmError, LlmResult};
pub use types::{LlmRequest, LlmResponse, Message, Role};
