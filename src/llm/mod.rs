//! Natural-language understanding: model client, intent extraction, and the
//! deterministic keyword fallback

pub mod client;
pub mod context;
pub mod fallback;
pub mod fields;
pub mod parser;

pub use client::LlmClient;
pub use context::TaskContext;
pub use parser::{ActionEnvelope, ActionKind, ActionParameters};
