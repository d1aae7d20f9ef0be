//! Task Agent - natural-language task assistant
//!
//! Free-form user messages are classified into task actions (model-backed
//! with a deterministic keyword fallback), gated by a per-kind
//! auto-execution policy, and dispatched against an owner-scoped task
//! store. Every request produces a conversational reply whether or not an
//! action was taken.

pub mod command;
pub mod core;
pub mod llm;
pub mod orchestrator;
pub mod task;

pub use crate::core::error::{AgentError, Result};
pub use crate::llm::parser::{ActionEnvelope, ActionKind, ActionParameters};
pub use crate::orchestrator::{Orchestrator, ResponseEnvelope};
pub use crate::task::{MemoryTaskStore, OwnerId, Task, TaskId, TaskStore};
