//! End-to-end request/response cycle
//!
//! One interpretation pass per user message: classify the intent (model
//! first, keyword fallback second), generate a conversational reply in an
//! independent model call, decide auto-execution, dispatch, and assemble
//! the response. No error escapes this layer - the worst outcome is an
//! un-executed action with an explanation and a best-effort reply.

use crate::command::{dispatch, should_auto_execute, ExecutionOutcome};
use crate::core::error::Result;
use crate::llm::client::LlmClient;
use crate::llm::context::TaskContext;
use crate::llm::fallback;
use crate::llm::parser::{analyze_message, ActionEnvelope, ActionKind, ActionParameters};
use crate::task::{OwnerId, TaskCounts, TaskStore};
use serde::Serialize;

/// Fixed apology when the reply channel is down; the action pipeline keeps
/// working independently of it
const APOLOGY_REPLY: &str =
    "Maaf, terjadi kesalahan saat menghubungi layanan AI. Silakan coba lagi nanti.";

/// Everything a single interpretation produces
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope {
    /// Conversational reply, always present (degrades to an apology)
    pub reply: String,
    /// Classified intent and extracted parameters
    pub actions: ActionEnvelope,
    /// Policy decision for this request
    pub auto_execute: bool,
    /// Whether the action was actually dispatched
    pub executed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_result: Option<ExecutionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_error: Option<String>,
    /// Task counts AFTER any dispatch, so they reflect the action taken
    pub context: TaskCounts,
}

/// Composes extraction, policy, dispatch, and reply generation
pub struct Orchestrator<S: TaskStore> {
    llm: Option<LlmClient>,
    store: S,
}

impl<S: TaskStore> Orchestrator<S> {
    /// `llm: None` runs the assistant in degraded mode: keyword
    /// classification and apology replies, actions still executed.
    pub fn new(llm: Option<LlmClient>, store: S) -> Self {
        Self { llm, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Interpret one user message and run the resulting action if policy
    /// allows. `locale` is a hint carried for the reply channel; the
    /// fallback keyword table covers the product's locales regardless.
    pub async fn interpret(
        &mut self,
        message: &str,
        owner: OwnerId,
        locale: &str,
        auto_execute_preference: bool,
    ) -> ResponseEnvelope {
        tracing::debug!(owner = owner.0, locale, "interpreting message");

        // Intent classification and reply generation are independent model
        // calls; either can fail without taking the other down.
        let actions = match &self.llm {
            Some(client) => analyze_message(client, message).await,
            None => fallback::classify(message),
        };

        let reply = self.generate_reply(message, owner).await;

        let auto_execute = should_auto_execute(&actions, auto_execute_preference);

        let mut executed = false;
        let mut execution_result = None;
        let mut execution_error = None;
        if auto_execute && actions.actionable {
            match dispatch(&mut self.store, owner, actions.kind, &actions.parameters) {
                Ok(outcome) => {
                    executed = true;
                    execution_result = Some(outcome);
                }
                Err(e) => {
                    tracing::warn!(kind = actions.kind.as_str(), "dispatch failed: {e}");
                    execution_error = Some(e.to_string());
                }
            }
        }

        // Counts are snapshotted after dispatch on purpose.
        let context = TaskCounts::from_tasks(&self.store.list(owner));

        ResponseEnvelope {
            reply,
            actions,
            auto_execute,
            executed,
            execution_result,
            execution_error,
            context,
        }
    }

    /// Run a known action directly, bypassing classification
    ///
    /// For callers that already decided what to do (confirmation dialogs,
    /// structured API requests).
    pub fn execute_action(
        &mut self,
        kind: ActionKind,
        parameters: &ActionParameters,
        owner: OwnerId,
    ) -> Result<ExecutionOutcome> {
        dispatch(&mut self.store, owner, kind, parameters)
    }

    async fn generate_reply(&self, message: &str, owner: OwnerId) -> String {
        let Some(client) = &self.llm else {
            return APOLOGY_REPLY.to_string();
        };

        let tasks = self.store.list(owner);
        let context = TaskContext::new(&tasks).summary();
        match client.generate(message, &context).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!("reply generation failed: {e}");
                APOLOGY_REPLY.to_string()
            }
        }
    }
}
