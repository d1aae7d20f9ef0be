//! Auto-execution policy
//!
//! Pure decision function over a classified action: execute immediately,
//! or fall back to the caller's confirmation preference. Destructive or
//! ambiguous actions need a sufficiently specific target; read-only actions
//! are always safe; creation only needs a non-empty title since it has no
//! wrong-target risk.

use crate::llm::parser::{ActionEnvelope, ActionKind};

/// Minimum trimmed title length (in chars) considered specific enough to
/// target a task without confirmation
const MIN_SPECIFIC_TITLE: usize = 3;

/// Decide whether an action may run without explicit confirmation
pub fn should_auto_execute(envelope: &ActionEnvelope, user_preference: bool) -> bool {
    if !envelope.actionable {
        tracing::debug!("auto-execute denied: not actionable");
        return false;
    }

    let params = &envelope.parameters;
    let title_is_specific = params
        .title
        .as_deref()
        .map(|t| t.trim().chars().count() >= MIN_SPECIFIC_TITLE)
        .unwrap_or(false);

    let decision = match envelope.kind {
        ActionKind::CreateTask => params
            .title
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false),

        // Read-only, safe to run every time.
        ActionKind::ListTasks | ActionKind::GetStatistics => true,

        ActionKind::DeleteTask | ActionKind::CompleteTask => {
            params.id.is_some() || title_is_specific || user_preference
        }

        ActionKind::UpdateTask => {
            params.id.is_some()
                || params.title_reference.is_some()
                || title_is_specific
                || user_preference
        }

        // search_tasks and anything else defer to the user's preference.
        ActionKind::SearchTasks | ActionKind::None => user_preference,
    };

    tracing::debug!(
        kind = envelope.kind.as_str(),
        decision,
        "auto-execute policy"
    );
    decision
}
