//! Target resolution - maps action parameters to a concrete task id

use crate::core::error::{AgentError, Result};
use crate::llm::parser::ActionParameters;
use crate::task::{Task, TaskId};

/// Resolve the task an action targets
///
/// A numeric `id` is used directly (existence is the store's concern, not
/// ours). Otherwise the search title is `title_reference` when present, else
/// `title`, matched case-insensitively and EXACTLY against the caller's
/// current task titles; first match in store order wins.
pub fn resolve_target(params: &ActionParameters, tasks: &[Task]) -> Result<TaskId> {
    if let Some(id) = params.id {
        if id < 0 {
            return Err(AgentError::TargetNotFound(id.to_string()));
        }
        return Ok(TaskId(id as u64));
    }

    let search_title = params
        .title_reference
        .as_deref()
        .or(params.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AgentError::MissingTarget("an id or title is required to locate the task".into())
        })?;

    tasks
        .iter()
        .find(|t| t.title.eq_ignore_ascii_case(search_title))
        .map(|t| t.id)
        .ok_or_else(|| AgentError::TargetNotFound(search_title.to_string()))
}
