//! Action dispatch - one store call per classified action
//!
//! Resolver and store failures are returned as values and end up in the
//! response's `execution_error` field; nothing here panics or propagates
//! past the orchestrator.

use crate::command::resolver::resolve_target;
use crate::core::error::{AgentError, Result};
use crate::llm::parser::{ActionKind, ActionParameters};
use crate::task::{OwnerId, Task, TaskChanges, TaskStatistics, TaskStore};
use serde::Serialize;

/// What an executed action produced
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ExecutionOutcome {
    Task(Task),
    Tasks(Vec<Task>),
    Deleted(bool),
    Statistics(TaskStatistics),
}

/// Execute one action against the store on behalf of `owner`
pub fn dispatch<S: TaskStore>(
    store: &mut S,
    owner: OwnerId,
    kind: ActionKind,
    params: &ActionParameters,
) -> Result<ExecutionOutcome> {
    match kind {
        ActionKind::CreateTask => create_task(store, owner, params),
        ActionKind::ListTasks => Ok(ExecutionOutcome::Tasks(store.list(owner))),
        ActionKind::UpdateTask => update_task(store, owner, params),
        ActionKind::DeleteTask => delete_task(store, owner, params),
        ActionKind::CompleteTask => complete_task(store, owner, params),
        ActionKind::SearchTasks => Ok(search_tasks(store, owner, params)),
        ActionKind::GetStatistics => Ok(ExecutionOutcome::Statistics(TaskStatistics::from_tasks(
            &store.list(owner),
        ))),
        ActionKind::None => Err(AgentError::UnknownAction(kind.as_str().into())),
    }
}

fn create_task<S: TaskStore>(
    store: &mut S,
    owner: OwnerId,
    params: &ActionParameters,
) -> Result<ExecutionOutcome> {
    let title = params
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AgentError::InvalidParameters("a title is required to create a task".into())
        })?;

    let task = store.create(owner, title, params.description.as_deref());
    tracing::info!(id = %task.id, "created task");
    Ok(ExecutionOutcome::Task(task))
}

fn update_task<S: TaskStore>(
    store: &mut S,
    owner: OwnerId,
    params: &ActionParameters,
) -> Result<ExecutionOutcome> {
    let id = resolve_target(params, &store.list(owner))?;
    let changes = TaskChanges {
        title: params.title.clone(),
        description: params.description.clone(),
        completed: params.completed,
    };
    store
        .update(owner, id, &changes)
        .map(ExecutionOutcome::Task)
        .ok_or_else(|| AgentError::TargetNotFound(id.to_string()))
}

fn delete_task<S: TaskStore>(
    store: &mut S,
    owner: OwnerId,
    params: &ActionParameters,
) -> Result<ExecutionOutcome> {
    let id = resolve_target(params, &store.list(owner))?;
    if store.delete(owner, id) {
        tracing::info!(id = %id, "deleted task");
        Ok(ExecutionOutcome::Deleted(true))
    } else {
        Err(AgentError::TargetNotFound(id.to_string()))
    }
}

fn complete_task<S: TaskStore>(
    store: &mut S,
    owner: OwnerId,
    params: &ActionParameters,
) -> Result<ExecutionOutcome> {
    let id = resolve_target(params, &store.list(owner))?;
    // Toggle, not set-to-true: completing an already-done task re-opens it.
    store
        .toggle_complete(owner, id)
        .map(ExecutionOutcome::Task)
        .ok_or_else(|| AgentError::TargetNotFound(id.to_string()))
}

fn search_tasks<S: TaskStore>(
    store: &S,
    owner: OwnerId,
    params: &ActionParameters,
) -> ExecutionOutcome {
    let all = store.list(owner);

    // search_term is the query; title doubles as one when the model put the
    // keywords there instead.
    let query = params
        .search_term
        .as_deref()
        .or(params.title.as_deref())
        .map(str::trim)
        .filter(|q| !q.is_empty());

    let Some(query) = query else {
        return ExecutionOutcome::Tasks(all);
    };

    let query = query.to_lowercase();
    let hits = all
        .into_iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&query)
                || t.description
                    .as_deref()
                    .map(|d| d.to_lowercase().contains(&query))
                    .unwrap_or(false)
        })
        .collect();
    ExecutionOutcome::Tasks(hits)
}
