//! Task storage behind an owner-scoped interface
//!
//! Every operation is filtered to the calling owner. A foreign owner's task
//! id behaves exactly like a missing id, so callers cannot probe for the
//! existence of other users' tasks.

use crate::task::{OwnerId, Task, TaskId};
use std::collections::HashMap;

/// Partial update for a stored task; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Owner-scoped task storage
pub trait TaskStore {
    /// All tasks for this owner, in insertion order
    fn list(&self, owner: OwnerId) -> Vec<Task>;

    /// Create a new pending task
    fn create(&mut self, owner: OwnerId, title: &str, description: Option<&str>) -> Task;

    /// Apply a partial update; `None` if the id is not this owner's
    fn update(&mut self, owner: OwnerId, id: TaskId, changes: &TaskChanges) -> Option<Task>;

    /// Flip the completion flag; `None` if the id is not this owner's
    fn toggle_complete(&mut self, owner: OwnerId, id: TaskId) -> Option<Task>;

    /// Remove a task, reporting whether anything was removed
    fn delete(&mut self, owner: OwnerId, id: TaskId) -> bool;
}

/// In-memory store with a monotonically increasing id counter
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: HashMap<OwnerId, Vec<Task>>,
    next_id: u64,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            next_id: 1,
        }
    }

    fn owned_mut(&mut self, owner: OwnerId, id: TaskId) -> Option<&mut Task> {
        self.tasks
            .get_mut(&owner)?
            .iter_mut()
            .find(|t| t.id == id)
    }
}

impl TaskStore for MemoryTaskStore {
    fn list(&self, owner: OwnerId) -> Vec<Task> {
        self.tasks.get(&owner).cloned().unwrap_or_default()
    }

    fn create(&mut self, owner: OwnerId, title: &str, description: Option<&str>) -> Task {
        let task = Task {
            id: TaskId(self.next_id),
            title: title.to_string(),
            description: description.map(|d| d.to_string()),
            completed: false,
            owner,
        };
        self.next_id += 1;
        self.tasks.entry(owner).or_default().push(task.clone());
        task
    }

    fn update(&mut self, owner: OwnerId, id: TaskId, changes: &TaskChanges) -> Option<Task> {
        let task = self.owned_mut(owner, id)?;
        if let Some(title) = &changes.title {
            task.title = title.clone();
        }
        if let Some(description) = &changes.description {
            task.description = Some(description.clone());
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        Some(task.clone())
    }

    fn toggle_complete(&mut self, owner: OwnerId, id: TaskId) -> Option<Task> {
        let task = self.owned_mut(owner, id)?;
        task.completed = !task.completed;
        Some(task.clone())
    }

    fn delete(&mut self, owner: OwnerId, id: TaskId) -> bool {
        let Some(tasks) = self.tasks.get_mut(&owner) else {
            return false;
        };
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        tasks.len() < before
    }
}
