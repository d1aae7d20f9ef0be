//! Render the user's current tasks into chat context
//!
//! The reply channel gets a plain-text snapshot of the task list so the
//! model can answer questions like "mana yang belum selesai?" without any
//! tool access.

use crate::task::Task;

/// Snapshot of a user's tasks for prompt construction
pub struct TaskContext<'a> {
    tasks: &'a [Task],
}

impl<'a> TaskContext<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks }
    }

    /// Generate the context text appended to the chat system prompt
    pub fn summary(&self) -> String {
        let mut s = String::from("Task saat ini:\n");

        if self.tasks.is_empty() {
            s.push_str("- Belum ada task\n");
        } else {
            for task in self.tasks {
                s.push_str(&format!(
                    "- ID: {}, Judul: {}, Status: {}, Deskripsi: {}\n",
                    task.id,
                    task.title,
                    if task.completed { "Selesai" } else { "Pending" },
                    task.description.as_deref().unwrap_or("Tidak ada deskripsi"),
                ));
            }
        }

        s.push_str("\nAnda dapat membantu user dengan:\n");
        s.push_str("- Membuat task baru\n");
        s.push_str("- Menampilkan dan mencari task\n");
        s.push_str("- Mengupdate judul dan deskripsi task\n");
        s.push_str("- Menandai task sebagai selesai atau pending\n");
        s.push_str("- Menghapus task\n");
        s.push_str("- Mendapatkan statistik tentang task\n");

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{OwnerId, TaskId};

    #[test]
    fn test_summary_empty() {
        let summary = TaskContext::new(&[]).summary();
        assert!(summary.contains("Belum ada task"));
        assert!(summary.contains("Membuat task baru"));
    }

    #[test]
    fn test_summary_lists_tasks() {
        let tasks = vec![
            Task {
                id: TaskId(1),
                title: "belajar rust".into(),
                description: Some("bab 4".into()),
                completed: true,
                owner: OwnerId(1),
            },
            Task {
                id: TaskId(2),
                title: "belanja".into(),
                description: None,
                completed: false,
                owner: OwnerId(1),
            },
        ];
        let summary = TaskContext::new(&tasks).summary();
        assert!(summary.contains("ID: 1, Judul: belajar rust, Status: Selesai, Deskripsi: bab 4"));
        assert!(summary.contains("ID: 2, Judul: belanja, Status: Pending, Deskripsi: Tidak ada deskripsi"));
    }
}
