//! End-to-end interpretation tests on the degraded (model-unavailable) path
//!
//! With no LLM client configured, classification goes through the keyword
//! fallback and the reply degrades to an apology, but actions still resolve
//! and execute against the store.

use task_agent::command::ExecutionOutcome;
use task_agent::orchestrator::Orchestrator;
use task_agent::task::{MemoryTaskStore, OwnerId, TaskStore};
use task_agent::{ActionKind, ActionParameters};

const ALICE: OwnerId = OwnerId(1);
const BOB: OwnerId = OwnerId(2);

fn orchestrator() -> Orchestrator<MemoryTaskStore> {
    Orchestrator::new(None, MemoryTaskStore::new())
}

#[tokio::test]
async fn create_via_fallback_executes_and_persists() {
    let mut orch = orchestrator();
    let response = orch.interpret("buat todo belajar", ALICE, "id", true).await;

    assert_eq!(response.actions.kind, ActionKind::CreateTask);
    assert!(response.actions.actionable);
    assert_eq!(response.actions.parameters.title.as_deref(), Some("belajar"));
    assert!(response.auto_execute);
    assert!(response.executed);
    assert!(response.execution_error.is_none());

    // The new task shows up in a subsequent list.
    let outcome = orch
        .execute_action(ActionKind::ListTasks, &ActionParameters::default(), ALICE)
        .unwrap();
    let ExecutionOutcome::Tasks(tasks) = outcome else {
        panic!("expected a list");
    };
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "belajar");
}

#[tokio::test]
async fn delete_of_foreign_task_fails_without_leaking() {
    let mut orch = orchestrator();
    // Task id 1 belongs to Bob, not Alice.
    orch.execute_action(
        ActionKind::CreateTask,
        &ActionParameters {
            title: Some("rahasia".into()),
            ..Default::default()
        },
        BOB,
    )
    .unwrap();

    let response = orch.interpret("hapus todo nomor 1", ALICE, "id", true).await;

    assert_eq!(response.actions.kind, ActionKind::DeleteTask);
    assert!(!response.executed);
    assert!(response.execution_error.is_some());
    // Bob's list is untouched.
    assert_eq!(orch.store().list(BOB).len(), 1);
}

#[tokio::test]
async fn create_with_description_splits_title() {
    let mut orch = orchestrator();
    let response = orch
        .interpret(
            "tolong buatkan todo belajar renang dengan deskripsi belajar renang di surabaya",
            ALICE,
            "id",
            false,
        )
        .await;

    assert!(response.executed);
    let Some(ExecutionOutcome::Task(task)) = response.execution_result else {
        panic!("expected a created task");
    };
    assert_eq!(task.title, "belajar renang");
    assert_eq!(task.description.as_deref(), Some("belajar renang di surabaya"));
}

#[tokio::test]
async fn fallback_complete_has_no_target_and_surfaces_the_failure() {
    // The keyword fallback recognizes the intent but extracts no target;
    // with the preference on, the policy lets it run and the resolver's
    // failure comes back as data, not an error.
    let mut orch = orchestrator();
    orch.interpret("buat todo belajar rust", ALICE, "id", false)
        .await;

    let response = orch
        .interpret("tandai selesai belajar rust", ALICE, "id", true)
        .await;
    assert_eq!(response.actions.kind, ActionKind::CompleteTask);
    assert!(response.auto_execute);
    assert!(!response.executed);
    assert!(response.execution_error.is_some());
    assert_eq!(response.context.completed, 0);
}

#[tokio::test]
async fn complete_by_title_reference_toggles() {
    let mut orch = orchestrator();
    orch.interpret("buat todo belajar rust", ALICE, "id", false)
        .await;

    let params = ActionParameters {
        title_reference: Some("Belajar Rust".into()),
        ..Default::default()
    };
    let done = orch
        .execute_action(ActionKind::CompleteTask, &params, ALICE)
        .unwrap();
    let ExecutionOutcome::Task(task) = done else {
        panic!("expected a task");
    };
    assert!(task.completed);

    // Completing again toggles back to pending.
    let undone = orch
        .execute_action(ActionKind::CompleteTask, &params, ALICE)
        .unwrap();
    let ExecutionOutcome::Task(task) = undone else {
        panic!("expected a task");
    };
    assert!(!task.completed);
}

#[tokio::test]
async fn ambiguous_delete_respects_preference() {
    let mut orch = orchestrator();
    orch.interpret("buat todo belajar", ALICE, "id", false).await;

    // Fallback extracts no target for a bare delete; with preference off,
    // the policy requires confirmation.
    let response = orch.interpret("hapus todo", ALICE, "id", false).await;
    assert_eq!(response.actions.kind, ActionKind::DeleteTask);
    assert!(response.actions.actionable);
    assert!(!response.auto_execute);
    assert!(!response.executed);
    assert_eq!(orch.store().list(ALICE).len(), 1);
}

#[tokio::test]
async fn list_and_statistics_always_execute() {
    let mut orch = orchestrator();
    orch.interpret("buat todo belajar", ALICE, "id", false).await;

    let listed = orch.interpret("tampilkan semua todo", ALICE, "id", false).await;
    assert_eq!(listed.actions.kind, ActionKind::ListTasks);
    assert!(listed.executed);

    let stats = orch.interpret("lihat statistik", ALICE, "id", false).await;
    assert_eq!(stats.actions.kind, ActionKind::GetStatistics);
    assert!(stats.executed);
    let Some(ExecutionOutcome::Statistics(s)) = stats.execution_result else {
        panic!("expected statistics");
    };
    assert_eq!(s.total, 1);
    assert_eq!(s.completion_rate, 0.0);
}

#[tokio::test]
async fn owners_are_isolated_end_to_end() {
    let mut orch = orchestrator();
    orch.interpret("buat todo punya alice", ALICE, "id", false)
        .await;
    orch.interpret("buat todo punya bob", BOB, "id", false).await;

    let alice_view = orch.interpret("tampilkan semua todo", ALICE, "id", false).await;
    assert_eq!(alice_view.context.total, 1);
    let Some(ExecutionOutcome::Tasks(tasks)) = alice_view.execution_result else {
        panic!("expected a list");
    };
    assert_eq!(tasks[0].title, "punya alice");
}

#[test]
fn response_envelope_serializes_cleanly() {
    // The transport layer serializes the envelope as-is; optional fields
    // disappear instead of serializing as null.
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut orch = orchestrator();
    let response = rt.block_on(orch.interpret("halo", ALICE, "id", false));

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["actions"]["kind"], "none");
    assert_eq!(json["executed"], false);
    assert!(json.get("execution_result").is_none());
    assert!(json.get("execution_error").is_none());
    assert_eq!(json["context"]["total"], 0);
}
