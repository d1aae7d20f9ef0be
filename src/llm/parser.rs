//! Parse free-form user messages into structured task actions
//!
//! The model classifies the message against a closed action menu and
//! extracts parameters; its output is read through the tolerant field
//! extractor so partial or noisy JSON still yields an envelope. Whenever the
//! model is unavailable or its answer is unusable, classification fully
//! delegates to the deterministic keyword fallback - no fields from a failed
//! model attempt leak into the fallback result.

use crate::llm::client::LlmClient;
use crate::llm::fallback;
use crate::llm::fields;
use serde::{Deserialize, Serialize};

/// The closed set of actions the assistant can take
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreateTask,
    ListTasks,
    UpdateTask,
    DeleteTask,
    CompleteTask,
    SearchTasks,
    GetStatistics,
    /// Plain chat; nothing to execute
    None,
}

impl ActionKind {
    /// Wire name as it appears in prompts and envelopes
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::CreateTask => "create_task",
            ActionKind::ListTasks => "list_tasks",
            ActionKind::UpdateTask => "update_task",
            ActionKind::DeleteTask => "delete_task",
            ActionKind::CompleteTask => "complete_task",
            ActionKind::SearchTasks => "search_tasks",
            ActionKind::GetStatistics => "get_statistics",
            ActionKind::None => "none",
        }
    }

    /// Map a wire name to a kind; anything unrecognized becomes `None`
    pub fn from_wire(s: &str) -> Self {
        match s {
            "create_task" => ActionKind::CreateTask,
            "list_tasks" => ActionKind::ListTasks,
            "update_task" => ActionKind::UpdateTask,
            "delete_task" => ActionKind::DeleteTask,
            "complete_task" => ActionKind::CompleteTask,
            "search_tasks" => ActionKind::SearchTasks,
            "get_statistics" => ActionKind::GetStatistics,
            _ => ActionKind::None,
        }
    }
}

/// Extracted parameters for an action; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionParameters {
    /// Stable task identifier, when the user named one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// New or created title value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// A title used to LOCATE an existing task, as opposed to `title`
    /// which may be a new value to set. `id` wins when both are present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_reference: Option<String>,
}

impl ActionParameters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Classified intent plus extracted parameters and actionability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEnvelope {
    pub kind: ActionKind,
    /// When false, the orchestrator must not dispatch regardless of policy
    pub actionable: bool,
    pub parameters: ActionParameters,
}

impl Default for ActionEnvelope {
    fn default() -> Self {
        Self {
            kind: ActionKind::None,
            actionable: false,
            parameters: ActionParameters::default(),
        }
    }
}

/// Classify a message, preferring the model and falling back to keywords
pub async fn analyze_message(client: &LlmClient, message: &str) -> ActionEnvelope {
    let prompt = build_analysis_prompt(message);
    match client.generate(&prompt, "").await {
        Ok(response) => match parse_analysis(&response) {
            Some(envelope) => envelope,
            None => {
                tracing::debug!("model response not parseable as analysis, using fallback");
                fallback::classify(message)
            }
        },
        Err(e) => {
            tracing::warn!("model analysis failed ({e}), using keyword fallback");
            fallback::classify(message)
        }
    }
}

/// Read an action envelope out of a raw model response
///
/// `None` means the response is unusable as a whole (empty or not a JSON
/// object) and the caller must fall back. Individual missing fields are
/// fine: the envelope just carries less.
pub fn parse_analysis(response: &str) -> Option<ActionEnvelope> {
    let content = response.trim();
    if !content.starts_with('{') {
        return None;
    }

    let kind = fields::extract_value(content, "suggested_action")
        .map(|s| ActionKind::from_wire(&s))
        .unwrap_or(ActionKind::None);
    let actionable = fields::flag_is_true(content, "actionable");

    let mut parameters = ActionParameters::default();
    if let Some(section) = fields::extract_section(content, "parameters") {
        if let Some(id) = fields::extract_value(&section, "id") {
            match id.parse::<i64>() {
                Ok(n) => parameters.id = Some(n),
                // Not a number; the model put a title where the id goes.
                Err(_) => parameters.title_reference = Some(id),
            }
        }
        parameters.title = fields::extract_value(&section, "title");
        parameters.description = fields::extract_value(&section, "description");
        parameters.search_term = fields::extract_value(&section, "search_term");
        parameters.completed = fields::extract_value(&section, "completed")
            .map(|s| s.eq_ignore_ascii_case("true"));
    }

    Some(ActionEnvelope {
        kind,
        actionable,
        parameters,
    })
}

/// Analysis prompt: closed action menu with few-shot examples, JSON out
fn build_analysis_prompt(message: &str) -> String {
    format!(
        "Analisis pesan user berikut dan tentukan aksi yang diinginkan beserta parameternya:\n\n\
         Pesan: \"{message}\"\n\n\
         Tugas:\n\
         1. Identifikasi jenis aksi yang diinginkan user\n\
         2. Ekstrak parameter yang diperlukan untuk aksi tersebut\n\
         3. Tentukan apakah ini actionable (dapat langsung dieksekusi)\n\n\
         Jenis aksi yang tersedia:\n\
         - create_task: membuat task baru (perlu: title, description opsional)\n\
         - list_tasks: menampilkan semua task\n\
         - update_task: mengubah task (perlu: id/title lama, title/description/completed baru)\n\
         - complete_task: menandai task selesai (perlu: id/title)\n\
         - delete_task: menghapus task (perlu: id/title)\n\
         - search_tasks: mencari task (perlu: search_term)\n\
         - get_statistics: menampilkan statistik task\n\
         - none: tidak ada aksi spesifik (chat biasa)\n\n\
         Responmu harus dalam format JSON seperti ini:\n\
         {{\n\
           \"suggested_action\": \"jenis_aksi\",\n\
           \"actionable\": true/false,\n\
           \"parameters\": {{\n\
             \"id\": \"id_task (jika ada)\",\n\
             \"title\": \"judul_task\",\n\
             \"description\": \"deskripsi_task\",\n\
             \"completed\": true/false,\n\
             \"search_term\": \"kata_kunci_pencarian\"\n\
           }}\n\
         }}\n\n\
         Contoh:\n\
         - \"buat todo belajar\" -> {{\"suggested_action\": \"create_task\", \"actionable\": true, \"parameters\": {{\"title\": \"belajar\"}}}}\n\
         - \"hapus todo nomor 1\" -> {{\"suggested_action\": \"delete_task\", \"actionable\": true, \"parameters\": {{\"id\": \"1\"}}}}\n\
         - \"tandai selesai todo belajar\" -> {{\"suggested_action\": \"complete_task\", \"actionable\": true, \"parameters\": {{\"title\": \"belajar\"}}}}\n\
         - \"ubah judul todo 2 jadi belajar java\" -> {{\"suggested_action\": \"update_task\", \"actionable\": true, \"parameters\": {{\"id\": \"2\", \"title\": \"belajar java\"}}}}\n\
         - \"tampilkan semua todo\" -> {{\"suggested_action\": \"list_tasks\", \"actionable\": true, \"parameters\": {{}}}}\n\
         - \"halo apa kabar\" -> {{\"suggested_action\": \"none\", \"actionable\": false, \"parameters\": {{}}}}\n\n\
         Hanya berikan JSON response, tanpa penjelasan tambahan."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_analysis() {
        let response = r#"{
            "suggested_action": "create_task",
            "actionable": true,
            "parameters": {"title": "study", "description": "rust chapter 4"}
        }"#;
        let envelope = parse_analysis(response).unwrap();
        assert_eq!(envelope.kind, ActionKind::CreateTask);
        assert!(envelope.actionable);
        assert_eq!(envelope.parameters.title.as_deref(), Some("study"));
        assert_eq!(
            envelope.parameters.description.as_deref(),
            Some("rust chapter 4")
        );
        assert_eq!(envelope.parameters.id, None);
    }

    #[test]
    fn test_parse_numeric_id() {
        let response =
            r#"{"suggested_action": "delete_task", "actionable": true, "parameters": {"id": "7"}}"#;
        let envelope = parse_analysis(response).unwrap();
        assert_eq!(envelope.kind, ActionKind::DeleteTask);
        assert_eq!(envelope.parameters.id, Some(7));
        assert_eq!(envelope.parameters.title_reference, None);
    }

    #[test]
    fn test_parse_non_numeric_id_becomes_title_reference() {
        let response = r#"{"suggested_action": "complete_task", "actionable": true, "parameters": {"id": "belajar"}}"#;
        let envelope = parse_analysis(response).unwrap();
        assert_eq!(envelope.parameters.id, None);
        assert_eq!(
            envelope.parameters.title_reference.as_deref(),
            Some("belajar")
        );
    }

    #[test]
    fn test_parse_actionable_whitespace_tolerant() {
        let response = "{\"suggested_action\": \"list_tasks\", \"actionable\" :\n true}";
        assert!(parse_analysis(response).unwrap().actionable);
    }

    #[test]
    fn test_parse_completed_string_literal() {
        let response = r#"{"suggested_action": "update_task", "actionable": true, "parameters": {"id": "2", "completed": "true"}}"#;
        let envelope = parse_analysis(response).unwrap();
        assert_eq!(envelope.parameters.completed, Some(true));
    }

    #[test]
    fn test_parse_prose_response_is_rejected() {
        assert!(parse_analysis("Maaf, saya tidak mengerti.").is_none());
        assert!(parse_analysis("").is_none());
    }

    #[test]
    fn test_parse_unknown_action_maps_to_none() {
        let response = r#"{"suggested_action": "reticulate_splines", "actionable": true, "parameters": {}}"#;
        let envelope = parse_analysis(response).unwrap();
        assert_eq!(envelope.kind, ActionKind::None);
    }

    #[test]
    fn test_kind_wire_round_trip() {
        let json = serde_json::to_string(&ActionKind::CreateTask).unwrap();
        assert_eq!(json, "\"create_task\"");
        let kind: ActionKind = serde_json::from_str("\"get_statistics\"").unwrap();
        assert_eq!(kind, ActionKind::GetStatistics);
    }

    #[test]
    fn test_prompt_embeds_message_and_menu() {
        let prompt = build_analysis_prompt("buat todo belajar");
        assert!(prompt.contains("buat todo belajar"));
        for kind in ["create_task", "delete_task", "get_statistics", "none"] {
            assert!(prompt.contains(kind), "menu missing {kind}");
        }
    }
}
