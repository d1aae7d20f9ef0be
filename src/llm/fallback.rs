//! Deterministic keyword fallback for intent classification
//!
//! Used whenever model-backed analysis is unavailable or unparseable. Pure
//! string matching over a lowercased copy of the message: no network, no
//! failure modes. A message that matches nothing yields a non-actionable
//! `none` envelope.

use crate::llm::parser::{ActionEnvelope, ActionKind, ActionParameters};

/// Keyword sets, checked in priority order: the first category with a hit
/// wins. Indonesian verbs first, matching the product's primary locale, with
/// the common English equivalents alongside.
const CREATE_KEYWORDS: &[&str] = &["buat", "tambah", "create", "add"];
const LIST_KEYWORDS: &[&str] = &["list", "show", "all todos", "tampilkan"];
const COMPLETE_KEYWORDS: &[&str] = &["complete", "finish", "done", "selesai"];
const DELETE_KEYWORDS: &[&str] = &["delete", "remove", "hapus"];
const UPDATE_KEYWORDS: &[&str] = &["update", "edit", "change", "ubah"];
const STATS_KEYWORDS: &[&str] = &["statistics", "stats", "summary", "statistik"];

/// Marker that splits a creation message into title and description
const DESCRIPTION_MARKER: &str = "dengan deskripsi";

/// Leading filler phrases stripped from creation messages, most specific
/// first. Order matters: "buat todo " must win over "buat ".
const TITLE_PREFIXES: &[&str] = &[
    "tolong buat todo ",
    "tolong buatkan todo ",
    "buat todo ",
    "buatkan todo ",
    "tolong tambah todo ",
    "tambah todo ",
    "tolong buat ",
    "tolong buatkan ",
    "buat ",
    "buatkan ",
    "tolong tambah ",
    "tambah ",
];

/// Classify a message by keywords alone
pub fn classify(message: &str) -> ActionEnvelope {
    let lower = message.to_lowercase();

    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if contains_any(CREATE_KEYWORDS) {
        let (title, description) = split_title_description(message);
        let actionable = title.is_some();
        let envelope = ActionEnvelope {
            kind: ActionKind::CreateTask,
            actionable,
            parameters: ActionParameters {
                title,
                description,
                ..Default::default()
            },
        };
        tracing::debug!(actionable, "fallback classified message as create_task");
        return envelope;
    }

    let kind = if contains_any(LIST_KEYWORDS) {
        ActionKind::ListTasks
    } else if contains_any(COMPLETE_KEYWORDS) {
        ActionKind::CompleteTask
    } else if contains_any(DELETE_KEYWORDS) {
        ActionKind::DeleteTask
    } else if contains_any(UPDATE_KEYWORDS) {
        ActionKind::UpdateTask
    } else if contains_any(STATS_KEYWORDS) {
        ActionKind::GetStatistics
    } else {
        tracing::debug!("fallback matched no keywords, message is plain chat");
        return ActionEnvelope::default();
    };

    tracing::debug!(kind = kind.as_str(), "fallback classified message");
    // Target resolution is deferred to the resolver; parameters stay empty.
    ActionEnvelope {
        kind,
        actionable: true,
        parameters: ActionParameters::default(),
    }
}

/// Recover a title (and optional description) from a creation message
///
/// With a description marker the message splits around it; without one the
/// longest matching filler prefix is stripped and the remainder becomes the
/// title. A message matching no prefix recovers nothing - better an
/// unactionable envelope than a garbage title.
pub fn split_title_description(message: &str) -> (Option<String>, Option<String>) {
    let message = message.trim();

    let (title_part, description) = match find_ascii_ci(message, DESCRIPTION_MARKER) {
        Some(pos) => {
            let desc = message[pos + DESCRIPTION_MARKER.len()..].trim();
            (
                message[..pos].trim(),
                (!desc.is_empty()).then(|| desc.to_string()),
            )
        }
        None => (message, None),
    };

    let title = strip_title_prefix(title_part)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string());

    (title, description)
}

/// Strip the first matching filler prefix, then a leading "todo "
fn strip_title_prefix(segment: &str) -> Option<&str> {
    for prefix in TITLE_PREFIXES {
        if let Some(rest) = strip_prefix_ascii_ci(segment, prefix) {
            let rest = rest.trim_start();
            return Some(match strip_prefix_ascii_ci(rest, "todo ") {
                Some(stripped) => stripped.trim_start(),
                None => rest,
            });
        }
    }
    None
}

/// Case-insensitive (ASCII) prefix strip that never slices mid-character
fn strip_prefix_ascii_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Case-insensitive (ASCII) substring search returning a byte offset
///
/// The needle is pure ASCII, so a hit lands on char boundaries.
fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
