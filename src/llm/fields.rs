//! Tolerant field extraction from model output
//!
//! Model responses are expected to contain a JSON object but frequently
//! arrive truncated, prefixed with prose, or missing closing braces. These
//! helpers pull individual fields out by pattern search instead of running a
//! structural parser, so one mangled field never fails the whole pipeline.
//! Do not replace this with strict JSON parsing.

/// Find `"key"` in `blob` and return the byte offset just past the colon
/// that follows it, skipping whitespace. Keys are case-sensitive.
fn find_value_start(blob: &str, key: &str) -> Option<usize> {
    let needle = format!("\"{}\"", key);
    let mut search_from = 0;
    while let Some(rel) = blob[search_from..].find(&needle) {
        let after_key = search_from + rel + needle.len();
        let rest = &blob[after_key..];
        let trimmed = rest.trim_start();
        if let Some(stripped) = trimmed.strip_prefix(':') {
            let ws = rest.len() - trimmed.len() + 1;
            let value_ws = stripped.len() - stripped.trim_start().len();
            return Some(after_key + ws + value_ws);
        }
        // Matched the key text in a value position; keep looking.
        search_from = after_key;
    }
    None
}

/// Extract a scalar string value bound to `key`
///
/// Returns the inner text of a double-quoted value, or `None` for a JSON
/// `null` (a successful match) as well as for an absent or unquoted value.
/// Callers treat null and absent identically.
pub fn extract_value(blob: &str, key: &str) -> Option<String> {
    let start = find_value_start(blob, key)?;
    let rest = &blob[start..];

    if rest.starts_with("null") {
        return None;
    }

    let inner = rest.strip_prefix('"')?;
    let end = inner.find('"')?;
    if end == 0 {
        // Empty string value; nothing useful to extract.
        return None;
    }
    Some(inner[..end].to_string())
}

/// Extract the raw text of the first balanced-brace object bound to `key`
///
/// Returns the substring including the outer braces, or `None` when the key
/// is absent or its object never closes.
pub fn extract_section(blob: &str, key: &str) -> Option<String> {
    let start = find_value_start(blob, key)?;
    let rest = &blob[start..];
    if !rest.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(rest[..=i].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

/// Tolerant check for `"key": true` with arbitrary whitespace around the
/// colon. A bare substring test breaks on formatting noise; scanning the
/// key/value pair does not.
pub fn flag_is_true(blob: &str, key: &str) -> bool {
    match find_value_start(blob, key) {
        Some(start) => blob[start..].starts_with("true"),
        None => false,
    }
}
