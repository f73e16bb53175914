//! Field-level diffs for audit entries

use serde_json::Value;

/// Summarise what changed between two serialized records
///
/// Only top-level fields are compared; nested values are summarised. Returns
/// `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes: Vec<String> = match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut changes = Vec::new();
            for (key, old_val) in old {
                // timestamps change on every write and add nothing to the summary
                if key == "updated_at" {
                    continue;
                }
                match new.get(key) {
                    Some(new_val) if new_val == old_val => {}
                    Some(new_val) => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(old_val),
                        format_value(new_val)
                    )),
                    None => changes.push(format!("{}: {} -> (removed)", key, format_value(old_val))),
                }
            }
            for (key, new_val) in new {
                if !old.contains_key(key) {
                    changes.push(format!("{}: (added) -> {}", key, format_value(new_val)));
                }
            }
            changes
        }
        _ if before != after => vec![format!("{} -> {}", format_value(before), format_value(after))],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
