//! Field-level changes between two row snapshots

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One top-level field that differs between two snapshots
///
/// `old` is `None` for a field that only exists afterwards, `new` is `None`
/// for one that was dropped (an optional field being cleared, e.g. a spend
/// losing its type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.field,
            short_value(self.old.as_ref()),
            short_value(self.new.as_ref())
        )
    }
}

/// Top-level fields of two JSON objects that differ, in field-name order
///
/// Snapshots that aren't both objects are compared as a whole and reported
/// under the field name `value`.
pub fn field_changes(before: &Value, after: &Value) -> Vec<FieldChange> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        if before == after {
            return Vec::new();
        }
        return vec![FieldChange {
            field: "value".to_string(),
            old: Some(before.clone()),
            new: Some(after.clone()),
        }];
    };

    let mut fields: Vec<&String> = before_obj.keys().chain(after_obj.keys()).collect();
    fields.sort();
    fields.dedup();

    fields
        .into_iter()
        .filter_map(|field| {
            let old = before_obj.get(field);
            let new = after_obj.get(field);
            (old != new).then(|| FieldChange {
                field: field.clone(),
                old: old.cloned(),
                new: new.cloned(),
            })
        })
        .collect()
}

fn short_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Some(Value::Array(items)) => format!("[{} items]", items.len()),
        Some(Value::Object(fields)) => format!("{{{} fields}}", fields.len()),
        Some(other) => other.to_string(),
    }
}
