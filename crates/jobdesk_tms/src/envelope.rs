use desk_logging::desk_warn;
use jobdesk_core::Job;
use serde_json::Value;

const NESTED_KEYS: [&str; 3] = ["list", "items", "jobs"];

/// Locates the item sequence inside a list response, trying the known
/// envelope shapes in order: `data.list`, `data.items`, `data.jobs`, the
/// same keys at the top level, then the response itself if it is already an
/// array. Returns `None` for an unrecognized shape.
pub fn extract_items(data: &Value) -> Option<&Vec<Value>> {
    if let Some(inner) = data.get("data") {
        for key in NESTED_KEYS {
            if let Some(Value::Array(items)) = inner.get(key) {
                return Some(items);
            }
        }
    }
    for key in NESTED_KEYS {
        if let Some(Value::Array(items)) = data.get(key) {
            return Some(items);
        }
    }
    data.as_array()
}

/// Deserializes raw items into job records. A record that does not
/// deserialize is warn-logged and dropped; it never fails the page.
pub fn parse_jobs(items: &[Value]) -> Vec<Job> {
    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(job) => Some(job),
            Err(err) => {
                desk_warn!("Skipping malformed job record: {err}");
                None
            }
        })
        .collect()
}

/// One-line description of an unrecognized envelope for the diagnostic log.
pub(crate) fn describe_envelope(data: &Value) -> String {
    match data {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Array(_) => "array".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Null => "null".to_string(),
    }
}
