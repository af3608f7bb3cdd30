use serde_json::Value;

/// Collects every value stored under `key` anywhere in `value`.
///
/// The walk is depth-first and pre-order, visiting object entries in
/// document order and array elements in index order. When an entry matches,
/// its value is collected as a whole and is not searched any further, so
/// `{"id": {"id": 1}}` yields `[{"id": 1}]` for the key `"id"`.
pub fn extract(value: &Value, key: &str) -> Vec<Value> {
    let mut found = Vec::new();
    extract_into(value, key, &mut found);
    found
}

fn extract_into(value: &Value, key: &str, found: &mut Vec<Value>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                if k == key {
                    found.push(v.clone());
                } else if v.is_object() || v.is_array() {
                    extract_into(v, key, found);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                extract_into(item, key, found);
            }
        }
        _ => {}
    }
}
