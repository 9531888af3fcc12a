use serde_json::{Map, Value};

/// Starts a new node object with `"$type"` inserted first, matching the
/// reference shape's fixed leading key (spec §4.5, §6).
pub(crate) fn node(type_name: &str) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("$type".to_string(), Value::String(type_name.to_string()));
    map
}

/// Builds a `{"$ref": type_name}` placeholder for a second occurrence of a
/// shared `Identifier`/`GraphMatchNodeExpression` allocation.
pub(crate) fn node_ref(type_name: &str) -> Value {
    let mut map = Map::new();
    map.insert("$ref".to_string(), Value::String(type_name.to_string()));
    Value::Object(map)
}

pub(crate) fn finish(map: Map<String, Value>) -> Value {
    Value::Object(map)
}

/// Inserts `key` only if `values` is non-empty, mirroring the spec's
/// "omitted when empty" rule for collection fields.
pub(crate) fn insert_array_if_nonempty(map: &mut Map<String, Value>, key: &str, values: Vec<Value>) {
    if !values.is_empty() {
        map.insert(key.to_string(), Value::Array(values));
    }
}

/// Always inserts `key`, even for an empty array — used by the handful of
/// collection fields the reference always emits.
pub(crate) fn insert_array(map: &mut Map<String, Value>, key: &str, values: Vec<Value>) {
    map.insert(key.to_string(), Value::Array(values));
}

pub(crate) fn insert_if_some(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v);
    }
}

pub(crate) fn insert_string(map: &mut Map<String, Value>, key: &str, value: impl Into<String>) {
    map.insert(key.to_string(), Value::String(value.into()));
}

pub(crate) fn insert_bool(map: &mut Map<String, Value>, key: &str, value: bool) {
    map.insert(key.to_string(), Value::Bool(value));
}
