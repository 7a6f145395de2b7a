//! World export and import
//!
//! A world exports as one pretty-printed JSON file carrying the whole document,
//! images included. Import is deliberately lenient: beyond requiring a truthy
//! `id` and `name` at the top level, missing collections fall back to serde
//! defaults and the document gets a fresh id so an import never collides with
//! an existing world.

use serde_json::Value;
use uuid::Uuid;
use worldloom_domain::World;

use crate::store::StoreError;

/// Download name for an exported world.
pub fn export_file_name(world: &World) -> String {
    format!("{}_export.json", world.name)
}

/// Full world document as pretty-printed JSON.
pub fn to_export_json(world: &World) -> Result<String, StoreError> {
    serde_json::to_string_pretty(world).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Truthiness in the JS sense: present and not null/false/0/"".
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(_) => true,
    }
}

/// Parse an imported document, returning a world under a fresh id.
pub fn parse_import(text: &str) -> Result<World, StoreError> {
    let mut value: Value =
        serde_json::from_str(text).map_err(|e| StoreError::MalformedFile(e.to_string()))?;

    // Identity check matches the editor's: id and name must be truthy. The
    // id's shape does not matter since it is replaced below.
    let looks_like_world = is_truthy(value.get("id")) && is_truthy(value.get("name"));
    if !looks_like_world {
        return Err(StoreError::InvalidDocument);
    }

    // Fresh id up front: avoids collisions and tolerates foreign id formats.
    if let Some(object) = value.as_object_mut() {
        object.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }

    serde_json::from_value(value).map_err(|e| StoreError::MalformedFile(e.to_string()))
}
