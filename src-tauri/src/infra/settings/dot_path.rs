//! Usage: Dot-path addressing over the settings JSON tree (lookup, assign, defaults merge).

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("settings path must not be empty")]
    EmptyPath,
    #[error("settings path `{path}` contains an empty segment")]
    EmptySegment { path: String },
    #[error("settings value for `{path}` must be a string, number, boolean or null")]
    NonPrimitiveValue { path: String },
    #[error("settings path `{path}` crosses a non-object value at `{at}`")]
    PathConflict { path: String, at: String },
}

pub(crate) fn segments(path: &str) -> Result<Vec<&str>, SettingsError> {
    if path.trim().is_empty() {
        return Err(SettingsError::EmptyPath);
    }
    let parts: Vec<&str> = path.split('.').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(SettingsError::EmptySegment {
            path: path.to_string(),
        });
    }
    Ok(parts)
}

pub(crate) fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let parts = segments(path).ok()?;
    parts
        .into_iter()
        .try_fold(root, |cursor, segment| cursor.as_object()?.get(segment))
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Assign `value` at `path`, creating missing intermediate objects.
///
/// Objects and primitives never replace each other: walking through an existing primitive, or
/// putting a primitive where a section already is, stops with `PathConflict` before anything is
/// written.
pub(crate) fn assign(root: &mut Value, path: &str, value: Value) -> Result<(), SettingsError> {
    let parts = segments(path)?;
    if !is_primitive(&value) {
        return Err(SettingsError::NonPrimitiveValue {
            path: path.to_string(),
        });
    }

    let (leaf, parents) = parts
        .split_last()
        .ok_or(SettingsError::EmptyPath)?;

    let conflict = |depth: usize| SettingsError::PathConflict {
        path: path.to_string(),
        at: if depth == 0 {
            "<root>".to_string()
        } else {
            parts[..depth].join(".")
        },
    };

    let mut cursor = root;
    for (depth, segment) in parents.iter().enumerate() {
        let map = match cursor {
            Value::Object(map) => map,
            _ => return Err(conflict(depth)),
        };
        cursor = map
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    let map = match cursor {
        Value::Object(map) => map,
        _ => return Err(conflict(parents.len())),
    };
    if map.get(*leaf).is_some_and(Value::is_object) {
        return Err(conflict(parts.len()));
    }
    map.insert((*leaf).to_string(), value);
    Ok(())
}

/// Deep-merge `overlay` onto `defaults`: overlay values win, keys only present in the overlay
/// are kept, and objects present on both sides merge recursively. Where the two disagree on
/// shape (section vs. primitive) the default is kept.
pub(crate) fn merge_over_defaults(defaults: Value, overlay: Value) -> Value {
    match (defaults, overlay) {
        (Value::Object(mut base), Value::Object(over)) => {
            for (key, over_value) in over {
                let merged = match base.remove(&key) {
                    Some(base_value) => merge_over_defaults(base_value, over_value),
                    None => over_value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (defaults @ Value::Object(_), _) => defaults,
        (defaults, Value::Object(_)) => defaults,
        (_, overlay) => overlay,
    }
}
