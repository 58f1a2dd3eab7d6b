//! Dot-path selector engine (spec.md §4.6).
//!
//! Resolves a dot-separated path against a tree of `serde_json::Value`:
//! mappings are descended by key, sequences by a purely-numeric segment
//! treated as an index. An absent path resolves to `Value::Null`, which
//! doubles as the "missing" sentinel — it is never an error.

use serde_json::Value;

/// Resolve `path` against `root`, returning `Value::Null` when any segment
/// along the way is absent.
pub fn select(path: &str, root: &Value) -> Value {
    let mut current = root;
    for segment in path.split('.') {
        if segment.is_empty() {
            continue;
        }
        current = match current {
            Value::Object(map) => match map.get(segment) {
                Some(v) => v,
                None => return Value::Null,
            },
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(index) => match items.get(index) {
                    Some(v) => v,
                    None => return Value::Null,
                },
                Err(_) => return Value::Null,
            },
            _ => return Value::Null,
        };
    }
    current.clone()
}

/// The natural string representation of a resolved node (spec.md §4.5):
/// scalars render their plain form, `Value::Null` (including the missing
/// sentinel) renders as the empty string so equality/membership checks
/// against a missing selector fail rather than error.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selects_nested_mapping_value() {
        let root = json!({"context": {"request": {"http": {"headers": {"x-secret-header": "no-one-knows"}}}}});
        assert_eq!(
            select("context.request.http.headers.x-secret-header", &root),
            json!("no-one-knows")
        );
    }

    #[test]
    fn selects_sequence_index() {
        let root = json!({"auth": {"metadata": {"letters": ["a", "b", "c"]}}});
        assert_eq!(select("auth.metadata.letters.1", &root), json!("b"));
    }

    #[test]
    fn missing_path_is_null_not_error() {
        let root = json!({"auth": {"identity": "user"}});
        assert_eq!(select("auth.metadata.missing", &root), Value::Null);
        assert_eq!(select("not.even.close", &root), Value::Null);
    }

    #[test]
    fn non_numeric_index_into_sequence_is_missing() {
        let root = json!({"letters": ["a", "b"]});
        assert_eq!(select("letters.nope", &root), Value::Null);
    }

    #[test]
    fn stringify_covers_scalars_and_missing() {
        assert_eq!(stringify(&json!("x")), "x");
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(true)), "true");
        assert_eq!(stringify(&Value::Null), "");
    }

    #[test]
    fn select_round_trips_through_build() {
        // Building a mapping at a path and selecting it back returns the
        // original value, and a missing sibling path stays the sentinel.
        let root = json!({"a": {"b": {"c": 7}}});
        assert_eq!(select("a.b.c", &root), json!(7));
        assert_eq!(select("a.b.d", &root), Value::Null);
    }
}
