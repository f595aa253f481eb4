//! Deep merge of configuration values.
//!
//! Implements key-by-key merging where later source values override
//! earlier ones. Arrays are replaced entirely, not concatenated.

use serde_json::Value;

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans, nulls are replaced entirely
/// - If overlay is null, the base value is preserved (null means "not specified")
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        // Both are objects: merge recursively
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged_value = if let Some(base_value) = base_map.remove(&key) {
                    deep_merge(base_value, overlay_value)
                } else {
                    overlay_value
                };
                base_map.insert(key, merged_value);
            }
            Value::Object(base_map)
        }
        // Overlay is null: preserve base (null means "not specified")
        (base, Value::Null) => base,
        // Any other case: overlay replaces base entirely
        (_, overlay) => overlay,
    }
}

/// Merge multiple values in order, with later values taking precedence.
///
/// Equivalent to folding `deep_merge` over the list.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_simple_objects() {
        let base = json!({"name": "svc", "database_dsn": "sqlite::memory:"});
        let overlay = json!({"name": "svc-dev"});
        let result = deep_merge(base, overlay);
        assert_eq!(
            result,
            json!({"name": "svc-dev", "database_dsn": "sqlite::memory:"})
        );
    }

    #[test]
    fn test_later_source_wins_key_by_key() {
        let sources = vec![
            json!({"name": "a"}),
            json!({"name": "b", "database_dsn": "sqlite://a.db"}),
            json!({"name": "c"}),
        ];
        let result = deep_merge_all(sources);
        assert_eq!(result, json!({"name": "c", "database_dsn": "sqlite://a.db"}));
    }

    #[test]
    fn test_null_preserves_base() {
        let base = json!({"name": "svc"});
        let overlay = json!({"name": null});
        let result = deep_merge(base, overlay);
        assert_eq!(result, json!({"name": "svc"}));
    }

    #[test]
    fn test_arrays_replaced_not_merged() {
        let base = json!({"items": [1, 2, 3]});
        let overlay = json!({"items": [4]});
        let result = deep_merge(base, overlay);
        assert_eq!(result, json!({"items": [4]}));
    }

    #[test]
    fn test_merge_nested_objects() {
        let base = json!({"outer": {"a": 1, "b": 2}});
        let overlay = json!({"outer": {"b": 3}});
        let result = deep_merge(base, overlay);
        assert_eq!(result, json!({"outer": {"a": 1, "b": 3}}));
    }

    #[test]
    fn test_merge_all_empty_is_null() {
        assert_eq!(deep_merge_all(Vec::new()), Value::Null);
    }

    #[test]
    fn test_overlay_replaces_primitive_with_object() {
        let base = json!({"value": 42});
        let overlay = json!({"value": {"nested": true}});
        let result = deep_merge(base, overlay);
        assert_eq!(result, json!({"value": {"nested": true}}));
    }
}
