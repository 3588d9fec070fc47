//! Content-aware combinators for the structured payload categories.
//!
//! Each combinator is a pure function `(destination, source) -> merged`.
//! The destination document is the accumulated output so far (lower
//! priority); the source document comes from the pack currently being
//! applied (higher priority). Non-object inputs are treated as empty
//! objects rather than failing.

use serde_json::{Map, Value};

use crate::json::dedup_values;

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn field_list(value: &Value, field: &str) -> Vec<Value> {
    match value.get(field) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Shallow key union; source keys overwrite destination keys.
///
/// Used for lang tables and `sounds.json` indexes.
pub fn merge_object_union(dest: Value, src: &Value) -> Value {
    let mut out = into_object(dest);
    if let Value::Object(src_map) = src {
        for (key, value) in src_map {
            out.insert(key.clone(), value.clone());
        }
    }
    Value::Object(out)
}

/// Concatenate the named list field (destination first, source appended),
/// deduplicate structurally, and replace the field. All other destination
/// fields are preserved.
///
/// Used for font `providers` and atlas `sources`.
pub fn merge_list_field(dest: Value, src: &Value, field: &str) -> Value {
    let mut merged = field_list(&dest, field);
    merged.extend(field_list(src, field));

    let mut out = into_object(dest);
    out.insert(field.to_string(), Value::Array(dedup_values(merged)));
    Value::Object(out)
}

/// Tag union over `values`, deduplicated. When the source declares an
/// explicit boolean `replace` flag it overwrites the destination's: the
/// higher-priority pack's intent about discarding pre-existing entries wins.
pub fn merge_tag_values(dest: Value, src: &Value) -> Value {
    let mut merged = field_list(&dest, "values");
    merged.extend(field_list(src, "values"));
    let replace = src.get("replace").and_then(Value::as_bool);

    let mut out = into_object(dest);
    out.insert("values".to_string(), Value::Array(dedup_values(merged)));
    if let Some(replace) = replace {
        out.insert("replace".to_string(), Value::Bool(replace));
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_union_source_keys_win() {
        let dest = json!({"a": "old", "b": "keep"});
        let src = json!({"a": "new", "c": "add"});

        assert_eq!(
            merge_object_union(dest, &src),
            json!({"a": "new", "b": "keep", "c": "add"})
        );
    }

    #[test]
    fn object_union_tolerates_non_objects() {
        assert_eq!(merge_object_union(json!([1]), &json!({"a": 1})), json!({"a": 1}));
        assert_eq!(
            merge_object_union(json!({"a": 1}), &json!("junk")),
            json!({"a": 1})
        );
    }

    #[test]
    fn list_field_appends_then_dedupes() {
        let dest = json!({"providers": [{"id": 1}, {"id": 2}], "extra": true});
        let src = json!({"providers": [{"id": 2}, {"id": 3}]});

        assert_eq!(
            merge_list_field(dest, &src, "providers"),
            json!({"providers": [{"id": 1}, {"id": 2}, {"id": 3}], "extra": true})
        );
    }

    #[test]
    fn list_field_dedupe_ignores_key_order() {
        let dest = json!({"sources": [{"type": "directory", "source": "block"}]});
        let src = json!({"sources": [{"source": "block", "type": "directory"}]});

        assert_eq!(
            merge_list_field(dest, &src, "sources"),
            json!({"sources": [{"type": "directory", "source": "block"}]})
        );
    }

    #[test]
    fn list_field_missing_on_either_side() {
        let merged = merge_list_field(json!({}), &json!({"providers": [1]}), "providers");
        assert_eq!(merged, json!({"providers": [1]}));

        let merged = merge_list_field(json!({"providers": [1]}), &json!({}), "providers");
        assert_eq!(merged, json!({"providers": [1]}));
    }

    #[test]
    fn tag_values_union_preserves_order() {
        let dest = json!({"values": ["minecraft:stone", "minecraft:dirt"]});
        let src = json!({"values": ["minecraft:dirt", "minecraft:sand"]});

        assert_eq!(
            merge_tag_values(dest, &src),
            json!({"values": ["minecraft:stone", "minecraft:dirt", "minecraft:sand"]})
        );
    }

    #[test]
    fn tag_replace_flag_source_intent_wins() {
        let dest = json!({"values": ["a"], "replace": false});
        let src = json!({"values": ["b"], "replace": true});

        assert_eq!(
            merge_tag_values(dest, &src),
            json!({"values": ["a", "b"], "replace": true})
        );
    }

    #[test]
    fn tag_replace_flag_kept_when_source_silent() {
        let dest = json!({"values": ["a"], "replace": true});
        let src = json!({"values": ["b"]});

        assert_eq!(
            merge_tag_values(dest, &src),
            json!({"values": ["a", "b"], "replace": true})
        );
    }

    #[test]
    fn tag_non_boolean_replace_is_ignored() {
        let dest = json!({"values": ["a"]});
        let src = json!({"values": ["b"], "replace": "yes"});

        assert_eq!(
            merge_tag_values(dest, &src),
            json!({"values": ["a", "b"]})
        );
    }
}
