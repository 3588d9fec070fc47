//! JSON file helpers and structural deduplication.

use camino::Utf8Path;
use serde_json::Value;

use crate::error::Result;

/// Read a JSON document from disk.
///
/// An absent file answers `Ok(None)`; a file that exists but does not parse
/// is an error the caller decides how to count.
pub fn read_json(path: &Utf8Path) -> Result<Option<Value>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Write a pretty-printed JSON document, creating parent directories.
pub fn write_json(path: &Utf8Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = serde_json::to_string_pretty(value)?;
    out.push('\n');
    std::fs::write(path, out)?;
    Ok(())
}

/// Deduplicate a list of JSON fragments by structural equality.
///
/// `serde_json::Value` equality is deep and key-order independent, so two
/// objects with the same keys and values in any order are duplicates. The
/// first occurrence wins and relative order is preserved.
pub fn dedup_values(items: Vec<Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn read_json_absent_file_is_none() {
        let temp = tempdir().unwrap();
        let path = Utf8Path::from_path(temp.path()).unwrap().join("missing.json");

        assert_eq!(read_json(&path).unwrap(), None);
    }

    #[test]
    fn read_json_malformed_file_is_error() {
        let temp = tempdir().unwrap();
        let path = Utf8Path::from_path(temp.path()).unwrap().join("bad.json");
        std::fs::write(&path, "{broken").unwrap();

        assert!(read_json(&path).is_err());
    }

    #[test]
    fn write_json_creates_parents_and_round_trips() {
        let temp = tempdir().unwrap();
        let path = Utf8Path::from_path(temp.path())
            .unwrap()
            .join("a/b/doc.json");
        let doc = json!({"key": [1, 2, 3]});

        write_json(&path, &doc).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();

        assert!(raw.ends_with('\n'));
        assert_eq!(read_json(&path).unwrap(), Some(doc));
    }

    #[test]
    fn dedup_preserves_first_occurrence_order() {
        let items = vec![json!(1), json!(2), json!(1), json!(3), json!(2)];
        assert_eq!(dedup_values(items), vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn dedup_is_key_order_independent() {
        let items = vec![
            json!({"type": "bitmap", "file": "a.png"}),
            json!({"file": "a.png", "type": "bitmap"}),
        ];
        assert_eq!(
            dedup_values(items),
            vec![json!({"type": "bitmap", "file": "a.png"})]
        );
    }

    #[test]
    fn dedup_keeps_structurally_distinct_values() {
        let items = vec![
            json!({"id": "a"}),
            json!({"id": "b"}),
            json!("a"),
            json!(["a"]),
        ];
        assert_eq!(dedup_values(items.clone()), items);
    }
}
