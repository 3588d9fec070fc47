use serde::{Deserialize, Serialize};
use serde_json::Value;

/// File name of the pack descriptor at a pack root.
pub const MCMETA_FILE_NAME: &str = "pack.mcmeta";

/// File name of the pack icon at a pack root.
pub const ICON_FILE_NAME: &str = "pack.png";

/// Known-good default written when no input pack declares a format version
/// (matches the 1.20.x resource pack format).
pub const FALLBACK_PACK_FORMAT: i64 = 15;

/// Name prefix reserved for merge output directories. Discovery never
/// re-ingests a candidate carrying this prefix.
pub const MERGED_PACK_PREFIX: &str = "merged_pack";

/// The `pack.mcmeta` descriptor.
///
/// Reading is deliberately tolerant: both fields of the `pack` section accept
/// any JSON value so a sloppy descriptor still parses, and typed access goes
/// through [`pack_format`](Self::pack_format) and
/// [`description`](Self::description). A merge run writes a fresh descriptor
/// built with [`synthesized`](Self::synthesized); extra keys from input
/// descriptors are never carried over.
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct PackMcmeta {
    #[serde(default)]
    pub pack: PackSection,
}

/// The `pack` object inside `pack.mcmeta`.
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct PackSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_format: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl PackMcmeta {
    /// Build the descriptor a merge run writes to its output root.
    pub fn synthesized(pack_format: i64, description: impl Into<String>) -> Self {
        Self {
            pack: PackSection {
                pack_format: Some(Value::from(pack_format)),
                description: Some(Value::String(description.into())),
            },
        }
    }

    /// The declared format version. Only JSON integers are accepted; any
    /// other type is treated as absent.
    pub fn pack_format(&self) -> Option<i64> {
        self.pack.pack_format.as_ref().and_then(Value::as_i64)
    }

    /// The declared description, coerced to a string when the descriptor
    /// uses a non-string value (e.g. a text component object).
    pub fn description(&self) -> Option<String> {
        match self.pack.description.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_descriptor() {
        let mcmeta: PackMcmeta =
            serde_json::from_str(r#"{"pack": {"pack_format": 15, "description": "A pack"}}"#)
                .unwrap();

        assert_eq!(mcmeta.pack_format(), Some(15));
        assert_eq!(mcmeta.description(), Some("A pack".to_string()));
    }

    #[test]
    fn non_integer_pack_format_is_absent() {
        let mcmeta: PackMcmeta =
            serde_json::from_str(r#"{"pack": {"pack_format": "15"}}"#).unwrap();
        assert_eq!(mcmeta.pack_format(), None);

        let mcmeta: PackMcmeta =
            serde_json::from_str(r#"{"pack": {"pack_format": 15.5}}"#).unwrap();
        assert_eq!(mcmeta.pack_format(), None);
    }

    #[test]
    fn missing_fields_are_absent() {
        let mcmeta: PackMcmeta = serde_json::from_str(r#"{"pack": {}}"#).unwrap();
        assert_eq!(mcmeta.pack_format(), None);
        assert_eq!(mcmeta.description(), None);

        let mcmeta: PackMcmeta = serde_json::from_str("{}").unwrap();
        assert_eq!(mcmeta.pack_format(), None);
    }

    #[test]
    fn non_string_description_is_coerced() {
        let mcmeta: PackMcmeta =
            serde_json::from_str(r#"{"pack": {"description": {"text": "hi"}}}"#).unwrap();
        assert_eq!(mcmeta.description(), Some(r#"{"text":"hi"}"#.to_string()));
    }

    #[test]
    fn synthesized_round_trips_exactly() {
        let mcmeta = PackMcmeta::synthesized(15, "Merged: a + b");
        let json = serde_json::to_string(&mcmeta).unwrap();
        assert_eq!(
            json,
            r#"{"pack":{"pack_format":15,"description":"Merged: a + b"}}"#
        );
    }
}
