//! Pack validation and metadata loading.

use camino::{Utf8Path, Utf8PathBuf};
use mcpack_meta::{PackMcmeta, ICON_FILE_NAME, MCMETA_FILE_NAME};
use tracing::warn;

/// Immutable per-pack summary captured once at load time.
///
/// `name` doubles as the human-readable label and the key used by explicit
/// priority orderings (see [`order_packs`](crate::discovery::order_packs)).
#[derive(Debug, Clone, PartialEq)]
pub struct PackInfo {
    /// Root of the pack tree.
    pub path: Utf8PathBuf,
    /// Directory (or archive stem) name of the pack.
    pub name: String,
    /// Declared `pack_format`, if the descriptor carries an integer one.
    pub pack_format: Option<i64>,
    /// Declared description, if any.
    pub description: Option<String>,
    /// Whether the pack root contains a `pack.png`.
    pub has_icon: bool,
}

/// Check whether a directory is a valid resource pack.
///
/// A pack must contain a `pack.mcmeta` that parses as a JSON object with a
/// top-level `pack` key. Parse failures and I/O errors simply answer `false`;
/// this predicate is called repeatedly during discovery and must stay cheap
/// and side-effect-free.
pub fn is_valid_pack(path: &Utf8Path) -> bool {
    if !path.is_dir() {
        return false;
    }
    let Ok(raw) = std::fs::read_to_string(path.join(MCMETA_FILE_NAME)) else {
        return false;
    };
    matches!(
        serde_json::from_str::<serde_json::Value>(&raw),
        Ok(serde_json::Value::Object(map)) if map.contains_key("pack")
    )
}

impl PackInfo {
    /// Load the summary metadata for a pack.
    ///
    /// Never fails: a missing or malformed descriptor yields absent
    /// `pack_format` and `description` fields rather than an error.
    pub fn load(path: &Utf8Path) -> Self {
        let mcmeta_path = path.join(MCMETA_FILE_NAME);
        let mcmeta = match std::fs::read_to_string(&mcmeta_path) {
            Ok(raw) => match serde_json::from_str::<PackMcmeta>(&raw) {
                Ok(mcmeta) => Some(mcmeta),
                Err(err) => {
                    warn!(path = %mcmeta_path, %err, "malformed pack.mcmeta");
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            path: path.to_owned(),
            name: path.file_name().unwrap_or(path.as_str()).to_string(),
            pack_format: mcmeta.as_ref().and_then(PackMcmeta::pack_format),
            description: mcmeta.as_ref().and_then(PackMcmeta::description),
            has_icon: path.join(ICON_FILE_NAME).is_file(),
        }
    }
}
