//! Path classification for merge dispatch.
//!
//! Every payload file in a pack is mapped to a [`PathCategory`] by the shape
//! of its pack-relative path. Structured categories get a content-aware merge
//! (see [`strategy`](crate::strategy)); everything else is copied last-wins.

use camino::Utf8Path;

/// The two namespace roots that hold payload files. Anything outside them is
/// ignored by the merge entirely.
pub const PAYLOAD_ROOTS: [&str; 2] = ["assets", "data"];

/// How the merge engine handles one payload file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCategory {
    /// `assets/<ns>/lang/**.json` — translation tables, shallow key union.
    Lang,
    /// `assets/<ns>/sounds.json` — sound event index, shallow key union.
    SoundsIndex,
    /// `assets/<ns>/font/**.json` — `providers` list merge.
    FontDefinition,
    /// `assets/<ns>/atlases/**.json` — `sources` list merge.
    AtlasDefinition,
    /// `data/<ns>/tags/**.json` — `values` union plus `replace` intent.
    TagList,
    /// Everything else — verbatim copy, higher priority wins.
    Opaque,
}

/// Whether a pack-relative path lives under one of the payload roots.
pub fn is_payload_path(rel: &Utf8Path) -> bool {
    matches!(
        rel.components().next(),
        Some(first) if PAYLOAD_ROOTS.contains(&first.as_str())
    )
}

/// Classify a pack-relative path by positional segment matching.
pub fn classify(rel: &Utf8Path) -> PathCategory {
    let parts: Vec<&str> = rel.components().map(|c| c.as_str()).collect();
    let is_json = rel.extension() == Some("json");

    match parts.as_slice() {
        ["assets", _, "sounds.json", ..] => PathCategory::SoundsIndex,
        ["assets", _, "lang", rest @ ..] if !rest.is_empty() && is_json => PathCategory::Lang,
        ["assets", _, "font", rest @ ..] if !rest.is_empty() && is_json => {
            PathCategory::FontDefinition
        }
        ["assets", _, "atlases", rest @ ..] if !rest.is_empty() && is_json => {
            PathCategory::AtlasDefinition
        }
        ["data", _, "tags", rest @ ..] if !rest.is_empty() && is_json => PathCategory::TagList,
        _ => PathCategory::Opaque,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;

    fn category(path: &str) -> PathCategory {
        classify(Utf8Path::new(path))
    }

    #[test]
    fn classifies_lang_files() {
        assert_eq!(category("assets/minecraft/lang/en_us.json"), PathCategory::Lang);
        assert_eq!(
            category("assets/mymod/lang/nested/zh_cn.json"),
            PathCategory::Lang
        );
    }

    #[test]
    fn classifies_sounds_index() {
        assert_eq!(
            category("assets/minecraft/sounds.json"),
            PathCategory::SoundsIndex
        );
    }

    #[test]
    fn classifies_font_and_atlas_definitions() {
        assert_eq!(
            category("assets/minecraft/font/default.json"),
            PathCategory::FontDefinition
        );
        assert_eq!(
            category("assets/minecraft/atlases/blocks.json"),
            PathCategory::AtlasDefinition
        );
    }

    #[test]
    fn classifies_tag_lists_anywhere_under_tags() {
        assert_eq!(
            category("data/minecraft/tags/items/swords.json"),
            PathCategory::TagList
        );
        assert_eq!(
            category("data/mymod/tags/blocks/deep/nested/ores.json"),
            PathCategory::TagList
        );
    }

    #[test]
    fn non_json_extensions_are_opaque() {
        assert_eq!(
            category("assets/minecraft/lang/en_us.lang"),
            PathCategory::Opaque
        );
        assert_eq!(
            category("data/minecraft/tags/items/swords.txt"),
            PathCategory::Opaque
        );
    }

    #[test]
    fn textures_and_models_are_opaque() {
        assert_eq!(
            category("assets/minecraft/textures/block/stone.png"),
            PathCategory::Opaque
        );
        assert_eq!(
            category("assets/minecraft/models/item/stick.json"),
            PathCategory::Opaque
        );
    }

    #[test]
    fn payload_roots_are_assets_and_data() {
        assert!(is_payload_path(Utf8Path::new("assets/minecraft/x.png")));
        assert!(is_payload_path(Utf8Path::new("data/minecraft/tags/a.json")));
        assert!(!is_payload_path(Utf8Path::new("pack.mcmeta")));
        assert!(!is_payload_path(Utf8Path::new("extras/readme.txt")));
    }
}
