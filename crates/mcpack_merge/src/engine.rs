//! The merge engine.
//!
//! [`Merger`] applies every pack's contribution to the output tree in
//! ascending priority order (index 0 = lowest priority, last = highest).
//!
//! # Run algorithm
//!
//! 1. If `clean` is set and the output directory exists, remove it (reported
//!    only under dry-run).
//! 2. Select and copy the icon from the highest-priority pack that has one,
//!    then synthesize and write the output `pack.mcmeta`. Both happen before
//!    the payload merge so later per-file failures never block metadata.
//! 3. For each pack, lowest to highest priority, walk every file under its
//!    `assets`/`data` roots, skip exclusions, classify the relative path and
//!    dispatch to the matching strategy against the output tree.
//! 4. A failure on a single file increments `errors` and leaves that path's
//!    prior output state untouched; the run continues. There is no rollback;
//!    re-running with `clean` is the recovery path.

use camino::{Utf8Path, Utf8PathBuf};
use glob::Pattern;
use mcpack_meta::{PackMcmeta, FALLBACK_PACK_FORMAT, ICON_FILE_NAME, MCMETA_FILE_NAME};
use serde_json::Value;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::classify::{classify, is_payload_path, PathCategory};
use crate::error::{Error, Result};
use crate::json::{read_json, write_json};
use crate::pack::PackInfo;
use crate::strategy::{merge_list_field, merge_object_union, merge_tag_values};

/// Platform housekeeping files that are never merged.
const DEFAULT_EXCLUDES: [&str; 3] = [".DS_Store", "Thumbs.db", "desktop.ini"];

/// Per-run configuration, built once by the caller and threaded through
/// every operation. Never mutated during a run.
#[derive(Debug, Default)]
pub struct MergeOptions {
    /// Report planned actions without touching the filesystem.
    pub dry_run: bool,
    /// Remove the output directory before merging.
    pub clean: bool,
    /// Caller-supplied exclusion globs, matched against the pack-relative path.
    pub exclude_patterns: Vec<Pattern>,
    /// Use this `pack_format` verbatim instead of the maximum declared one.
    pub pack_format_override: Option<i64>,
    /// Use this description instead of the synthesized one (ignored if empty).
    pub description_override: Option<String>,
}

/// Counters for one merge run.
///
/// Every processed pack-path increments exactly one counter. A structured
/// merge that fails lands in `errors`, not `merged_json`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// Files written to a previously absent output path.
    pub copied: u64,
    /// Opaque files replacing existing output content.
    pub overwritten: u64,
    /// Structured files combined with existing output content.
    pub merged_json: u64,
    /// Files skipped by an exclusion rule or absent source.
    pub skipped: u64,
    /// Per-file failures (parse or write); the run continues past them.
    pub errors: u64,
}

/// Merges an ordered list of packs into one output tree.
///
/// Create with [`new`](Self::new), call [`run`](Self::run) once, then read
/// the counters via [`stats`](Self::stats). The pack order **is** the
/// conflict-resolution contract: processing is strictly sequential, one pack
/// at a time, one file at a time.
pub struct Merger {
    packs: Vec<PackInfo>,
    out_dir: Utf8PathBuf,
    options: MergeOptions,
    stats: MergeStats,
}

impl Merger {
    /// Create a merger over packs ordered lowest to highest priority.
    pub fn new(packs: Vec<PackInfo>, out_dir: Utf8PathBuf, options: MergeOptions) -> Self {
        Self {
            packs,
            out_dir,
            options,
            stats: MergeStats::default(),
        }
    }

    /// Counters accumulated by the last [`run`](Self::run).
    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Execute the merge.
    ///
    /// Only pre-flight conditions fail the run as a whole; individual file
    /// failures are counted under `errors` and logged.
    pub fn run(&mut self) -> Result<()> {
        if self.packs.is_empty() {
            return Err(Error::NoPacks);
        }

        if self.options.clean && self.out_dir.exists() {
            if self.options.dry_run {
                info!("dry-run: would remove output directory {}", self.out_dir);
            } else {
                std::fs::remove_dir_all(&self.out_dir)?;
            }
        }
        if !self.options.dry_run {
            std::fs::create_dir_all(&self.out_dir)?;
        }

        self.write_icon()?;
        self.write_mcmeta()?;

        let packs = self.packs.clone();
        for (priority, pack) in packs.iter().enumerate() {
            debug!(priority, pack = %pack.name, "merging pack");
            for rel in payload_files(&pack.path) {
                self.process_file(&pack.path, &rel);
            }
        }

        info!(stats = ?self.stats, "merge complete");
        Ok(())
    }

    fn is_excluded(&self, rel: &Utf8Path) -> bool {
        if rel
            .file_name()
            .is_some_and(|name| DEFAULT_EXCLUDES.contains(&name))
        {
            return true;
        }
        self.options
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches(rel.as_str()))
    }

    fn process_file(&mut self, pack_root: &Utf8Path, rel: &Utf8Path) {
        if self.is_excluded(rel) {
            self.stats.skipped += 1;
            return;
        }
        let src = pack_root.join(rel);
        let dest = self.out_dir.join(rel);

        match classify(rel) {
            PathCategory::Lang | PathCategory::SoundsIndex => {
                self.merge_structured(&src, &dest, merge_object_union)
            }
            PathCategory::FontDefinition => {
                self.merge_structured(&src, &dest, |d, s| merge_list_field(d, s, "providers"))
            }
            PathCategory::AtlasDefinition => {
                self.merge_structured(&src, &dest, |d, s| merge_list_field(d, s, "sources"))
            }
            PathCategory::TagList => self.merge_structured(&src, &dest, merge_tag_values),
            PathCategory::Opaque => self.copy_last_wins(&src, &dest),
        }
    }

    /// Shared driver for the structured categories.
    ///
    /// An absent destination takes the source document verbatim (`copied`);
    /// otherwise `combine` produces the replacement (`merged_json`). Any
    /// parse or write failure on this one file increments `errors`, leaves
    /// the destination's prior bytes intact, and returns.
    fn merge_structured(
        &mut self,
        src: &Utf8Path,
        dest: &Utf8Path,
        combine: impl Fn(Value, &Value) -> Value,
    ) {
        let src_doc = match read_json(src) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                self.stats.skipped += 1;
                return;
            }
            Err(err) => {
                warn!("failed to read {src}: {err}");
                self.stats.errors += 1;
                return;
            }
        };

        let dest_doc = match read_json(dest) {
            Ok(doc) => doc,
            Err(err) => {
                warn!("failed to read existing {dest}: {err}");
                self.stats.errors += 1;
                return;
            }
        };

        match dest_doc {
            None => {
                if self.options.dry_run {
                    info!("dry-run: would create {dest} (from {src})");
                } else if let Err(err) = write_json(dest, &src_doc) {
                    warn!("failed to write {dest}: {err}");
                    self.stats.errors += 1;
                    return;
                }
                self.stats.copied += 1;
            }
            Some(existing) => {
                let merged = combine(existing, &src_doc);
                if self.options.dry_run {
                    info!("dry-run: would merge into {dest} (from {src})");
                } else if let Err(err) = write_json(dest, &merged) {
                    warn!("failed to write {dest}: {err}");
                    self.stats.errors += 1;
                    return;
                }
                self.stats.merged_json += 1;
            }
        }
    }

    /// Verbatim copy for opaque files: the later (higher-priority) source
    /// always wins, with no content inspection.
    fn copy_last_wins(&mut self, src: &Utf8Path, dest: &Utf8Path) {
        if !src.exists() {
            self.stats.skipped += 1;
            return;
        }
        let overwrite = dest.exists();

        if self.options.dry_run {
            let action = if overwrite { "overwrite" } else { "copy" };
            info!("dry-run: would {action} {dest} (from {src})");
        } else {
            let copy = || -> Result<()> {
                if let Some(parent) = dest.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::copy(src, dest)?;
                Ok(())
            };
            if let Err(err) = copy() {
                warn!("failed to copy {src} -> {dest}: {err}");
                self.stats.errors += 1;
                return;
            }
        }

        if overwrite {
            self.stats.overwritten += 1;
        } else {
            self.stats.copied += 1;
        }
    }

    /// Copy `pack.png` from the highest-priority pack that has one. No pack
    /// having an icon is not an error.
    fn write_icon(&self) -> Result<()> {
        for pack in self.packs.iter().rev() {
            let src = pack.path.join(ICON_FILE_NAME);
            if !src.is_file() {
                continue;
            }
            if self.options.dry_run {
                info!("dry-run: would copy {ICON_FILE_NAME} from '{}'", pack.name);
            } else {
                std::fs::copy(&src, self.out_dir.join(ICON_FILE_NAME))?;
            }
            return Ok(());
        }
        Ok(())
    }

    /// Synthesize and write the output descriptor.
    ///
    /// Format version: the override verbatim, else the maximum declared one,
    /// else the known-good fallback. Description: the override when present
    /// and non-empty, else a generated `Merged: a + b + ...` string joining
    /// the pack names in priority order.
    fn write_mcmeta(&self) -> Result<()> {
        let pack_format = self.options.pack_format_override.unwrap_or_else(|| {
            self.packs
                .iter()
                .filter_map(|pack| pack.pack_format)
                .max()
                .unwrap_or(FALLBACK_PACK_FORMAT)
        });

        let description = match &self.options.description_override {
            Some(desc) if !desc.is_empty() => desc.clone(),
            _ => {
                let names: Vec<&str> = self.packs.iter().map(|pack| pack.name.as_str()).collect();
                format!("Merged: {}", names.join(" + "))
            }
        };

        if self.options.dry_run {
            info!("dry-run: would write {MCMETA_FILE_NAME} with pack_format={pack_format}");
            return Ok(());
        }
        let mcmeta = PackMcmeta::synthesized(pack_format, description);
        write_json(
            &self.out_dir.join(MCMETA_FILE_NAME),
            &serde_json::to_value(&mcmeta)?,
        )
    }
}

/// Collect the pack-relative paths of all payload files (files under the
/// pack's `assets` and `data` roots), sorted for deterministic processing.
/// Unreadable entries are skipped with a warning.
fn payload_files(pack_root: &Utf8Path) -> Vec<Utf8PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(pack_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "skipping unreadable payload entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let rel =
            Utf8Path::from_path(entry.path()).and_then(|path| path.strip_prefix(pack_root).ok());
        match rel {
            Some(rel) if is_payload_path(rel) => files.push(rel.to_owned()),
            Some(_) => {}
            None => warn!("skipping non-UTF-8 path {}", entry.path().display()),
        }
    }
    files
}
