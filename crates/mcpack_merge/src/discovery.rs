//! Candidate pack discovery under a root directory.
//!
//! Discovery walks the immediate children of a root: directories passing the
//! pack validator become candidates directly, and `.zip` archives are
//! expanded into a scratch area (when one is provided) and searched for a
//! pack root. A broken candidate never aborts discovery; it is skipped with
//! a warning.

use camino::{Utf8Path, Utf8PathBuf};
use mcpack_meta::MERGED_PACK_PREFIX;
use tracing::{debug, warn};

use crate::archive::extract_zip_pack;
use crate::error::Result;
use crate::pack::{is_valid_pack, PackInfo};

/// Maximum depth searched below an extraction root for a nested pack root.
const MAX_NESTED_DEPTH: usize = 3;

/// Discover valid resource packs among the immediate children of `root`.
///
/// `.zip` children are only considered when `scratch_dir` is given; each is
/// expanded into a fresh subdirectory of the scratch area named after the
/// archive's stem. Children carrying the reserved output prefix are skipped
/// so a prior run's output is never re-ingested. The result is sorted
/// case-insensitively by name for deterministic default ordering.
pub fn discover_packs(
    root: &Utf8Path,
    scratch_dir: Option<&Utf8Path>,
) -> Result<Vec<Utf8PathBuf>> {
    let mut found = Vec::new();

    for entry in root.read_dir_utf8()? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(%err, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path().to_owned();
        if entry.file_name().starts_with(MERGED_PACK_PREFIX) {
            debug!(%path, "skipping reserved output candidate");
            continue;
        }

        if path.is_dir() {
            if is_valid_pack(&path) {
                found.push(path);
            }
        } else if let Some(scratch) = scratch_dir {
            let is_zip = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
            if !is_zip {
                continue;
            }
            match extract_zip_pack(&path, scratch) {
                Ok(extract_root) => match find_pack_root(&extract_root) {
                    Some(pack_root) => found.push(pack_root),
                    None => warn!(archive = %path, "no valid pack found inside archive"),
                },
                Err(err) => warn!(archive = %path, %err, "failed to extract archive"),
            }
        }
    }

    found.sort_by_key(|path| path.file_name().unwrap_or_default().to_lowercase());
    Ok(found)
}

/// Locate the pack root within an extraction tree.
///
/// The extraction root itself wins if valid. Otherwise a depth-limited
/// pre-order traversal with an explicit frontier finds the first valid pack;
/// archives often wrap the pack in an extra top-level folder.
fn find_pack_root(extract_root: &Utf8Path) -> Option<Utf8PathBuf> {
    if is_valid_pack(extract_root) {
        return Some(extract_root.to_owned());
    }

    let mut frontier: Vec<(Utf8PathBuf, usize)> = Vec::new();
    for child in subdirs(extract_root).into_iter().rev() {
        frontier.push((child, 1));
    }

    while let Some((dir, depth)) = frontier.pop() {
        if is_valid_pack(&dir) {
            return Some(dir);
        }
        if depth >= MAX_NESTED_DEPTH {
            continue;
        }
        for child in subdirs(&dir).into_iter().rev() {
            frontier.push((child, depth + 1));
        }
    }

    None
}

fn subdirs(dir: &Utf8Path) -> Vec<Utf8PathBuf> {
    let Ok(entries) = dir.read_dir_utf8() else {
        return Vec::new();
    };
    entries
        .flatten()
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .map(|entry| entry.path().to_owned())
        .collect()
}

/// Apply an explicit priority ordering by pack name.
///
/// Names in `explicit` that match no discovered pack are ignored; discovered
/// packs absent from the ordering are appended at the high-priority end in
/// their original (discovery) order. An empty ordering leaves the input
/// untouched.
pub fn order_packs(packs: Vec<PackInfo>, explicit: &[String]) -> Vec<PackInfo> {
    if explicit.is_empty() {
        return packs;
    }

    let mut remaining: Vec<Option<PackInfo>> = packs.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(remaining.len());

    for name in explicit {
        let slot = remaining
            .iter_mut()
            .find(|slot| slot.as_ref().is_some_and(|pack| &pack.name == name));
        match slot {
            Some(slot) => ordered.extend(slot.take()),
            None => debug!(%name, "ordering references unknown pack"),
        }
    }
    ordered.extend(remaining.into_iter().flatten());
    ordered
}
