//! Resource pack merge engine.
//!
//! This crate merges multiple Minecraft resource packs into a single output
//! tree, resolving conflicts by an explicit priority order instead of
//! arbitrary last-write-wins. It supports:
//!
//! - **Pack discovery**: directories and `.zip` archives, with bounded
//!   nested-root search inside extracted archives
//! - **Content-aware merging**: lang tables, `sounds.json`, font providers,
//!   atlas sources and tag lists are combined structurally; everything else
//!   is copied last-wins
//! - **Metadata synthesis**: a fresh `pack.mcmeta` and the highest-priority
//!   pack icon
//! - **Per-file error containment**: one broken file never aborts a run
//!
//! # Example
//!
//! ```no_run
//! use camino::{Utf8Path, Utf8PathBuf};
//! use mcpack_merge::{discover_packs, MergeOptions, Merger, PackInfo};
//!
//! # fn main() -> mcpack_merge::Result<()> {
//! let root = Utf8Path::new("/packs");
//! let packs: Vec<PackInfo> = discover_packs(root, None)?
//!     .iter()
//!     .map(|path| PackInfo::load(path))
//!     .collect();
//!
//! let mut merger = Merger::new(
//!     packs,
//!     Utf8PathBuf::from("/packs/merged_pack"),
//!     MergeOptions::default(),
//! );
//! merger.run()?;
//! println!("merged with {} errors", merger.stats().errors);
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod classify;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod json;
pub mod pack;
pub mod strategy;

// Re-export main types
pub use classify::{classify, is_payload_path, PathCategory};
pub use discovery::{discover_packs, order_packs};
pub use engine::{MergeOptions, MergeStats, Merger};
pub use error::{Error, Result};
pub use pack::{is_valid_pack, PackInfo};
