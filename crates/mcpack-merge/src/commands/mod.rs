mod info;
mod merge;

pub use info::{info_pack, InfoPackArgs};
pub use merge::{merge_packs, MergePacksArgs};
