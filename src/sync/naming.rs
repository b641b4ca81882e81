use crate::utils::with_suffix;
use std::path::{Path, PathBuf};

pub const SYNC_SUFFIX: &str = "-sync";

/// Output name for a synced copy of `path`.
pub fn sync_output_path(path: impl AsRef<Path>) -> PathBuf {
    with_suffix(path.as_ref(), SYNC_SUFFIX)
}
