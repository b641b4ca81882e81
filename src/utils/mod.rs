pub mod config;
pub mod errors;
pub mod progress;

pub use config::{
    AppConfig, ExtractJob, SyncJob, DEFAULT_CHUNK_SIZE, DEFAULT_PREVIEW_ROWS,
};
pub use errors::{LogSyncError, Result};
pub use progress::ProgressTracker;

use std::ffi::OsString;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Opens an input file, reporting a missing path as `FileNotFound`.
pub fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LogSyncError::FileNotFound(path.display().to_string()),
        _ => LogSyncError::IoError(e),
    })
}

/// True when both paths resolve to the same existing file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Absolute form of `path` with the parent directory canonicalized, so that
/// `dir/run.csv` and `dir/sub/../run.csv` compare equal even when the file
/// does not exist yet. Falls back to `path` unchanged when the parent cannot
/// be resolved.
pub fn resolved_path(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (std::fs::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// `<stem>.csv` becomes `<stem><suffix>.csv`. Any other name gets
/// `<suffix>.csv` appended to the whole file name.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let is_csv = path.extension().map_or(false, |ext| ext == "csv");
    let base = if is_csv {
        path.file_stem()
    } else {
        path.file_name()
    };

    let mut name = base.map(OsString::from).unwrap_or_default();
    name.push(suffix);
    name.push(".csv");
    path.with_file_name(name)
}
