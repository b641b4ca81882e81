use crate::csv_processor::reader::CsvStreamReader;
use crate::sync::value::SyncValue;
use crate::utils::{LogSyncError, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Where the first row of file B lands in file A.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncPoint {
    /// Zero-based data-row index into file A.
    Found { index: usize, value: SyncValue },
    NotFound { value: SyncValue },
}

impl SyncPoint {
    pub fn index(&self) -> Option<usize> {
        match self {
            SyncPoint::Found { index, .. } => Some(*index),
            SyncPoint::NotFound { .. } => None,
        }
    }

    pub fn value(&self) -> &SyncValue {
        match self {
            SyncPoint::Found { value, .. } | SyncPoint::NotFound { value } => value,
        }
    }
}

/// Value of `sync_column` in the first data row of `path`.
pub fn read_sync_value(path: impl AsRef<Path>, sync_column: &str) -> Result<SyncValue> {
    let path = path.as_ref();
    let mut reader = CsvStreamReader::new(path);
    let column = reader.column_index(sync_column)?;

    let first = reader
        .iter_records()?
        .next()
        .transpose()?
        .ok_or_else(|| LogSyncError::NoDataRows(path.display().to_string()))?;
    let (_, record) = first;

    Ok(SyncValue::parse(record.get(column).unwrap_or("")))
}

/// Finds the first row of `file_a` whose `sync_column` equals that column in
/// the first data row of `file_b`. Rows are scanned in file order, one chunk
/// at a time; the first match wins.
pub fn find_sync_point(
    file_a: impl AsRef<Path>,
    file_b: impl AsRef<Path>,
    sync_column: &str,
    chunk_size: usize,
) -> Result<SyncPoint> {
    let file_a = file_a.as_ref();
    let file_b = file_b.as_ref();

    let target = read_sync_value(file_b, sync_column)?;
    debug!(file = %file_b.display(), value = %target, "Read sync value");

    let mut reader = CsvStreamReader::new(file_a);
    let column = reader.column_index(sync_column)?;

    for chunk in reader.chunks(chunk_size)? {
        let chunk = chunk?;
        let hit = chunk.indexed().find(|(_, record)| {
            let raw = record.get(column).unwrap_or("");
            target.may_match(raw) && SyncValue::parse(raw) == target
        });

        if let Some((index, _)) = hit {
            info!(file = %file_a.display(), index, value = %target, "Sync point found");
            return Ok(SyncPoint::Found {
                index,
                value: target,
            });
        }
        debug!(chunk = chunk.index, end_row = chunk.end_row(), "No sync value in chunk");
    }

    warn!(file = %file_a.display(), value = %target, "Sync value not found");
    Ok(SyncPoint::NotFound { value: target })
}
