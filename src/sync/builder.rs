use crate::csv_processor::reader::{count_rows, CsvStreamReader};
use crate::csv_processor::writer::{CsvStreamWriter, WrittenFile};
use crate::sync::finder::{find_sync_point, SyncPoint};
use crate::sync::naming::sync_output_path;
use crate::sync::value::SyncValue;
use crate::utils::progress::DEFAULT_LOG_EVERY_PERCENT;
use crate::utils::{
    resolved_path, same_file, LogSyncError, ProgressTracker, Result, DEFAULT_CHUNK_SIZE,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    pub sync_index: usize,
    pub sync_value: SyncValue,
    pub output_a: PathBuf,
    pub output_b: PathBuf,
    pub rows_a: usize,
    pub rows_b: usize,
}

impl SyncReport {
    pub fn lengths_match(&self) -> bool {
        self.rows_a == self.rows_b
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// Nothing was written.
    NoSyncPoint { value: SyncValue },
    Synced(SyncReport),
}

impl SyncOutcome {
    pub fn report(&self) -> Option<&SyncReport> {
        match self {
            SyncOutcome::Synced(report) => Some(report),
            SyncOutcome::NoSyncPoint { .. } => None,
        }
    }
}

/// Aligns two logs on a shared column.
///
/// File A is rewritten from its sync point onward and file B is copied
/// whole, each to a `-sync.csv` sibling. Both outputs are removed again if
/// anything fails before they are complete. A row-count mismatch between the
/// outputs is reported, not treated as an error.
#[derive(Debug, Clone)]
pub struct SyncedDatasetBuilder {
    file_a: PathBuf,
    file_b: PathBuf,
    sync_column: String,
    chunk_size: usize,
    log_every_percent: u8,
}

impl SyncedDatasetBuilder {
    pub fn new(
        file_a: impl Into<PathBuf>,
        file_b: impl Into<PathBuf>,
        sync_column: impl Into<String>,
    ) -> Self {
        Self {
            file_a: file_a.into(),
            file_b: file_b.into(),
            sync_column: sync_column.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            log_every_percent: DEFAULT_LOG_EVERY_PERCENT,
        }
    }

    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn log_every_percent(mut self, percent: u8) -> Self {
        self.log_every_percent = percent;
        self
    }

    pub fn output_a(&self) -> PathBuf {
        sync_output_path(&self.file_a)
    }

    pub fn output_b(&self) -> PathBuf {
        sync_output_path(&self.file_b)
    }

    fn check_paths(&self) -> Result<()> {
        let output_a = resolved_path(&self.output_a());
        let output_b = resolved_path(&self.output_b());
        let clash = output_a == output_b
            || output_a == resolved_path(&self.file_b)
            || output_b == resolved_path(&self.file_a)
            || same_file(&self.file_a, &self.file_b)
            || same_file(&output_a, &self.file_b)
            || same_file(&output_b, &self.file_a);
        if clash {
            return Err(LogSyncError::ValidationError(format!(
                "sync outputs for {} and {} would collide with each other or with an input",
                self.file_a.display(),
                self.file_b.display()
            )));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<SyncOutcome> {
        self.check_paths()?;

        let point = find_sync_point(
            &self.file_a,
            &self.file_b,
            &self.sync_column,
            self.chunk_size,
        )?;
        let (sync_index, sync_value) = match point {
            SyncPoint::Found { index, value } => (index, value),
            SyncPoint::NotFound { value } => {
                warn!(
                    file_a = %self.file_a.display(),
                    file_b = %self.file_b.display(),
                    "No sync point, no output written"
                );
                return Ok(SyncOutcome::NoSyncPoint { value });
            }
        };

        let written_a = self.copy_from(&self.file_a, self.output_a(), sync_index, "trim file A")?;
        let written_b = self.copy_from(&self.file_b, self.output_b(), 0, "copy file B")?;

        let rows_a = count_rows(written_a.path())?;
        let rows_b = count_rows(written_b.path())?;

        let report = SyncReport {
            sync_index,
            sync_value,
            output_a: written_a.commit(),
            output_b: written_b.commit(),
            rows_a,
            rows_b,
        };

        if report.lengths_match() {
            info!(
                output_a = %report.output_a.display(),
                output_b = %report.output_b.display(),
                rows = rows_a,
                "Synced files created"
            );
        } else {
            warn!(
                output_a = %report.output_a.display(),
                output_b = %report.output_b.display(),
                rows_a,
                rows_b,
                "Synced files differ in length"
            );
        }

        Ok(SyncOutcome::Synced(report))
    }

    /// Copies the header and every data row from index `start` onward.
    fn copy_from(
        &self,
        input: &Path,
        output: PathBuf,
        start: usize,
        label: &str,
    ) -> Result<WrittenFile> {
        let mut reader = CsvStreamReader::new(input);
        let headers = reader.read_headers()?;
        let chunks = reader.chunks(self.chunk_size)?;
        let total_rows = reader.count_rows()?;

        let mut writer = CsvStreamWriter::new(output, headers);
        writer.initialize()?;
        let mut progress = ProgressTracker::with_interval(label, total_rows, self.log_every_percent);
        progress.advance(start.min(total_rows));

        for chunk in chunks {
            let chunk = chunk?;
            if chunk.end_row() <= start {
                continue;
            }
            let rows = chunk.from_row(start);
            writer.write_records(rows)?;
            debug!(chunk = chunk.index, rows = rows.len(), "Copied chunk");
            progress.advance(rows.len());
        }

        let written = writer.finish()?;
        progress.finish();
        Ok(written)
    }
}

/// Trims `file_a` to the row matching the first row of `file_b` and writes
/// both files to `-sync.csv` siblings.
pub fn create_synced_data(
    file_a: impl AsRef<Path>,
    file_b: impl AsRef<Path>,
    sync_column: &str,
    chunk_size: usize,
) -> Result<SyncOutcome> {
    SyncedDatasetBuilder::new(file_a.as_ref(), file_b.as_ref(), sync_column)
        .chunk_size(chunk_size)
        .build()
}
