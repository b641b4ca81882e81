use crate::utils::{LogSyncError, Result};
use csv::{StringRecord, Writer};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Removes the file at `path` when dropped, unless committed first.
#[derive(Debug)]
pub struct OutputGuard {
    path: PathBuf,
    committed: bool,
}

impl OutputGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            committed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn commit(mut self) -> PathBuf {
        self.committed = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed partial output"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to remove partial output")
            }
        }
    }
}

/// A completely written output that is still removed on drop until
/// [`WrittenFile::commit`] is called.
#[derive(Debug)]
pub struct WrittenFile {
    pub rows_written: usize,
    guard: OutputGuard,
}

impl WrittenFile {
    pub fn path(&self) -> &Path {
        self.guard.path()
    }

    pub fn commit(self) -> PathBuf {
        self.guard.commit()
    }
}

pub struct CsvStreamWriter {
    path: PathBuf,
    headers: StringRecord,
    writer: Option<Writer<File>>,
    guard: Option<OutputGuard>,
    rows_written: usize,
}

impl CsvStreamWriter {
    pub fn new(path: impl Into<PathBuf>, headers: StringRecord) -> Self {
        Self {
            path: path.into(),
            headers,
            writer: None,
            guard: None,
            rows_written: 0,
        }
    }

    /// Creates (or truncates) the output and writes the header.
    pub fn initialize(&mut self) -> Result<()> {
        let file = File::create(&self.path)?;
        if self.guard.is_none() {
            self.guard = Some(OutputGuard::new(&self.path));
        }
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        writer.write_record(&self.headers)?;
        self.writer = Some(writer);
        Ok(())
    }

    fn writer(&mut self) -> Result<&mut Writer<File>> {
        self.writer.as_mut().ok_or_else(|| {
            LogSyncError::IoError(std::io::Error::new(
                ErrorKind::NotConnected,
                "Writer not initialized",
            ))
        })
    }

    pub fn write_record(&mut self, record: &StringRecord) -> Result<()> {
        self.writer()?.write_record(record)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_records(&mut self, records: &[StringRecord]) -> Result<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    pub fn write_row<I, T>(&mut self, row: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer()?.write_record(row)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Flushes and closes the file. The returned handle still owns cleanup.
    pub fn finish(mut self) -> Result<WrittenFile> {
        self.flush()?;
        self.writer.take();
        let guard = self.guard.take().ok_or_else(|| {
            LogSyncError::IoError(std::io::Error::new(
                ErrorKind::NotConnected,
                "Writer not initialized",
            ))
        })?;
        Ok(WrittenFile {
            rows_written: self.rows_written,
            guard,
        })
    }
}
