use crate::csv_processor::chunker::RecordChunks;
use crate::utils::{open_input, LogSyncError, Result};
use csv::StringRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Rows are positional and assumed to match the header width, but short or
/// long rows are passed through rather than rejected.
pub(crate) fn csv_reader(file: File) -> csv::Reader<File> {
    csv::ReaderBuilder::new().flexible(true).from_reader(file)
}

pub struct CsvStreamReader {
    path: PathBuf,
    headers: Option<StringRecord>,
}

impl CsvStreamReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            headers: None,
        }
    }

    pub fn read_headers(&mut self) -> Result<StringRecord> {
        let mut reader = csv_reader(open_input(&self.path)?);
        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(LogSyncError::EmptyHeader(self.path.display().to_string()));
        }
        self.headers = Some(headers.clone());
        Ok(headers)
    }

    /// Position of `column` in the header, matched byte for byte.
    pub fn column_index(&mut self, column: &str) -> Result<usize> {
        let headers = match self.headers.clone() {
            Some(h) => h,
            None => self.read_headers()?,
        };
        headers
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| LogSyncError::column_not_found(column, &self.path))
    }

    /// Physical lines after the header. A last line without a trailing
    /// newline still counts; a trailing newline adds nothing.
    pub fn count_rows(&self) -> Result<usize> {
        let reader = BufReader::new(open_input(&self.path)?);
        let mut lines = 0usize;
        for line in reader.split(b'\n') {
            line?;
            lines += 1;
        }
        Ok(lines.saturating_sub(1))
    }

    pub fn read_sample_rows(&self, n: usize) -> Result<Vec<StringRecord>> {
        let mut reader = csv_reader(open_input(&self.path)?);
        let mut rows = Vec::with_capacity(n);

        for result in reader.records().take(n) {
            rows.push(result?);
        }

        Ok(rows)
    }

    pub fn iter_records(&self) -> Result<CsvRecordIterator> {
        let reader = csv_reader(open_input(&self.path)?);
        Ok(CsvRecordIterator {
            reader,
            current_index: 0,
        })
    }

    pub fn chunks(&self, chunk_size: usize) -> Result<RecordChunks> {
        RecordChunks::new(self.iter_records()?, chunk_size)
    }
}

pub struct CsvRecordIterator {
    reader: csv::Reader<File>,
    current_index: usize,
}

impl Iterator for CsvRecordIterator {
    type Item = Result<(usize, StringRecord)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                let index = self.current_index;
                self.current_index += 1;
                Some(Ok((index, record)))
            }
            Ok(false) => None,
            Err(e) => Some(Err(LogSyncError::CsvError(e))),
        }
    }
}

/// Number of data rows in `path` (total lines minus the header).
pub fn count_rows(path: impl AsRef<Path>) -> Result<usize> {
    CsvStreamReader::new(path.as_ref()).count_rows()
}

/// Header field names in file order. Reads no data rows.
pub fn list_columns(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let headers = CsvStreamReader::new(path.as_ref()).read_headers()?;
    Ok(headers.iter().map(|s| s.to_string()).collect())
}
