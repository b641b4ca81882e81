use crate::csv_processor::reader::CsvRecordIterator;
use crate::utils::{LogSyncError, Result, DEFAULT_CHUNK_SIZE};
use csv::StringRecord;

/// A batch of consecutive data rows. `start_row` is the global zero-based
/// index of the first record, so indices never restart per chunk.
#[derive(Debug, Clone)]
pub struct RecordChunk {
    pub index: usize,
    pub start_row: usize,
    pub records: Vec<StringRecord>,
}

impl RecordChunk {
    pub fn end_row(&self) -> usize {
        self.start_row + self.records.len()
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Records paired with their global row index.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &StringRecord)> {
        self.records
            .iter()
            .enumerate()
            .map(move |(offset, record)| (self.start_row + offset, record))
    }

    /// Records from global row `row` onward; empty when the chunk ends first.
    pub fn from_row(&self, row: usize) -> &[StringRecord] {
        let skip = row.saturating_sub(self.start_row).min(self.records.len());
        &self.records[skip..]
    }
}

/// Streams a file's data rows in batches of at most `chunk_size` records.
pub struct RecordChunks {
    records: CsvRecordIterator,
    chunk_size: usize,
    next_chunk: usize,
    next_row: usize,
    done: bool,
}

impl RecordChunks {
    pub fn new(records: CsvRecordIterator, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(LogSyncError::ValidationError(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            records,
            chunk_size,
            next_chunk: 0,
            next_row: 0,
            done: false,
        })
    }
}

impl Iterator for RecordChunks {
    type Item = Result<RecordChunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut records = Vec::with_capacity(self.chunk_size.min(DEFAULT_CHUNK_SIZE));
        while records.len() < self.chunk_size {
            match self.records.next() {
                Some(Ok((_, record))) => records.push(record),
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if records.is_empty() {
            return None;
        }

        let chunk = RecordChunk {
            index: self.next_chunk,
            start_row: self.next_row,
            records,
        };
        self.next_chunk += 1;
        self.next_row = chunk.end_row();
        Some(Ok(chunk))
    }
}

pub fn string_record_to_vec(record: &StringRecord) -> Vec<String> {
    record.iter().map(|s| s.to_string()).collect()
}
