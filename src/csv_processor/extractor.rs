use crate::csv_processor::reader::CsvStreamReader;
use crate::csv_processor::writer::CsvStreamWriter;
use crate::utils::{same_file, with_suffix, LogSyncError, ProgressTracker, Result};
use csv::StringRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const EXTRACT_SUFFIX: &str = "-mod";

/// Writes `columns` (in the requested order) of every data row of `input`
/// to `output`, streaming `chunk_size` rows at a time. Returns rows written.
///
/// All requested names are resolved against the header before `output` is
/// touched; a missing name fails without creating the file. Field text is
/// copied verbatim.
pub fn extract_columns(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    columns: &[String],
    chunk_size: usize,
) -> Result<usize> {
    let input = input.as_ref();
    let output = output.as_ref();

    if columns.is_empty() {
        return Err(LogSyncError::ValidationError(
            "no columns requested for extraction".to_string(),
        ));
    }

    if same_file(input, output) {
        return Err(LogSyncError::ValidationError(format!(
            "output {} would overwrite its input",
            output.display()
        )));
    }

    let mut reader = CsvStreamReader::new(input);
    let indices = columns
        .iter()
        .map(|column| reader.column_index(column))
        .collect::<Result<Vec<usize>>>()?;
    let chunks = reader.chunks(chunk_size)?;
    let total_rows = reader.count_rows()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        columns = columns.len(),
        total_rows,
        "Extracting columns"
    );

    let mut writer = CsvStreamWriter::new(output, StringRecord::from(columns.to_vec()));
    writer.initialize()?;
    let mut progress = ProgressTracker::new("extract columns", total_rows);

    for chunk in chunks {
        let chunk = chunk?;
        for record in &chunk.records {
            writer.write_row(indices.iter().map(|&i| record.get(i).unwrap_or("")))?;
        }
        debug!(chunk = chunk.index, rows = chunk.row_count(), "Extracted chunk");
        progress.advance(chunk.row_count());
    }

    let written = writer.finish()?;
    let rows = written.rows_written;
    written.commit();
    progress.finish();

    Ok(rows)
}

/// `<stem>.csv` becomes `<stem>-mod.csv`.
pub fn extract_output_path(input: impl AsRef<Path>) -> PathBuf {
    with_suffix(input.as_ref(), EXTRACT_SUFFIX)
}
