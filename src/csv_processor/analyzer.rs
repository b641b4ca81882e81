use crate::csv_processor::chunker::string_record_to_vec;
use crate::csv_processor::reader::CsvStreamReader;
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvMetadata {
    pub total_rows: usize,
    pub total_columns: usize,
    pub column_names: Vec<String>,
    pub file_size_bytes: u64,
    /// One JSON array per sampled row, positionally aligned to `column_names`.
    pub sample_data: Vec<JsonValue>,
}

pub fn analyze_csv(file_path: impl AsRef<Path>, sample_rows: usize) -> Result<CsvMetadata> {
    let file_path = file_path.as_ref();
    let mut reader = CsvStreamReader::new(file_path);

    let headers = reader.read_headers()?;
    let column_names = string_record_to_vec(&headers);
    let total_columns = column_names.len();

    let total_rows = reader.count_rows()?;

    let file_size_bytes = std::fs::metadata(file_path)?.len();

    let sample_data = reader
        .read_sample_rows(sample_rows)?
        .iter()
        .map(|record| {
            JsonValue::Array(
                record
                    .iter()
                    .map(|field| JsonValue::String(field.to_string()))
                    .collect(),
            )
        })
        .collect();

    Ok(CsvMetadata {
        total_rows,
        total_columns,
        column_names,
        file_size_bytes,
        sample_data,
    })
}

/// Header plus the first few data rows of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvPreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn show_preview(file_path: impl AsRef<Path>, num_rows: usize) -> Result<CsvPreview> {
    let mut reader = CsvStreamReader::new(file_path.as_ref());
    let headers = string_record_to_vec(&reader.read_headers()?);
    let rows = reader
        .read_sample_rows(num_rows)?
        .iter()
        .map(string_record_to_vec)
        .collect();
    Ok(CsvPreview { headers, rows })
}

impl fmt::Display for CsvPreview {
    /// Right-aligned columns with a leading row-index column.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = self
            .rows
            .iter()
            .map(|row| row.len())
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);

        let mut widths = vec![0usize; columns];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        let index_width = self.rows.len().saturating_sub(1).to_string().len();

        fn cell(row: &[String], i: usize) -> &str {
            row.get(i).map(String::as_str).unwrap_or("")
        }

        write!(f, "{:>w$}", "", w = index_width)?;
        for (i, width) in widths.iter().enumerate() {
            write!(f, "  {:>w$}", cell(&self.headers, i), w = *width)?;
        }
        for (index, row) in self.rows.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:>w$}", index, w = index_width)?;
            for (i, width) in widths.iter().enumerate() {
                write!(f, "  {:>w$}", cell(row, i), w = *width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LOG: &str = "t, pos\n10,1.5\n11,1.75\n12,2\n13,2.25\n14,2.5\n15,2.75\n";

    #[test]
    fn preview_limits_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, LOG).unwrap();

        let preview = show_preview(&path, 2).unwrap();
        assert_eq!(preview.headers, vec!["t", " pos"]);
        assert_eq!(
            preview.rows,
            vec![vec!["10", "1.5"], vec!["11", "1.75"]]
        );
    }

    #[test]
    fn preview_renders_aligned_table() {
        let preview = CsvPreview {
            headers: vec!["t".into(), " pos".into()],
            rows: vec![
                vec!["10".into(), "1.5".into()],
                vec!["11".into(), "1.75".into()],
            ],
        };

        assert_eq!(
            preview.to_string(),
            "    t   pos\n0  10   1.5\n1  11  1.75"
        );
    }

    #[test]
    fn analyze_reports_shape_and_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("log.csv");
        fs::write(&path, LOG).unwrap();

        let metadata = analyze_csv(&path, 1).unwrap();
        assert_eq!(metadata.total_rows, 6);
        assert_eq!(metadata.total_columns, 2);
        assert_eq!(metadata.file_size_bytes, LOG.len() as u64);
        assert_eq!(
            metadata.sample_data,
            vec![serde_json::json!(["10", "1.5"])]
        );
    }
}
