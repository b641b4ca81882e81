pub mod analyzer;
pub mod chunker;
pub mod extractor;
pub mod reader;
pub mod writer;

pub use analyzer::{analyze_csv, show_preview, CsvMetadata, CsvPreview};
pub use chunker::{RecordChunk, RecordChunks};
pub use extractor::{extract_columns, extract_output_path};
pub use reader::{count_rows, list_columns, CsvRecordIterator, CsvStreamReader};
pub use writer::{CsvStreamWriter, OutputGuard, WrittenFile};
