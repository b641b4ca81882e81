pub mod csv_processor;
pub mod sync;
pub mod utils;

pub use csv_processor::{
    analyze_csv, count_rows, extract_columns, extract_output_path, list_columns, show_preview,
    CsvMetadata, CsvPreview, CsvStreamReader, CsvStreamWriter, RecordChunk, RecordChunks,
};
pub use sync::{
    create_synced_data, find_sync_point, sync_output_path, SyncOutcome, SyncPoint, SyncReport,
    SyncValue, SyncedDatasetBuilder,
};
pub use utils::{AppConfig, LogSyncError, ProgressTracker, Result, DEFAULT_CHUNK_SIZE};
