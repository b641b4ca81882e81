pub mod builder;
pub mod finder;
pub mod naming;
pub mod value;

pub use builder::{create_synced_data, SyncOutcome, SyncReport, SyncedDatasetBuilder};
pub use finder::{find_sync_point, read_sync_value, SyncPoint};
pub use naming::{sync_output_path, SYNC_SUFFIX};
pub use value::SyncValue;
