pub mod filter;
pub mod storage;
pub mod types;

pub use filter::{filter_records, RecordFilter};
pub use storage::{get_store_path, load_log, save_log};
pub use types::{EvaluationLog, EvaluationRecord, LOG_VERSION};
