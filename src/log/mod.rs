//! Log parsing for the runtime's wave/job profiling log.

pub mod parse;
pub mod row;

pub use parse::parse_log_file;
pub use row::{JobRecord, JobTable, ProfileLog, WaveTable};
