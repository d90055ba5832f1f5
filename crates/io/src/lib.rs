// File I/O: tabular sources in, reconciliation report out

pub mod csv;
pub mod report;
pub mod source;
pub mod table;
pub mod xlsx;

pub use report::write_report;
pub use source::{load_production, load_schedule, read_table, sheet_names};
pub use table::RawTable;
