//! `threadline-recon` - schedule/production reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded schedule and production records,
//! returns one match result per schedule row. No CLI or file IO.

pub mod columns;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod model;
pub mod normalize;
pub mod query;
pub mod status;
pub mod summary;

pub use config::ReconConfig;
pub use engine::{reconcile, run, ReconReport};
pub use error::{FailureReport, ReconError};
pub use index::{build_index, LookupIndex};
pub use model::{MatchResult, ProductionRecord, ScheduleRecord, UnmatchedReason};
pub use query::find_job_pos;
pub use status::{StatusSink, TracingSink};
