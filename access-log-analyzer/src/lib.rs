//! Parses combined access-log lines and computes bot and traffic statistics.
//!
//! Lines go through a [`Pipeline`] into a [`RecordStore`]; [`Analytics`]
//! answers queries over the store and [`Report`] hands the results to a sink.

pub mod analytics;
pub mod error;
pub mod ingest;
pub mod invariants;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod prometheus;
pub mod report;
pub mod store;

pub use analytics::{Analytics, Tally};
pub use error::{AnalyticsError, ParseError};
pub use models::{LogRecord, Method};
pub use parser::LineParser;
pub use pipeline::{Diagnostic, Ingested, Pipeline};
pub use report::{Report, ReportFormat, ReportOptions};
pub use store::RecordStore;
