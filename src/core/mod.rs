pub mod engine;
pub mod filters;
pub mod reports;

pub use crate::domain::model::{Record, ReportEntry, ReportName, ReportResult};
pub use crate::domain::ports::{PipelineService, RecordSource, ReportSink};
pub use crate::utils::error::Result;
pub use engine::{compute_report, compute_reports, TransformationEngine};
