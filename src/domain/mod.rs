// Domain layer: records, report results and the two ports the engine talks through.

pub mod model;
pub mod ports;

pub use model::{Record, ReportEntry, ReportName, ReportResult};
pub use ports::{PipelineService, RecordSource, ReportSink};
