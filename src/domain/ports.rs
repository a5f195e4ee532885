use crate::domain::model::{Record, ReportName, ReportResult};
use crate::utils::error::Result;

/// Outbound contract: receives each named report, once, in emission order.
pub trait ReportSink {
    fn write(&mut self, report: ReportName, result: &ReportResult) -> Result<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn write(&mut self, report: ReportName, result: &ReportResult) -> Result<()> {
        (**self).write(report, result)
    }
}

/// Inbound contract: the engine side of a source adapter.
pub trait PipelineService {
    fn execute(&mut self, records: &[Record]) -> Result<()>;
}

/// A producer of a complete record batch.
pub trait RecordSource {
    fn load(&self) -> Result<Vec<Record>>;

    /// 讀取完整批次後交給引擎；讀取失敗時引擎不會收到任何資料
    fn submit(&self, service: &mut dyn PipelineService) -> Result<()> {
        let records = self.load()?;
        tracing::debug!("Submitting {} records", records.len());
        service.execute(&records)
    }
}
