use crate::domain::{ReportName, ReportResult, ReportSink};
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;

/// Writes `<output_path>/<report>.csv`; label lists get a single `label` column.
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    output_path: PathBuf,
}

impl CsvReportWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn report_path(&self, report: ReportName) -> PathBuf {
        self.output_path.join(format!("{}.csv", report))
    }
}

impl ReportSink for CsvReportWriter {
    fn write(&mut self, report: ReportName, result: &ReportResult) -> Result<()> {
        fs::create_dir_all(&self.output_path)?;
        let path = self.report_path(report);
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)?;

        match result {
            ReportResult::Entries(entries) => {
                writer.write_record(["label", "value"])?;
                for entry in entries {
                    let value = entry.value.to_string();
                    writer.write_record([entry.label.as_str(), value.as_str()])?;
                }
            }
            ReportResult::Single(entry) => {
                writer.write_record(["label", "value"])?;
                if let Some(entry) = entry {
                    let value = entry.value.to_string();
                    writer.write_record([entry.label.as_str(), value.as_str()])?;
                }
            }
            ReportResult::Labels(labels) => {
                writer.write_record(["label"])?;
                for label in labels {
                    writer.write_record([label])?;
                }
            }
        }

        writer.flush()?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}
