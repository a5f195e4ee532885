use crate::domain::{ReportName, ReportResult, ReportSink};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    report: ReportName,
    generated_at: DateTime<Utc>,
    result: &'a ReportResult,
}

/// Writes `<output_path>/<report>.json` for every report.
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    output_path: PathBuf,
}

impl JsonReportWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn report_path(&self, report: ReportName) -> PathBuf {
        self.output_path.join(format!("{}.json", report))
    }
}

impl ReportSink for JsonReportWriter {
    fn write(&mut self, report: ReportName, result: &ReportResult) -> Result<()> {
        fs::create_dir_all(&self.output_path)?;

        let document = ReportDocument {
            report,
            generated_at: Utc::now(),
            result,
        };
        let json = serde_json::to_string_pretty(&document)?;

        let path = self.report_path(report);
        fs::write(&path, json)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReportEntry;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_file_per_report() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = JsonReportWriter::new(temp_dir.path().join("reports"));

        writer
            .write(
                ReportName::ContinentContribution,
                &ReportResult::Entries(vec![ReportEntry::new("X", 30.0)]),
            )
            .unwrap();

        let path = writer.report_path(ReportName::ContinentContribution);
        assert!(path.ends_with("continent_contribution.json"));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["report"], "continent_contribution");
        assert_eq!(written["result"]["kind"], "entries");
        assert_eq!(written["result"]["data"][0]["label"], "X");
        assert_eq!(written["result"]["data"][0]["value"], 30.0);
        assert!(written["generated_at"].is_string());
    }
}
