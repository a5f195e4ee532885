use crate::domain::{ReportEntry, ReportName, ReportResult, ReportSink};
use crate::utils::error::{EtlError, Result};
use std::io::{self, Stdout, Write};

const RULE_WIDTH: usize = 70;

/// Plain text sink: one titled section per report.
pub struct ConsoleWriter<W: Write> {
    out: W,
}

impl ConsoleWriter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn title(report: ReportName) -> &'static str {
        match report {
            ReportName::Top10 => "🏆 Top 10 Countries by GDP (Selected Continent & Year)",
            ReportName::Bottom10 => "📉 Bottom 10 Countries by GDP (Selected Continent & Year)",
            ReportName::GdpGrowthRate => {
                "📈 GDP Growth Rate per Country (Selected Continent & Date Range)"
            }
            ReportName::AvgGdpContinent => "🌍 Average GDP by Continent (Selected Date Range)",
            ReportName::GlobalGdpTrend => "🌐 Total Global GDP Trend (Selected Date Range)",
            ReportName::FastestGrowing => "🚀 Fastest Growing Continent (Selected Date Range)",
            ReportName::ConsistentDecline => {
                "⚠️ Countries with Consistent GDP Decline (Last X Years)"
            }
            ReportName::ContinentContribution => {
                "🥧 Continent Contribution to Global GDP (Selected Date Range)"
            }
        }
    }

    fn render(&mut self, report: ReportName, result: &ReportResult) -> io::Result<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out, "{}", Self::title(report))?;
        writeln!(self.out, "{}", rule)?;

        if result.is_empty() {
            return writeln!(self.out, "No data available.");
        }

        match result {
            ReportResult::Entries(entries) => {
                for entry in entries {
                    self.render_entry(report, entry)?;
                }
            }
            ReportResult::Single(Some(entry)) => {
                writeln!(self.out, "{} -> {:.2}% growth", entry.label, entry.value)?;
            }
            ReportResult::Single(None) => {}
            ReportResult::Labels(labels) => {
                for label in labels {
                    writeln!(self.out, "~ {}", label)?;
                }
            }
        }
        Ok(())
    }

    fn render_entry(&mut self, report: ReportName, entry: &ReportEntry) -> io::Result<()> {
        let ReportEntry { label, value } = entry;
        match report {
            ReportName::GdpGrowthRate => writeln!(self.out, "{:<35} {:>10.2}%", label, value),
            ReportName::ContinentContribution => {
                writeln!(self.out, "{:<25} {:>8.2}%", label, value)
            }
            ReportName::GlobalGdpTrend => {
                writeln!(self.out, "Year {}: {}", label, format_currency(*value))
            }
            _ => writeln!(self.out, "{:<35} {}", label, format_currency(*value)),
        }
    }
}

impl<W: Write> ReportSink for ConsoleWriter<W> {
    fn write(&mut self, report: ReportName, result: &ReportResult) -> Result<()> {
        self.render(report, result)
            .and_then(|_| self.out.flush())
            .map_err(|e| EtlError::SinkError {
                report: report.to_string(),
                message: e.to_string(),
            })
    }
}

/// `1234567.891` -> `$1,234,567.89`
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(report: ReportName, result: ReportResult) -> String {
        let mut writer = ConsoleWriter::new(Vec::new());
        writer.write(report, &result).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.5), "$999.50");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-1000.0), "-$1,000.00");
    }

    #[test]
    fn test_ranking_section() {
        let output = render(
            ReportName::Top10,
            ReportResult::Entries(vec![ReportEntry::new("Japan", 4000.0)]),
        );
        assert!(output.contains("🏆 Top 10 Countries by GDP"));
        assert!(output.contains(&"=".repeat(70)));
        assert!(output.contains("Japan"));
        assert!(output.contains("$4,000.00"));
    }

    #[test]
    fn test_growth_and_trend_lines() {
        let output = render(
            ReportName::GdpGrowthRate,
            ReportResult::Entries(vec![ReportEntry::new("A", 50.0)]),
        );
        assert!(output.contains("     50.00%"));

        let output = render(
            ReportName::GlobalGdpTrend,
            ReportResult::Entries(vec![ReportEntry::new("2000", 1500.0)]),
        );
        assert!(output.contains("Year 2000: $1,500.00"));
    }

    #[test]
    fn test_single_and_labels() {
        let output = render(
            ReportName::FastestGrowing,
            ReportResult::Single(Some(ReportEntry::new("Asia", 12.5))),
        );
        assert!(output.contains("Asia -> 12.50% growth"));

        let output = render(
            ReportName::ConsistentDecline,
            ReportResult::Labels(vec!["Chad".to_string()]),
        );
        assert!(output.contains("~ Chad"));
    }

    #[test]
    fn test_empty_result() {
        let output = render(ReportName::Bottom10, ReportResult::Entries(vec![]));
        assert!(output.contains("No data available."));
    }
}
