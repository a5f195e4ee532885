use crate::adapters::console::format_currency;
use crate::domain::{ReportEntry, ReportName, ReportResult, ReportSink};
use crate::utils::error::{EtlError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;
type DrawResult = std::result::Result<(), Box<dyn Error>>;

const DEFAULT_SIZE: (u32, u32) = (1000, 600);

const TOP_COLOR: RGBColor = RGBColor(0x2e, 0xcc, 0x71);
const BOTTOM_COLOR: RGBColor = RGBColor(0xe7, 0x4c, 0x3c);
const GAIN_COLOR: RGBColor = RGBColor(0x27, 0xae, 0x60);
const LOSS_COLOR: RGBColor = RGBColor(0xc0, 0x39, 0x2b);
const TREND_COLOR: RGBColor = RGBColor(0x29, 0x80, 0xb9);
const FASTEST_COLOR: RGBColor = RGBColor(0xe6, 0x7e, 0x22);
const PALETTE: [RGBColor; 7] = [
    RGBColor(0x34, 0x98, 0xdb),
    RGBColor(0xe6, 0x7e, 0x22),
    RGBColor(0x9b, 0x59, 0xb6),
    RGBColor(0x1a, 0xbc, 0x9c),
    RGBColor(0xe7, 0x4c, 0x3c),
    RGBColor(0xf1, 0xc4, 0x0f),
    RGBColor(0x34, 0x49, 0x5e),
];

/// Renders each non-empty report to `<output_path>/<report>.svg`.
///
/// Rankings and the decline list are horizontal bars, growth and averages are
/// columns, the global trend is a line and contributions are a pie.
#[derive(Debug, Clone)]
pub struct ChartWriter {
    output_path: PathBuf,
    size: (u32, u32),
}

impl ChartWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            size: DEFAULT_SIZE,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    pub fn report_path(&self, report: ReportName) -> PathBuf {
        self.output_path.join(format!("{}.svg", report))
    }

    fn render(&self, report: ReportName, result: &ReportResult, path: &Path) -> DrawResult {
        let root = SVGBackend::new(path, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let title = chart_title(report);

        match result {
            ReportResult::Entries(entries) => match report {
                ReportName::Top10 => {
                    draw_bars(&root, title, "GDP (USD)", entries, TOP_COLOR, currency_label)?
                }
                ReportName::Bottom10 => {
                    draw_bars(&root, title, "GDP (USD)", entries, BOTTOM_COLOR, currency_label)?
                }
                ReportName::GdpGrowthRate => draw_columns(
                    &root,
                    title,
                    "Growth Rate (%)",
                    entries,
                    |_, value| if value >= 0.0 { GAIN_COLOR } else { LOSS_COLOR },
                    percent_label,
                )?,
                ReportName::GlobalGdpTrend => draw_trend(&root, title, entries)?,
                ReportName::ContinentContribution => draw_pie(&root, title, entries)?,
                _ => draw_columns(
                    &root,
                    title,
                    "Average GDP (USD)",
                    entries,
                    |i, _| PALETTE[i % PALETTE.len()],
                    currency_label,
                )?,
            },
            ReportResult::Single(Some(entry)) => draw_columns(
                &root,
                title,
                "Growth Rate (%)",
                std::slice::from_ref(entry),
                |_, _| FASTEST_COLOR,
                percent_label,
            )?,
            ReportResult::Single(None) => {}
            ReportResult::Labels(labels) => {
                // 每個國家一條等長的橫條
                let entries: Vec<ReportEntry> = labels
                    .iter()
                    .map(|label| ReportEntry::new(label.as_str(), 1.0))
                    .collect();
                draw_bars(&root, title, "", &entries, LOSS_COLOR, blank_label)?
            }
        }

        root.present()?;
        Ok(())
    }
}

impl ReportSink for ChartWriter {
    fn write(&mut self, report: ReportName, result: &ReportResult) -> Result<()> {
        if result.is_empty() {
            tracing::debug!("No data for {}, chart skipped", report);
            return Ok(());
        }

        fs::create_dir_all(&self.output_path)?;
        let path = self.report_path(report);
        self.render(report, result, &path)
            .map_err(|e| EtlError::SinkError {
                report: report.to_string(),
                message: e.to_string(),
            })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

fn chart_title(report: ReportName) -> &'static str {
    match report {
        ReportName::Top10 => "Top 10 Countries by GDP",
        ReportName::Bottom10 => "Bottom 10 Countries by GDP",
        ReportName::GdpGrowthRate => "GDP Growth Rate per Country",
        ReportName::AvgGdpContinent => "Average GDP by Continent",
        ReportName::GlobalGdpTrend => "Total Global GDP Trend",
        ReportName::FastestGrowing => "Fastest Growing Continent",
        ReportName::ConsistentDecline => "Countries with Consistent GDP Decline",
        ReportName::ContinentContribution => "Continent Contribution to Global GDP",
    }
}

fn currency_label(value: f64) -> String {
    format_currency(value)
}

fn percent_label(value: f64) -> String {
    format!("{:.1}%", value)
}

fn blank_label(_value: f64) -> String {
    String::new()
}

/// Axis range covering every value and zero, padded by 5%.
fn value_range(entries: &[ReportEntry]) -> Range<f64> {
    let (low, high) = entries.iter().fold((0.0_f64, 0.0_f64), |(low, high), entry| {
        (low.min(entry.value), high.max(entry.value))
    });
    let span = if high > low { high - low } else { 1.0 };
    let pad = span * 0.05;
    let low = if low < 0.0 { low - pad } else { low };
    low..high + pad
}

fn segment_label(entries: &[ReportEntry], segment: &SegmentValue<i32>) -> String {
    match segment {
        SegmentValue::CenterOf(slot) => usize::try_from(*slot)
            .ok()
            .and_then(|i| entries.get(i))
            .map(|entry| entry.label.clone())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn draw_columns(
    root: &Canvas<'_>,
    title: &str,
    y_desc: &str,
    entries: &[ReportEntry],
    color: impl Fn(usize, f64) -> RGBColor,
    value_label: fn(f64) -> String,
) -> DrawResult {
    let count = entries.len() as i32;
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(80)
        .y_label_area_size(120)
        .build_cartesian_2d((0..count).into_segmented(), value_range(entries))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_labels(entries.len())
        .x_label_formatter(&|segment: &SegmentValue<i32>| segment_label(entries, segment))
        .y_label_formatter(&|value: &f64| value_label(*value))
        .draw()?;

    chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
        let slot = i as i32;
        Rectangle::new(
            [
                (SegmentValue::Exact(slot), 0.0),
                (SegmentValue::Exact(slot + 1), entry.value),
            ],
            color(i, entry.value).filled(),
        )
    }))?;
    Ok(())
}

fn draw_bars(
    root: &Canvas<'_>,
    title: &str,
    x_desc: &str,
    entries: &[ReportEntry],
    color: RGBColor,
    value_label: fn(f64) -> String,
) -> DrawResult {
    let count = entries.len() as i32;
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(160)
        .build_cartesian_2d(value_range(entries), (0..count).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(x_desc)
        .y_labels(entries.len())
        .y_label_formatter(&|segment: &SegmentValue<i32>| segment_label(entries, segment))
        .x_label_formatter(&|value: &f64| value_label(*value))
        .draw()?;

    chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
        let slot = i as i32;
        Rectangle::new(
            [
                (0.0, SegmentValue::Exact(slot)),
                (entry.value, SegmentValue::Exact(slot + 1)),
            ],
            color.filled(),
        )
    }))?;
    Ok(())
}

fn draw_trend(root: &Canvas<'_>, title: &str, entries: &[ReportEntry]) -> DrawResult {
    let points: Vec<(f64, f64)> = entries
        .iter()
        .filter_map(|entry| entry.label.parse::<f64>().ok().map(|year| (year, entry.value)))
        .collect();
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first.0, last.0),
        _ => return Ok(()),
    };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(140)
        .build_cartesian_2d((first - 0.5)..(last + 0.5), value_range(entries))?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Total Global GDP (USD)")
        .x_labels(points.len().min(12))
        .x_label_formatter(&|year: &f64| format!("{:.0}", year))
        .y_label_formatter(&|value: &f64| format_currency(*value))
        .draw()?;

    chart.draw_series(LineSeries::new(points.iter().copied(), &TREND_COLOR))?;
    chart.draw_series(
        points
            .iter()
            .map(|point| Circle::new(*point, 4, TREND_COLOR.filled())),
    )?;
    Ok(())
}

/// Pie slices are polygons on the pixel grid, legend to the right.
fn draw_pie(root: &Canvas<'_>, title: &str, entries: &[ReportEntry]) -> DrawResult {
    let area = root.titled(title, ("sans-serif", 24).into_font())?;
    let total: f64 = entries.iter().map(|entry| entry.value.max(0.0)).sum();
    if total <= 0.0 {
        return Ok(());
    }

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 3, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.38;
    let legend_x = width as i32 * 2 / 3;

    let mut angle = -FRAC_PI_2;
    for (i, entry) in entries.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let sweep = entry.value.max(0.0) / total * TAU;
        let steps = (sweep / TAU * 180.0).ceil().max(1.0) as usize;

        let mut outline = Vec::with_capacity(steps + 2);
        outline.push(center);
        for step in 0..=steps {
            let theta = angle + sweep * step as f64 / steps as f64;
            outline.push((
                center.0 + (radius * theta.cos()).round() as i32,
                center.1 + (radius * theta.sin()).round() as i32,
            ));
        }
        area.draw(&Polygon::new(outline, color.filled()))?;
        angle += sweep;

        let row = 40 + i as i32 * 28;
        area.draw(&Rectangle::new(
            [(legend_x, row), (legend_x + 16, row + 16)],
            color.filled(),
        ))?;
        area.draw(&Text::new(
            format!("{}: {:.1}%", entry.label, entry.value),
            (legend_x + 24, row),
            ("sans-serif", 16).into_font(),
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(pairs: &[(&str, f64)]) -> ReportResult {
        ReportResult::Entries(
            pairs
                .iter()
                .map(|(label, value)| ReportEntry::new(*label, *value))
                .collect(),
        )
    }

    #[test]
    fn test_ranking_chart_is_written() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChartWriter::new(temp_dir.path().join("charts"));

        writer
            .write(
                ReportName::Top10,
                &entries(&[("Japan", 400.0), ("France", 220.0)]),
            )
            .unwrap();

        let path = writer.report_path(ReportName::Top10);
        assert!(path.ends_with("top10.svg"));
        let svg = fs::read_to_string(path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Japan"));
        assert!(svg.contains("Top 10 Countries by GDP"));
    }

    #[test]
    fn test_every_report_shape_renders() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChartWriter::new(temp_dir.path()).with_size(640, 480);

        let results = [
            (ReportName::Bottom10, entries(&[("Chad", 12.0)])),
            (
                ReportName::GdpGrowthRate,
                entries(&[("A", 50.0), ("B", -12.5), ("C", 0.0)]),
            ),
            (
                ReportName::AvgGdpContinent,
                entries(&[("Africa", 10.0), ("Asia", 300.0)]),
            ),
            (
                ReportName::GlobalGdpTrend,
                entries(&[("2000", 1010.0), ("2001", 1020.0), ("2002", 990.0)]),
            ),
            (
                ReportName::FastestGrowing,
                ReportResult::Single(Some(ReportEntry::new("Africa", 20.0))),
            ),
            (
                ReportName::ConsistentDecline,
                ReportResult::Labels(vec!["Japan".to_string()]),
            ),
            (
                ReportName::ContinentContribution,
                entries(&[("X", 30.0), ("Y", 70.0)]),
            ),
        ];

        for (report, result) in &results {
            writer.write(*report, result).unwrap();
            let svg = fs::read_to_string(writer.report_path(*report)).unwrap();
            assert!(svg.contains("<svg"), "{report} is not an svg");
        }

        let pie = fs::read_to_string(writer.report_path(ReportName::ContinentContribution)).unwrap();
        assert!(pie.contains("polygon"));
        assert!(pie.contains("Y: 70.0%"));
    }

    #[test]
    fn test_single_year_trend_renders() {
        let temp_dir = TempDir::new().unwrap();
        let mut writer = ChartWriter::new(temp_dir.path());
        writer
            .write(ReportName::GlobalGdpTrend, &entries(&[("2000", 0.0)]))
            .unwrap();
        assert!(writer.report_path(ReportName::GlobalGdpTrend).exists());
    }

    #[test]
    fn test_empty_results_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("charts");
        let mut writer = ChartWriter::new(&output);

        writer
            .write(ReportName::FastestGrowing, &ReportResult::Single(None))
            .unwrap();
        writer
            .write(ReportName::Top10, &ReportResult::Entries(vec![]))
            .unwrap();

        assert!(!output.exists());
    }
}
