//! Name -> constructor tables for input sources and report sinks.

#[cfg(feature = "chart")]
use crate::adapters::chart_writer::ChartWriter;
use crate::adapters::console::ConsoleWriter;
use crate::adapters::csv_reader::CsvReader;
use crate::adapters::csv_writer::CsvReportWriter;
use crate::adapters::json_reader::JsonReader;
use crate::adapters::json_writer::JsonReportWriter;
use crate::config::app_config::{InputConfig, OutputConfig};
use crate::domain::{RecordSource, ReportSink};
use crate::utils::error::{EtlError, Result};

type SourceFactory = fn(&InputConfig) -> Box<dyn RecordSource>;
type SinkFactory = fn(&OutputConfig) -> Box<dyn ReportSink>;

const INPUT_DRIVERS: &[(&str, SourceFactory)] = &[("csv", csv_source), ("json", json_source)];

const OUTPUT_DRIVERS: &[(&str, SinkFactory)] = &[
    ("console", console_sink),
    ("json", json_sink),
    ("csv", csv_sink),
    #[cfg(feature = "chart")]
    ("graphics", chart_sink),
];

fn csv_source(config: &InputConfig) -> Box<dyn RecordSource> {
    Box::new(CsvReader::new(&config.file_path))
}

fn json_source(config: &InputConfig) -> Box<dyn RecordSource> {
    Box::new(JsonReader::new(&config.file_path))
}

fn console_sink(_config: &OutputConfig) -> Box<dyn ReportSink> {
    Box::new(ConsoleWriter::stdout())
}

fn json_sink(config: &OutputConfig) -> Box<dyn ReportSink> {
    Box::new(JsonReportWriter::new(&config.output_path))
}

fn csv_sink(config: &OutputConfig) -> Box<dyn ReportSink> {
    Box::new(CsvReportWriter::new(&config.output_path))
}

#[cfg(feature = "chart")]
fn chart_sink(config: &OutputConfig) -> Box<dyn ReportSink> {
    Box::new(ChartWriter::new(&config.output_path))
}

pub fn input_driver_names() -> Vec<&'static str> {
    INPUT_DRIVERS.iter().map(|(name, _)| *name).collect()
}

pub fn output_driver_names() -> Vec<&'static str> {
    OUTPUT_DRIVERS.iter().map(|(name, _)| *name).collect()
}

pub fn build_source(config: &InputConfig) -> Result<Box<dyn RecordSource>> {
    let factory = lookup(INPUT_DRIVERS, "input", &config.driver)?;
    tracing::debug!("Using input driver '{}'", config.driver);
    Ok(factory(config))
}

pub fn build_sink(config: &OutputConfig) -> Result<Box<dyn ReportSink>> {
    let factory = lookup(OUTPUT_DRIVERS, "output", &config.driver)?;
    tracing::debug!("Using output driver '{}'", config.driver);
    Ok(factory(config))
}

fn lookup<F: Copy>(table: &[(&str, F)], kind: &str, name: &str) -> Result<F> {
    let wanted = name.trim().to_ascii_lowercase();
    table
        .iter()
        .find(|(driver, _)| *driver == wanted)
        .map(|(_, factory)| *factory)
        .ok_or_else(|| EtlError::UnknownDriverError {
            kind: kind.to_string(),
            name: name.to_string(),
        })
}
