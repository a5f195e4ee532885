// Adapters layer: concrete sources and sinks around the engine, plus the driver registry.

#[cfg(feature = "chart")]
pub mod chart_writer;
pub mod console;
pub mod csv_reader;
pub mod csv_writer;
pub mod json_reader;
pub mod json_writer;
pub mod normalize;
pub mod registry;

#[cfg(feature = "chart")]
pub use chart_writer::ChartWriter;
pub use console::ConsoleWriter;
pub use csv_reader::CsvReader;
pub use csv_writer::CsvReportWriter;
pub use json_reader::JsonReader;
pub use json_writer::JsonReportWriter;
