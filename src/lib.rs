pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;

pub use crate::config::{AppConfig, FilterMap, ResolvedFilters};
pub use crate::core::TransformationEngine;
pub use crate::domain::{PipelineService, Record, RecordSource, ReportEntry, ReportName, ReportResult, ReportSink};
pub use crate::utils::error::{EtlError, Result};
