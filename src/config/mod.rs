pub mod app_config;
#[cfg(feature = "cli")]
pub mod cli;
pub mod filters;

pub use app_config::{AppConfig, InputConfig, OutputConfig};
#[cfg(feature = "cli")]
pub use cli::CliArgs;
pub use filters::{FilterMap, ResolvedFilters};
