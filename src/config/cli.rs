use crate::config::app_config::AppConfig;
use clap::Parser;
use serde_json::Value;

#[derive(Debug, Clone, Parser)]
#[command(name = "gdp-etl")]
#[command(about = "GDP analytics over wide-format country-by-year tables")]
pub struct CliArgs {
    /// Path to the TOML or JSON configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Override input driver (csv, json)
    #[arg(long)]
    pub input_driver: Option<String>,

    /// Override input file path
    #[arg(long)]
    pub file: Option<String>,

    /// Override output driver (console, json, csv, graphics)
    #[arg(long)]
    pub output_driver: Option<String>,

    /// Override output directory for file sinks
    #[arg(long)]
    pub output_path: Option<String>,

    /// Continents to include, separated by '&'
    #[arg(long)]
    pub continent: Option<String>,

    #[arg(long)]
    pub year_start: Option<i64>,

    #[arg(long)]
    pub year_end: Option<i64>,

    /// Year used for the top/bottom rankings
    #[arg(long)]
    pub year: Option<i64>,

    /// Window length for decline detection
    #[arg(long)]
    pub decline_years: Option<i64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// Load and validate everything without computing reports
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// 命令列參數覆蓋配置檔設定
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(driver) = &self.input_driver {
            config.input.driver = driver.clone();
        }
        if let Some(file) = &self.file {
            config.input.file_path = file.clone();
        }
        if let Some(driver) = &self.output_driver {
            config.output.driver = driver.clone();
        }
        if let Some(path) = &self.output_path {
            config.output.output_path = path.clone();
        }

        if let Some(continent) = &self.continent {
            config
                .filters
                .insert("continent".to_string(), Value::String(continent.clone()));
        }
        let numeric = [
            ("year_start", self.year_start),
            ("year_end", self.year_end),
            ("year", self.year),
            ("decline_years", self.decline_years),
        ];
        for (key, value) in numeric {
            if let Some(value) = value {
                tracing::debug!("🔧 {} overridden to {}", key, value);
                config.filters.insert(key.to_string(), Value::from(value));
            }
        }
    }
}
