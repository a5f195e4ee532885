use crate::adapters::registry::{input_driver_names, output_driver_names};
use crate::config::filters::FilterMap;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_driver, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// 分析條件：continent, year_start, year_end, year, decline_years
    #[serde(default)]
    pub filters: FilterMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_input_driver")]
    pub driver: String,
    #[serde(default = "default_file_path")]
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_driver")]
    pub driver: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

fn default_input_driver() -> String {
    "csv".to_string()
}

fn default_file_path() -> String {
    "gdp.csv".to_string()
}

fn default_output_driver() -> String {
    "console".to_string()
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            driver: default_input_driver(),
            file_path: default_file_path(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            driver: default_output_driver(),
            output_path: default_output_path(),
        }
    }
}

impl AppConfig {
    /// 從檔案載入配置；`.toml` 以 TOML 解析，其餘以 JSON 解析
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(EtlError::IoError)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        serde_json::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "json_parsing".to_string(),
            message: format!("JSON parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GDP_FILE})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| EtlError::config(format!("invalid placeholder pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        let input_driver = self.input.driver.trim().to_ascii_lowercase();
        let output_driver = self.output.driver.trim().to_ascii_lowercase();
        validate_driver("input.driver", &input_driver, &input_driver_names())?;
        validate_driver("output.driver", &output_driver, &output_driver_names())?;
        validate_path("input.file_path", &self.input.file_path)?;
        if !self.output.driver.trim().eq_ignore_ascii_case("console") {
            validate_path("output.output_path", &self.output.output_path)?;
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
