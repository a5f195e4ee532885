use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data integrity error: {message}")]
    DataIntegrityError { message: String },

    #[error("Unknown {kind} driver: {name}")]
    UnknownDriverError { kind: String, name: String },

    #[error("Sink failed while writing '{report}': {message}")]
    SinkError { report: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn data_integrity(message: impl Into<String>) -> Self {
        Self::DataIntegrityError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. }
            | Self::UnknownDriverError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Input
            }
            Self::DataIntegrityError { .. } => ErrorCategory::Data,
            Self::SinkError { .. } => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SinkError { .. } => ErrorSeverity::Medium,
            Self::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the input file exists and the output directory is writable",
            Self::CsvError(_) => "Make sure the source is a comma-separated table with a 'Country Name' header",
            Self::SerializationError(_) => "Make sure the JSON source is an array of {country, continent, year, gdp} objects",
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Review the configuration file for syntax errors"
            }
            Self::InvalidConfigValueError { .. } => {
                "Use whole numbers for year_start, year_end, year and decline_years"
            }
            Self::DataIntegrityError { .. } => "Fix or remove source rows without a country name",
            Self::UnknownDriverError { .. } => {
                "Valid inputs are csv and json; valid outputs are console, json, csv and graphics"
            }
            Self::SinkError { .. } => "Re-run after fixing the output destination",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("配置錯誤: {}", self),
            ErrorCategory::Input => format!("讀取資料失敗: {}", self),
            ErrorCategory::Data => format!("資料不完整: {}", self),
            ErrorCategory::Output => format!("輸出失敗: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
