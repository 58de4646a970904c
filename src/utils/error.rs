use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP error while fetching {url}: status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Invalid session time '{value}': {reason}")]
    InvalidTime { value: String, reason: String },

    #[error("Access denied: billing password does not match")]
    GateMismatch,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Access,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::ApiError(_) | DashboardError::HttpStatus { .. } => {
                ErrorCategory::Network
            }
            DashboardError::CsvError(_)
            | DashboardError::MalformedRow { .. }
            | DashboardError::InvalidTime { .. }
            | DashboardError::SerializationError(_) => ErrorCategory::Data,
            DashboardError::GateMismatch => ErrorCategory::Access,
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DashboardError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Access | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DashboardError::ApiError(_) | DashboardError::HttpStatus { .. } => {
                "Check that the source URL is reachable and serves sessions.csv / topics.csv"
            }
            DashboardError::CsvError(_) | DashboardError::MalformedRow { .. } => {
                "Fix the offending row, or rerun with --on-malformed skip"
            }
            DashboardError::InvalidTime { .. } => "Session times must use 24-hour HH:MM",
            DashboardError::GateMismatch => "Re-enter the parent password",
            DashboardError::IoError(_) => "Check that the data directory exists and is readable",
            DashboardError::SerializationError(_) => "Rerun with --verbose for details",
            DashboardError::ConfigError { .. }
            | DashboardError::InvalidConfigValueError { .. }
            | DashboardError::ConfigValidationError { .. } => {
                "Review the command-line flags and the TOML config file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::GateMismatch => "Access denied".to_string(),
            DashboardError::MalformedRow { line, reason } => {
                format!("Could not read line {} of the CSV: {}", line, reason)
            }
            DashboardError::HttpStatus { url, status } => {
                format!("Could not download {} (HTTP {})", url, status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
