pub mod toml_config;

use crate::core::{ConfigProvider, LogFormat, MalformedRowPolicy};
#[cfg(feature = "cli")]
use crate::core::Tab;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_string, validate_positive_number,
    validate_range, validate_rate, validate_source, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE: &str = ".";
pub const DEFAULT_SESSIONS_FILE: &str = "sessions.csv";
pub const DEFAULT_TOPICS_FILE: &str = "topics.csv";
pub const DEFAULT_PASSWORD: &str = "parentalaccess";
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 合併 TOML 與命令列之後的最終設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub source: String,
    pub sessions_file: String,
    pub topics_file: String,
    pub rate: f64,
    pub password: String,
    pub max_attempts: usize,
    pub timeout_seconds: u64,
    pub log_format: LogFormat,
    pub on_malformed: MalformedRowPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            sessions_file: DEFAULT_SESSIONS_FILE.to_string(),
            topics_file: DEFAULT_TOPICS_FILE.to_string(),
            rate: crate::core::metrics::DEFAULT_RATE,
            password: DEFAULT_PASSWORD.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            log_format: LogFormat::default(),
            on_malformed: MalformedRowPolicy::default(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_source("source.base", &self.source)?;
        validate_file_extensions(
            "source.files",
            &[self.sessions_file.as_str(), self.topics_file.as_str()],
            &["csv"],
        )?;
        validate_rate("billing.rate", self.rate)?;
        validate_non_empty_string("billing.password", &self.password)?;
        validate_positive_number("billing.max_attempts", self.max_attempts, 1)?;
        validate_range("source.timeout_seconds", self.timeout_seconds, 1, 600)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn source(&self) -> &str {
        &self.source
    }

    fn sessions_file(&self) -> &str {
        &self.sessions_file
    }

    fn topics_file(&self) -> &str {
        &self.topics_file
    }

    fn rate(&self) -> f64 {
        self.rate
    }

    fn password(&self) -> &str {
        &self.password
    }

    fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn log_format(&self) -> LogFormat {
        self.log_format
    }

    fn on_malformed(&self) -> MalformedRowPolicy {
        self.on_malformed
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "tutor-dashboard")]
#[command(about = "Tutoring session dashboard: totals, history, topics and billing")]
pub struct CliConfig {
    /// Base URL or directory holding the CSV files
    #[arg(long)]
    pub source: Option<String>,

    #[arg(long)]
    pub sessions_file: Option<String>,

    #[arg(long)]
    pub topics_file: Option<String>,

    /// Tab to show
    #[arg(long, value_enum, default_value_t = Tab::Home)]
    pub tab: Tab,

    /// Show every tab in order
    #[arg(long)]
    pub all: bool,

    /// Password entered for the billing tab (prompted on stdin when absent)
    #[arg(long, env = "TUTOR_DASHBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Billing password the entered password is checked against
    #[arg(long, env = "TUTOR_DASHBOARD_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Charge per session
    #[arg(long)]
    pub rate: Option<f64>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(long, value_enum)]
    pub on_malformed: Option<MalformedRowPolicy>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Print the dashboard as JSON instead of text
    #[arg(long)]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 → TOML 檔案 → 命令列參數，後者覆蓋前者
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                toml_config::TomlConfig::from_file(path)?.to_settings()
            }
            None => Settings::default(),
        };

        if let Some(source) = &self.source {
            settings.source = source.clone();
        }
        if let Some(file) = &self.sessions_file {
            settings.sessions_file = file.clone();
        }
        if let Some(file) = &self.topics_file {
            settings.topics_file = file.clone();
        }
        if let Some(secret) = &self.secret {
            settings.password = secret.clone();
        }
        if let Some(rate) = self.rate {
            settings.rate = rate;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        if let Some(policy) = self.on_malformed {
            settings.on_malformed = policy;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn tabs(&self) -> Vec<Tab> {
        if self.all {
            Tab::ALL.to_vec()
        } else {
            vec![self.tab]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.rate, 650.0);
        assert_eq!(settings.sessions_file, "sessions.csv");
    }

    #[test]
    fn test_non_csv_file_is_invalid() {
        let settings = Settings {
            topics_file: "topics.json".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_toml() {
        use std::io::Write;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[billing]\nrate = 700.0\npassword = \"from-file\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "tutor-dashboard",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--rate",
            "800",
            "--log-format",
            "receipt",
        ]);
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.rate, 800.0);
        assert_eq!(settings.password, "from-file");
        assert_eq!(settings.log_format, LogFormat::Receipt);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_all_flag_lists_every_tab() {
        let cli = CliConfig::parse_from(["tutor-dashboard", "--all"]);
        assert_eq!(cli.tabs(), Tab::ALL.to_vec());

        let cli = CliConfig::parse_from(["tutor-dashboard", "--tab", "tutees"]);
        assert_eq!(cli.tabs(), vec![Tab::Tutees]);
    }
}
