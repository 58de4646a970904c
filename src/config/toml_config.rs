use crate::config::Settings;
use crate::core::{ConfigProvider, LogFormat, MalformedRowPolicy};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub billing: BillingConfig,
    pub parse: Option<ParseConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base: Option<String>,
    pub sessions_file: Option<String>,
    pub topics_file: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingConfig {
    pub rate: Option<f64>,
    pub password: Option<String>,
    pub max_attempts: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    pub on_malformed: Option<MalformedRowPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub log_format: Option<LogFormat>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BILLING_PASSWORD})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("Invalid env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 把檔案設定疊在預設值上
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(base) = &self.source.base {
            settings.source = base.clone();
        }
        if let Some(file) = &self.source.sessions_file {
            settings.sessions_file = file.clone();
        }
        if let Some(file) = &self.source.topics_file {
            settings.topics_file = file.clone();
        }
        if let Some(timeout) = self.source.timeout_seconds {
            settings.timeout_seconds = timeout;
        }
        if let Some(rate) = self.billing.rate {
            settings.rate = rate;
        }
        if let Some(password) = &self.billing.password {
            settings.password = password.clone();
        }
        if let Some(max_attempts) = self.billing.max_attempts {
            settings.max_attempts = max_attempts;
        }
        if let Some(policy) = self.parse.as_ref().and_then(|p| p.on_malformed) {
            settings.on_malformed = policy;
        }
        if let Some(format) = self.display.as_ref().and_then(|d| d.log_format) {
            settings.log_format = format;
        }
    }

    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();
        self.apply_to(&mut settings);
        settings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_settings().validate()
    }
}

impl ConfigProvider for TomlConfig {
    fn source(&self) -> &str {
        self.source.base.as_deref().unwrap_or(crate::config::DEFAULT_SOURCE)
    }

    fn sessions_file(&self) -> &str {
        self.source
            .sessions_file
            .as_deref()
            .unwrap_or(crate::config::DEFAULT_SESSIONS_FILE)
    }

    fn topics_file(&self) -> &str {
        self.source
            .topics_file
            .as_deref()
            .unwrap_or(crate::config::DEFAULT_TOPICS_FILE)
    }

    fn rate(&self) -> f64 {
        self.billing.rate.unwrap_or(crate::core::metrics::DEFAULT_RATE)
    }

    fn password(&self) -> &str {
        self.billing
            .password
            .as_deref()
            .unwrap_or(crate::config::DEFAULT_PASSWORD)
    }

    fn max_attempts(&self) -> usize {
        self.billing
            .max_attempts
            .unwrap_or(crate::config::DEFAULT_MAX_ATTEMPTS)
    }

    fn timeout_seconds(&self) -> u64 {
        self.source
            .timeout_seconds
            .unwrap_or(crate::config::DEFAULT_TIMEOUT_SECONDS)
    }

    fn log_format(&self) -> LogFormat {
        self.display
            .as_ref()
            .and_then(|d| d.log_format)
            .unwrap_or_default()
    }

    fn on_malformed(&self) -> MalformedRowPolicy {
        self.parse
            .as_ref()
            .and_then(|p| p.on_malformed)
            .unwrap_or_default()
    }
}
