use crate::domain::options::{LogFormat, MalformedRowPolicy};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 取得 CSV 原始文字的來源 (HTTP 或本機檔案)
#[async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch_text(&self, name: &str) -> Result<String>;

    fn describe(&self) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> &str;
    fn sessions_file(&self) -> &str;
    fn topics_file(&self) -> &str;
    fn rate(&self) -> f64;
    fn password(&self) -> &str;
    fn max_attempts(&self) -> usize;
    fn timeout_seconds(&self) -> u64;
    fn log_format(&self) -> LogFormat;
    fn on_malformed(&self) -> MalformedRowPolicy;
}

/// Asks the user for the billing password. `attempt` starts at 1.
pub trait CredentialPrompt {
    fn ask(&mut self, attempt: usize) -> Option<String>;
}

impl<F> CredentialPrompt for F
where
    F: FnMut(usize) -> Option<String>,
{
    fn ask(&mut self, attempt: usize) -> Option<String> {
        self(attempt)
    }
}

#[async_trait]
impl<T: TextSource + ?Sized> TextSource for Box<T> {
    async fn fetch_text(&self, name: &str) -> Result<String> {
        (**self).fetch_text(name).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
