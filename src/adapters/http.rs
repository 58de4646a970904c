use crate::domain::ports::TextSource;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        // 確保以 / 結尾，join 時才不會把最後一段路徑換掉
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| {
            DashboardError::InvalidConfigValueError {
                field: "source".to_string(),
                value: base_url.to_string(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn url_for(&self, name: &str) -> Result<Url> {
        self.base_url
            .join(name)
            .map_err(|e| DashboardError::ConfigError {
                message: format!("Cannot resolve '{}' against {}: {}", name, self.base_url, e),
            })
    }
}

#[async_trait]
impl TextSource for HttpSource {
    async fn fetch_text(&self, name: &str) -> Result<String> {
        let url = self.url_for(name)?;
        tracing::debug!("Making request to: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("Response status for {}: {}", name, response.status());

        if !response.status().is_success() {
            return Err(DashboardError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_url_for_keeps_base_path() {
        let source = HttpSource::new("https://tutor.example.com/data", 30).unwrap();
        assert_eq!(
            source.url_for("sessions.csv").unwrap().as_str(),
            "https://tutor.example.com/data/sessions.csv"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpSource::new("not a url", 30).is_err());
    }

    #[tokio::test]
    async fn test_fetch_text_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/sessions.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body("date,time,tutee,sessions,status\n");
        });

        let source = HttpSource::new(&server.base_url(), 5).unwrap();
        let text = source.fetch_text("sessions.csv").await.unwrap();

        api_mock.assert();
        assert_eq!(text, "date,time,tutee,sessions,status\n");
    }

    #[tokio::test]
    async fn test_fetch_text_http_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/topics.csv");
            then.status(404);
        });

        let source = HttpSource::new(&server.base_url(), 5).unwrap();
        let err = source.fetch_text("topics.csv").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, DashboardError::HttpStatus { status: 404, .. }));
    }
}
