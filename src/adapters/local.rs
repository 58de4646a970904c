use crate::domain::ports::TextSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalSource {
    base_path: PathBuf,
}

impl LocalSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl TextSource for LocalSource {
    async fn fetch_text(&self, name: &str) -> Result<String> {
        let full_path = self.base_path.join(name);
        tracing::debug!("Reading {}", full_path.display());
        let data = fs::read_to_string(full_path)?;
        Ok(data)
    }

    fn describe(&self) -> String {
        self.base_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::DashboardError;
    use tempfile::TempDir;

    #[test]
    fn test_reads_file_under_base() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("topics.csv"), "date,tutee,topic\n").unwrap();

        let source = LocalSource::new(dir.path());
        let text = tokio_test::block_on(source.fetch_text("topics.csv")).unwrap();
        assert_eq!(text, "date,tutee,topic\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let source = LocalSource::new(dir.path());

        let err = tokio_test::block_on(source.fetch_text("sessions.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::IoError(_)));
    }
}
