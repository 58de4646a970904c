use crate::utils::error::{DashboardError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 判斷資料來源是否為 http(s) URL
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(DashboardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 來源可以是 URL 或本機目錄
pub fn validate_source(field_name: &str, source: &str) -> Result<()> {
    if is_remote(source) {
        validate_url(field_name, source)
    } else {
        validate_path(field_name, source)
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_rate(field_name: &str, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: rate.to_string(),
            reason: "Rate must be a finite number greater than zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[&str],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
                return Err(DashboardError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(DashboardError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.to_string(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(DashboardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source", "https://example.com").is_ok());
        assert!(validate_url("source", "http://example.com/data/").is_ok());
        assert!(validate_url("source", "").is_err());
        assert!(validate_url("source", "invalid-url").is_err());
        assert!(validate_url("source", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_source_accepts_url_or_path() {
        assert!(validate_source("source", "https://tutor.example.com/").is_ok());
        assert!(validate_source("source", "./data").is_ok());
        assert!(validate_source("source", "").is_err());
        assert!(validate_source("source", "https://").is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("billing.rate", 650.0).is_ok());
        assert!(validate_rate("billing.rate", 0.0).is_err());
        assert!(validate_rate("billing.rate", -1.0).is_err());
        assert!(validate_rate("billing.rate", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        assert!(validate_file_extensions("files", &["sessions.csv", "topics.CSV"], &["csv"]).is_ok());
        assert!(validate_file_extensions("files", &["sessions.txt"], &["csv"]).is_err());
        assert!(validate_file_extensions("files", &["sessions"], &["csv"]).is_err());
    }

    #[test]
    fn test_validate_positive_number_and_range() {
        assert!(validate_positive_number("billing.max_attempts", 3, 1).is_ok());
        assert!(validate_positive_number("billing.max_attempts", 0, 1).is_err());
        assert!(validate_range("source.timeout_seconds", 30u64, 1, 600).is_ok());
        assert!(validate_range("source.timeout_seconds", 0u64, 1, 600).is_err());
    }
}
