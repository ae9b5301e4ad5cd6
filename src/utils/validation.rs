use crate::utils::error::{CatalogError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static ISBN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{13}$").expect("static ISBN pattern"));

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// ISBN 必須是 13 位數字
pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_PATTERN.is_match(isbn)
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CatalogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_database_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_non_empty_string(field_name, url_str)?;

    if !url_str.starts_with("sqlite:") {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "Only sqlite: database URLs are supported".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
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
        return Err(CatalogError::Validation {
            message: format!("{} must be between {} and {}, got {}", field_name, min, max, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_isbn() {
        assert!(is_valid_isbn("1234567891234"));
        assert!(is_valid_isbn("9780134685991"));
        assert!(!is_valid_isbn("42"));
        assert!(!is_valid_isbn(""));
        assert!(!is_valid_isbn("978013468599X"));
        assert!(!is_valid_isbn("978-0134685991"));
        assert!(!is_valid_isbn("97801346859910"));
        assert!(!is_valid_isbn(" 9780134685991"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("open_library.base_url", "https://openlibrary.org").is_ok());
        assert!(validate_url("open_library.base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("open_library.base_url", "").is_err());
        assert!(validate_url("open_library.base_url", "invalid-url").is_err());
        assert!(validate_url("open_library.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_database_url() {
        assert!(validate_database_url("database.url", "sqlite::memory:").is_ok());
        assert!(validate_database_url("database.url", "sqlite://catalog.db?mode=rwc").is_ok());
        assert!(validate_database_url("database.url", "postgres://localhost/test").is_err());
        assert!(validate_database_url("database.url", "  ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("rating", 3, 1, 5).is_ok());
        assert!(validate_range("rating", 0, 1, 5).is_err());
        assert!(validate_range("rating", 6, 1, 5).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("timeout_seconds", 10, 1).is_ok());
        assert!(validate_positive_number("timeout_seconds", 0, 1).is_err());
    }
}
