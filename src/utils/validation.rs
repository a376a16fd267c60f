use crate::utils::error::{BridgeError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(BridgeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| BridgeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BridgeError::InvalidConfigValueError {
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
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 記憶體大小必須像 `512Mi` 或 `2Gi`
pub fn validate_memory_quantity(field_name: &str, value: &str) -> Result<()> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"^[1-9][0-9]*(Mi|Gi)$").expect("valid regex"));

    if !re.is_match(value) {
        return Err(BridgeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected a quantity such as 512Mi or 2Gi".to_string(),
        });
    }
    Ok(())
}

/// 未被替換的 `${VAR}` 視同未設定的變數
pub fn validate_no_unresolved_vars(field_name: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(BridgeError::MissingConfigError {
            field: format!("{} (unresolved variable in '{}')", field_name, value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("backend_url", "https://example.com").is_ok());
        assert!(validate_url("backend_url", "http://example.com").is_ok());
        assert!(validate_url("backend_url", "").is_err());
        assert!(validate_url("backend_url", "invalid-url").is_err());
        assert!(validate_url("backend_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("port", 8080, 1).is_ok());
        assert!(validate_positive_number("port", 0, 1).is_err());
    }

    #[test]
    fn test_validate_memory_quantity() {
        assert!(validate_memory_quantity("resources.memory", "512Mi").is_ok());
        assert!(validate_memory_quantity("resources.memory", "2Gi").is_ok());
        assert!(validate_memory_quantity("resources.memory", "512").is_err());
        assert!(validate_memory_quantity("resources.memory", "0Mi").is_err());
        assert!(validate_memory_quantity("resources.memory", "1GB").is_err());
    }

    #[test]
    fn test_validate_no_unresolved_vars() {
        assert!(validate_no_unresolved_vars("service.project", "turfpro-prod").is_ok());
        let err = validate_no_unresolved_vars("service.project", "${GCP_PROJECT}").unwrap_err();
        assert!(matches!(err, BridgeError::MissingConfigError { .. }));
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("value".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("x", &present).unwrap(), "value");
        assert!(validate_required_field("x", &missing).is_err());
    }
}
