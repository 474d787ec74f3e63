use crate::utils::error::{EtlError, Result};
use chrono::NaiveTime;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> EtlError {
    EtlError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

/// Parses a wall-clock time written as `HH:MM`.
pub fn parse_daily_time(field_name: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| invalid(field_name, value, format!("Expected HH:MM: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source", "https://arena.ai/ar/leaderboard/code").is_ok());
        assert!(validate_url("source", "http://localhost:8080").is_ok());
        assert!(validate_url("source", "").is_err());
        assert!(validate_url("source", "invalid-url").is_err());
        assert!(validate_url("source", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("min_rows", 3, 1).is_ok());
        assert!(validate_positive_number("min_rows", 0, 1).is_err());
    }

    #[test]
    fn test_parse_daily_time() {
        let at = parse_daily_time("scheduler.daily_at", "03:00").unwrap();
        assert_eq!(at, NaiveTime::from_hms_opt(3, 0, 0).unwrap());
        assert!(parse_daily_time("scheduler.daily_at", "3am").is_err());
        assert!(parse_daily_time("scheduler.daily_at", "25:00").is_err());
    }
}
