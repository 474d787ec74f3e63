use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Fetch failed for {url}: HTTP {status}")]
    FetchError { url: String, status: u16 },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown leaderboard: {0}")]
    UnknownLeaderboard(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Coarse grouping used for log fields and process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Fetch,
    Parse,
    Store,
    Config,
    Input,
}

impl EtlError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FetchError { .. } | Self::ApiError(_) => ErrorCategory::Fetch,
            Self::ParseError { .. } => ErrorCategory::Parse,
            Self::StoreError { .. } | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::Store
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            Self::UnknownLeaderboard(_) | Self::NotFound(_) => ErrorCategory::Input,
        }
    }

    /// Fetch and parse failures are replaced by fallback data where a board has one.
    pub fn is_replaceable_by_fallback(&self) -> bool {
        matches!(self.category(), ErrorCategory::Fetch | ErrorCategory::Parse)
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config | ErrorCategory::Input => 1,
            ErrorCategory::Fetch | ErrorCategory::Parse => 2,
            ErrorCategory::Store => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_and_parse_are_fallback_replaceable() {
        let fetch = EtlError::FetchError {
            url: "https://example.com".to_string(),
            status: 503,
        };
        assert!(fetch.is_replaceable_by_fallback());
        assert!(EtlError::parse("no entries").is_replaceable_by_fallback());
        assert!(!EtlError::store("disk full").is_replaceable_by_fallback());
    }

    #[test]
    fn test_exit_codes_follow_category() {
        assert_eq!(EtlError::config("bad").exit_code(), 1);
        assert_eq!(EtlError::parse("empty").exit_code(), 2);
        assert_eq!(EtlError::store("locked").exit_code(), 3);
    }
}
