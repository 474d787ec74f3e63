//! JSON error bodies for the leaderboard routes.

use crate::utils::error::{ErrorCategory, EtlError};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATA_NOT_FOUND: &str = "Data not found. Please run the scraper script first.";
pub const SCRAPE_FAILED: &str = "Failed to scrape data";

/// `{error}` for 404s, `{error, details}` for failed refreshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(skip)]
    status: u16,
    error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND.as_u16(),
            error: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            error: message.into(),
            details: Some(details.into()),
        }
    }

    /// Refresh failure. Unknown boards stay 404; everything else is a 500 with details.
    pub fn from_refresh(err: EtlError) -> Self {
        match err.category() {
            ErrorCategory::Input => Self::not_found(err.to_string()),
            _ => {
                tracing::error!(error = %err, category = ?err.category(), "refresh failed");
                Self::internal(SCRAPE_FAILED, err.to_string())
            }
        }
    }

    /// Read failure. Unknown boards are 404; store errors are 500.
    pub fn from_read(err: EtlError) -> Self {
        match err.category() {
            ErrorCategory::Input => Self::not_found(err.to_string()),
            _ => {
                tracing::error!(error = %err, "reading snapshot failed");
                Self::internal("Failed to read data", err.to_string())
            }
        }
    }

    pub fn message(&self) -> &str {
        &self.error
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
