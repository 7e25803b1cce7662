use thiserror::Error;

use crate::domain::validation::ValidationIssue;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Validation failed:\n{}", render_issues(.0))]
    Validation(Vec<ValidationIssue>),

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    #[error("Failed to find accommodations: {reason}")]
    SearchFailed { reason: String },

    #[error("Availability check failed: {reason}")]
    AvailabilityCheckFailed { reason: String },

    #[error("Search criteria combination is not supported: {kind}")]
    UnsupportedCriteria { kind: String },

    #[error("Availability registration failed: {reason}")]
    RegistrationFailed { reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("{service} service returned HTTP {status}")]
    RemoteStatus { service: &'static str, status: u16 },

    #[error("{service} service is unavailable (circuit open)")]
    CircuitOpen { service: &'static str },

    #[error("Accommodation store error: {reason}")]
    Store { reason: String },

    #[error("Image storage error: {reason}")]
    Image { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl ServiceError {
    /// Whether the failure says something about the remote service's health.
    ///
    /// Answers like "no such user" are valid responses and must not trip a
    /// circuit breaker.
    pub fn is_remote_fault(&self) -> bool {
        match self {
            Self::UserNotFound { .. } | Self::NotFound { .. } | Self::Validation(_) => false,
            Self::RemoteStatus { status, .. } => *status >= 500 || *status == 429,
            _ => true,
        }
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, ServiceError>;
