use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn required(field: &str) -> Self { Self::Validation(format!("{} is required", field)) }
}

/// Trimmed, non-empty value of a required text field.
pub(crate) fn require(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ServiceError::required(field)),
    }
}

/// Reject an explicitly blank value for a required field on update.
pub(crate) fn require_if_present(value: Option<String>, field: &str) -> Result<Option<String>, ServiceError> {
    value.map(|v| require(Some(v), field)).transpose()
}

/// Non-blank required body text, stored exactly as sent.
pub(crate) fn require_text(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::required(field)),
    }
}

pub(crate) fn require_text_if_present(value: Option<String>, field: &str) -> Result<Option<String>, ServiceError> {
    value.map(|v| require_text(Some(v), field)).transpose()
}
