use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Integrity error: {0}")]
    IntegrityError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("Store file not found: {}", err))
            }
            std::io::ErrorKind::PermissionDenied => {
                AppError::StorageError(format!("Permission denied: {}", err))
            }
            _ => AppError::StorageError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("Invalid UUID: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidInput(format!("Invalid date/time: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::InvalidInput(format!("Invalid number: {}", err))
    }
}

impl From<dotenvy::Error> for AppError {
    fn from(err: dotenvy::Error) -> Self {
        AppError::ConfigError(format!("Failed to read .env file: {}", err))
    }
}

impl AppError {
    /// Errors caused by the request itself rather than by the store or a bug
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AppError::NotFound(_)
                | AppError::AlreadyExists(_)
                | AppError::InvalidInput(_)
                | AppError::InvariantViolation(_)
                | AppError::ValidationError(_)
        )
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = AppError::ValidationError("bad".to_string());
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["type"], "ValidationError");
        assert_eq!(json["message"], "bad");
    }

    #[test]
    fn io_not_found_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "campus.json");
        assert!(matches!(AppError::from(io), AppError::NotFound(_)));
    }

    #[test]
    fn invalid_uuid_is_invalid_input() {
        let err: AppError = uuid::Uuid::parse_str("nope").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(err.is_caller_error());
        assert!(!AppError::StorageError("disk".to_string()).is_caller_error());
    }
}
