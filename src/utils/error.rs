use crate::domain::model::ValidationKind;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("{message}")]
    ValidationError {
        kind: ValidationKind,
        message: String,
    },

    #[error("{message}")]
    UploadError { message: String },

    #[error("File exceeds the maximum upload size of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed upload: {message}")]
    MultipartError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ConvertError {
    pub fn validation(kind: ValidationKind, message: impl Into<String>) -> Self {
        ConvertError::ValidationError {
            kind,
            message: message.into(),
        }
    }

    pub fn upload(message: impl Into<String>) -> Self {
        ConvertError::UploadError {
            message: message.into(),
        }
    }

    /// True for errors caused by the uploaded content rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConvertError::ValidationError { .. }
                | ConvertError::UploadError { .. }
                | ConvertError::PayloadTooLarge { .. }
                | ConvertError::MultipartError { .. }
        )
    }
}

impl ResponseError for ConvertError {
    fn status_code(&self) -> StatusCode {
        match self {
            ConvertError::ValidationError { .. }
            | ConvertError::UploadError { .. }
            | ConvertError::MultipartError { .. } => StatusCode::BAD_REQUEST,
            ConvertError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

// Kept as text: multipart errors may wrap a non-Send `actix_web::Error`.
impl From<actix_multipart::MultipartError> for ConvertError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        ConvertError::MultipartError {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
