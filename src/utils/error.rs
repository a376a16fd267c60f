use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Config validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid HMAC signature")]
    InvalidSignature,

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Backend error: {message}")]
    BackendError { message: String },

    #[error("Command `{program}` exited with code {code:?}: {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Request,
    Security,
    External,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BridgeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BridgeError::ApiError(_) | BridgeError::BackendError { .. } => ErrorCategory::Network,
            BridgeError::ConfigError { .. }
            | BridgeError::MissingConfigError { .. }
            | BridgeError::InvalidConfigValueError { .. }
            | BridgeError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            BridgeError::BadRequest { .. } | BridgeError::SerializationError(_) => {
                ErrorCategory::Request
            }
            BridgeError::InvalidSignature => ErrorCategory::Security,
            BridgeError::CommandFailed { .. } => ErrorCategory::External,
            BridgeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Request | ErrorCategory::Security => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::External => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給操作人員的處理建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BridgeError::ApiError(_) | BridgeError::BackendError { .. } => {
                "Check that the backend is reachable and RENDER_BACKEND_URL is correct"
            }
            BridgeError::MissingConfigError { .. } => {
                "Set the missing value in the config file or the environment"
            }
            BridgeError::ConfigError { .. }
            | BridgeError::InvalidConfigValueError { .. }
            | BridgeError::ConfigValidationError { .. } => {
                "Review the configuration values and try again"
            }
            BridgeError::InvalidSignature => {
                "Sign the raw request body with HMAC-SHA256 and send it hex encoded in X-HMAC-Signature"
            }
            BridgeError::BadRequest { .. } | BridgeError::SerializationError(_) => {
                "Send a valid JSON body"
            }
            BridgeError::CommandFailed { .. } => {
                "Check that gcloud is installed, authenticated and pointed at the right project"
            }
            BridgeError::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BridgeError::ApiError(e) if e.is_timeout() => "The remote service timed out".to_string(),
            BridgeError::ApiError(e) if e.is_connect() => {
                "Could not connect to the remote service".to_string()
            }
            BridgeError::CommandFailed { program, code, .. } => match code {
                Some(code) => format!("{} failed with exit code {}", program, code),
                None => format!("{} was terminated by a signal", program),
            },
            other => other.to_string(),
        }
    }

    /// CLI 結束碼，依嚴重程度決定
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ResponseError for BridgeError {
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::InvalidSignature => StatusCode::UNAUTHORIZED,
            BridgeError::BadRequest { .. } | BridgeError::SerializationError(_) => {
                StatusCode::BAD_REQUEST
            }
            BridgeError::ApiError(_) | BridgeError::BackendError { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            BridgeError::BadRequest { message } => message.clone(),
            BridgeError::ApiError(e) => format!("Backend error: {}", e),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BridgeError::InvalidSignature.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            BridgeError::BadRequest {
                message: "No data provided".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BridgeError::BackendError {
                message: "down".to_string()
            }
            .status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_severity_drives_exit_code() {
        let config = BridgeError::MissingConfigError {
            field: "service.project".to_string(),
        };
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert_eq!(config.exit_code(), 1);

        let command = BridgeError::CommandFailed {
            program: "gcloud".to_string(),
            code: Some(2),
            stderr: String::new(),
        };
        assert_eq!(command.category(), ErrorCategory::External);
        assert_eq!(command.user_friendly_message(), "gcloud failed with exit code 2");
    }

    #[test]
    fn test_bad_request_body_is_bare_message() {
        let resp = BridgeError::BadRequest {
            message: "No data provided".to_string(),
        }
        .error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
