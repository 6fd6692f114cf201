use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("State error: {message}")]
    StateError { message: String },

    #[error("No valid SKUs found in selection")]
    EmptySelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Configuration,
    Data,
    System,
    Precondition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DeskError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeskError::ApiError(_) => ErrorCategory::Network,
            DeskError::ApiStatusError { .. } => ErrorCategory::Backend,
            DeskError::CsvError(_) | DeskError::SerializationError(_) => ErrorCategory::Data,
            DeskError::IoError(_) => ErrorCategory::System,
            DeskError::InvalidConfigValueError { .. }
            | DeskError::MissingConfigError { .. }
            | DeskError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            DeskError::StateError { .. } => ErrorCategory::Data,
            DeskError::EmptySelection => ErrorCategory::Precondition,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DeskError::EmptySelection => ErrorSeverity::Low,
            DeskError::ApiError(_) => ErrorSeverity::Medium,
            DeskError::ApiStatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            DeskError::ApiStatusError { .. } => ErrorSeverity::High,
            DeskError::CsvError(_)
            | DeskError::SerializationError(_)
            | DeskError::StateError { .. } => ErrorSeverity::High,
            DeskError::InvalidConfigValueError { .. }
            | DeskError::MissingConfigError { .. }
            | DeskError::ConfigValidationError { .. } => ErrorSeverity::High,
            DeskError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DeskError::ApiError(e) => format!("Cannot reach the back-office API: {}", e),
            DeskError::ApiStatusError { status, message } => format!(
                "The back-office API rejected the request ({}): {}",
                status, message
            ),
            DeskError::CsvError(e) => format!("Export failed while writing CSV: {}", e),
            DeskError::IoError(e) => format!("File operation failed: {}", e),
            DeskError::SerializationError(e) => format!("Unexpected response shape: {}", e),
            DeskError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Invalid {}: '{}' ({})", field, value, reason),
            DeskError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            DeskError::ConfigValidationError { field, message } => {
                format!("Bad configuration in {}: {}", field, message)
            }
            DeskError::StateError { message } => {
                format!("Saved page state is unusable: {}", message)
            }
            DeskError::EmptySelection => "No valid SKUs found in selection".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DeskError::ApiError(_) => {
                "Check that the backend is running and --api-base-url points at it".to_string()
            }
            DeskError::ApiStatusError { status, .. } if *status >= 500 => {
                "The backend had an internal problem; retry in a moment".to_string()
            }
            DeskError::ApiStatusError { .. } => {
                "Check the request parameters against the backend contract".to_string()
            }
            DeskError::CsvError(_) => "Check the output path is writable".to_string(),
            DeskError::IoError(_) => "Check file permissions and free disk space".to_string(),
            DeskError::SerializationError(_) => {
                "The backend may be a different version; check for contract drift".to_string()
            }
            DeskError::InvalidConfigValueError { .. }
            | DeskError::MissingConfigError { .. }
            | DeskError::ConfigValidationError { .. } => {
                "Fix the flagged setting and rerun".to_string()
            }
            DeskError::StateError { .. } => {
                "Delete the saved state file to reset the page to defaults".to_string()
            }
            DeskError::EmptySelection => {
                "Select at least one SKU, or check the range syntax (e.g. AB001-AB010)".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
