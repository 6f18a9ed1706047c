use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("Model response contained no text")]
    EmptyResponseError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Api,
    Io,
    Data,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::ApiError(_) => ErrorCategory::Network,
            ConvertError::ApiStatusError { .. } | ConvertError::EmptyResponseError => {
                ErrorCategory::Api
            }
            ConvertError::IoError(_) => ErrorCategory::Io,
            ConvertError::SerializationError(_) => ErrorCategory::Data,
            ConvertError::MissingConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 429 可稍後重跑，其餘 API 錯誤視為處理失敗
            ConvertError::ApiStatusError { status: 429, .. } => ErrorSeverity::Medium,
            ConvertError::ApiError(_)
            | ConvertError::ApiStatusError { .. }
            | ConvertError::EmptyResponseError
            | ConvertError::IoError(_)
            | ConvertError::SerializationError(_) => ErrorSeverity::High,
            ConvertError::MissingConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::ConfigValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ConvertError::ApiError(_) => {
                "Check your network connection and the API endpoint".to_string()
            }
            ConvertError::ApiStatusError { status: 429, .. } => {
                "The API key is being rate limited, wait a while and run again".to_string()
            }
            ConvertError::ApiStatusError {
                status: 401 | 403, ..
            } => "Verify that the API key is valid and has access to the model".to_string(),
            ConvertError::ApiStatusError { .. } => {
                "Check the model name and endpoint, then inspect the response message".to_string()
            }
            ConvertError::EmptyResponseError => {
                "The model returned no usable text, run again or adjust the source document"
                    .to_string()
            }
            ConvertError::IoError(_) => {
                "Check that the file paths exist and are readable/writable".to_string()
            }
            ConvertError::SerializationError(_) => {
                "The API response did not match the expected schema, check the endpoint"
                    .to_string()
            }
            ConvertError::MissingConfigError { field } => format!(
                "Provide '{}' via CLI flag, config file, or environment variable",
                field
            ),
            ConvertError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            ConvertError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' section of the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Api => format!("Markdown conversion failed: {}", self),
            ErrorCategory::Io => format!("File problem: {}", self),
            ErrorCategory::Data => format!("Unexpected API response: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
