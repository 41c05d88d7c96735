use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },

    #[error("Model error: {message}")]
    ModelError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Model,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::IoError(_) => ErrorCategory::Storage,
            EtlError::SerializationError(_)
            | EtlError::NotFound { .. }
            | EtlError::ParseError { .. } => ErrorCategory::Input,
            EtlError::ModelError { .. } => ErrorCategory::Model,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Network and model failures only ever cost a single item.
            ErrorCategory::Network | ErrorCategory::Model => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::MissingConfigError { field } if field == "api_key" => {
                "Set GOOGLE_API_KEY in the environment or in a .env file next to the binary"
                    .to_string()
            }
            EtlError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            EtlError::InvalidConfigValueError { field, .. }
            | EtlError::ConfigValidationError { field, .. } => {
                format!("Check the value of '{}' in your flags or config file", field)
            }
            EtlError::ConfigError { .. } => "Check the configuration file syntax".to_string(),
            EtlError::NotFound { path } => {
                format!("Make sure '{}' exists or pass --species-file", path)
            }
            EtlError::ParseError { path, .. } => {
                format!("Make sure '{}' is a JSON array of species objects", path)
            }
            EtlError::SerializationError(_) => "Check that the input is valid JSON".to_string(),
            EtlError::ApiError(_) => "Check network connectivity and the model endpoint".to_string(),
            EtlError::ModelError { .. } => {
                "Check the model name and that the API key has access to it".to_string()
            }
            EtlError::IoError(_) => {
                "Check that the output directory exists, is writable and has free space".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MissingConfigError { field } if field == "api_key" => {
                "No API key found for the generative model".to_string()
            }
            EtlError::NotFound { path } => format!("Species file '{}' was not found", path),
            EtlError::ParseError { path, .. } => {
                format!("Species file '{}' could not be parsed", path)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
