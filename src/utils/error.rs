use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectError {
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status} for {url}")]
    ApiStatus { status: u16, url: String },

    #[error("Unexpected API response: {message}")]
    DataFormat { message: String },

    #[error("Internal consistency error: {message}")]
    InvariantViolation { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Network,
    DataFormat,
    Internal,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CollectError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } => ErrorCategory::Io,
            Self::Http(_) | Self::ApiStatus { .. } => ErrorCategory::Network,
            Self::DataFormat { .. } => ErrorCategory::DataFormat,
            Self::InvariantViolation { .. } => ErrorCategory::Internal,
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::DataFormat | ErrorCategory::Internal => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::DataFormat | ErrorCategory::Internal => 1,
            ErrorCategory::Network => 2,
            ErrorCategory::Io => 3,
            ErrorCategory::Configuration => 4,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Io { .. } => {
                "Check that the articles file and photo directory exist and that the output directory is writable"
            }
            Self::Http(_) => "Check network connectivity and the API_URL setting",
            Self::ApiStatus { status, .. } if *status == 401 || *status == 403 => {
                "Check the API_LOGIN and API_PASSWORD credentials"
            }
            Self::ApiStatus { .. } => "The inventory API rejected the request; try again later",
            Self::DataFormat { .. } => {
                "The inventory API response does not contain a `result` list of items with `article` and `barcode`"
            }
            Self::InvariantViolation { .. } => "This is a bug; please report it with the debug log",
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => {
                "Set API_URL, API_LOGIN, API_PASSWORD and PHOTO_DIRECTORY in the environment, a .env file or a --config file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("File system error: {}", self),
            ErrorCategory::Network => format!("Could not reach the inventory API: {}", self),
            ErrorCategory::DataFormat => format!("Inventory API returned unexpected data: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectError>;
