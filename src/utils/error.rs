use thiserror::Error;

#[derive(Error, Debug)]
pub enum CfError {
    #[error("Incorrect Usage: {command} {reason}")]
    Usage { command: String, reason: String },

    #[error("{message}")]
    RequirementFailed {
        requirement: &'static str,
        message: String,
    },

    #[error("{resource_type} {key} not found")]
    NotFound { resource_type: String, key: String },

    #[error("{resource_type} {key} already exists")]
    AlreadyExists { resource_type: String, key: String },

    #[error("Server error, status code: {status}, error code: {}, message: {message}", .code.as_deref().unwrap_or("none"))]
    RemoteApi {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Error performing request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON response from server: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Precondition,
    NotFound,
    Conflict,
    Remote,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CfError {
    pub fn not_found(resource_type: impl Into<String>, key: impl Into<String>) -> Self {
        CfError::NotFound {
            resource_type: resource_type.into(),
            key: key.into(),
        }
    }

    pub fn usage(command: impl Into<String>, reason: impl Into<String>) -> Self {
        CfError::Usage {
            command: command.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CfError::Usage { .. } => ErrorCategory::Usage,
            CfError::RequirementFailed { .. } => ErrorCategory::Precondition,
            CfError::NotFound { .. } => ErrorCategory::NotFound,
            CfError::AlreadyExists { .. } => ErrorCategory::Conflict,
            CfError::RemoteApi { .. } | CfError::InvalidResponse(_) => ErrorCategory::Remote,
            CfError::Transport(_) => ErrorCategory::Network,
            CfError::ConfigValidationError { .. } | CfError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CfError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Conflict => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Usage
            | ErrorCategory::Precondition
            | ErrorCategory::NotFound
            | ErrorCategory::Remote => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Status code of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            CfError::RemoteApi { status, .. } => Some(*status),
            CfError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CfError::Transport(e) if e.is_timeout() => "The request to the API timed out".to_string(),
            CfError::Transport(e) if e.is_connect() => "Could not reach the API endpoint".to_string(),
            CfError::RemoteApi { status, message, .. } => {
                format!("The server rejected the request ({}): {}", status, message)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Usage => "Check the command's arguments and try again",
            ErrorCategory::Precondition => "Log in and target an org and space before retrying",
            ErrorCategory::NotFound => "Check the name for typos; names of plans and offerings are case-sensitive",
            ErrorCategory::Conflict => "Nothing to do, the resource is already present",
            ErrorCategory::Remote => "Inspect the server message; rerun with CF_TRACE=true for request details",
            ErrorCategory::Network => "Check the API endpoint and your network connection, then retry",
            ErrorCategory::Configuration => "Fix the configuration file or the --config path",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, CfError>;
