use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Product {id} not found")]
    NotFound { id: u64 },

    #[error("Product source unreachable: {message}")]
    Transport { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl StoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        StoreError::Transport {
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Errors reaching the product source are shown to the user with a retry
    /// or navigation affordance; configuration errors stop the program.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::NotFound { .. }
                | StoreError::Transport { .. }
                | StoreError::ApiError(_)
        )
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::NotFound { .. } => ErrorSeverity::Low,
            StoreError::Transport { .. } | StoreError::ApiError(_) => ErrorSeverity::Medium,
            StoreError::ConfigError { .. } | StoreError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            StoreError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Process exit status for a command that failed with this error.
    /// Recoverable errors exit 0 for low severity and 2 otherwise; the rest
    /// exit 3 when critical and 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match (self.is_recoverable(), self.severity()) {
            (true, ErrorSeverity::Low) => 0,
            (true, _) => 2,
            (false, ErrorSeverity::Critical) => 3,
            (false, _) => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            StoreError::NotFound { id } => {
                format!("Product Not Found: product {} does not exist.", id)
            }
            StoreError::Transport { .. } | StoreError::ApiError(_) => {
                "Could not reach the product catalogue.".to_string()
            }
            StoreError::ConfigError { message } => format!("Invalid configuration: {}", message),
            StoreError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
            StoreError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            StoreError::NotFound { .. } => "Go back or browse the product list with `shopswift products`.",
            StoreError::Transport { .. } | StoreError::ApiError(_) => {
                "Check your network connection and the --api-base-url setting, then retry."
            }
            StoreError::ConfigError { .. } | StoreError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run the command again."
            }
            StoreError::IoError(_) => "Check that the config file exists and is readable.",
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
