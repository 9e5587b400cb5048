use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    InvalidArgument,
    QueueFull,
    QueueEmpty,
    ConfigError,
    RuntimeError,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub error_type: ErrorType,
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}; {}", self.error_type, self.message)
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn new(error_type: ErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
        }
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self {
            error_type: ErrorType::InvalidArgument,
            message: message.to_string(),
        }
    }

    pub fn queue_full(capacity: usize) -> Self {
        Self {
            error_type: ErrorType::QueueFull,
            message: format!("all {} slots are in use", capacity),
        }
    }

    pub fn queue_empty() -> Self {
        Self {
            error_type: ErrorType::QueueEmpty,
            message: "".to_string(),
        }
    }

    pub fn config(message: String) -> Self {
        Self {
            error_type: ErrorType::ConfigError,
            message,
        }
    }

    pub fn runtime(message: &str) -> Self {
        Self {
            error_type: ErrorType::RuntimeError,
            message: message.to_string(),
        }
    }

    /// QueueFull and QueueEmpty leave the queue untouched; the caller may retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.error_type,
            ErrorType::QueueFull | ErrorType::QueueEmpty
        )
    }
}
