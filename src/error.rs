//! Rusve error types

/// Rusve error types
#[derive(Debug, thiserror::Error)]
pub enum RusveError {
    // Contract errors
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Owner delete refused while children remain.
    #[error("failed precondition: {0}")]
    FailedPrecondition(String),

    /// Identity claim of a deleted account.
    #[error("unauthenticated")]
    Unauthenticated,

    // Reserved for the authorization layer.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    // Collaborator errors
    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// Client-side connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),
}

impl RusveError {
    /// Stable short name used as the `status` label on call metrics.
    pub fn code(&self) -> &'static str {
        match self {
            RusveError::NotFound(_) => "not_found",
            RusveError::AlreadyExists(_) => "already_exists",
            RusveError::InvalidArgument(_) => "invalid_argument",
            RusveError::FailedPrecondition(_) => "failed_precondition",
            RusveError::Unauthenticated => "unauthenticated",
            RusveError::PermissionDenied(_) => "permission_denied",
            RusveError::Storage(_) => "storage",
            RusveError::Configuration(_) => "configuration",
            RusveError::Transport(_) => "transport",
        }
    }

    /// Whether the error was caused by the caller's request rather than the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RusveError::NotFound(_)
                | RusveError::AlreadyExists(_)
                | RusveError::InvalidArgument(_)
                | RusveError::FailedPrecondition(_)
                | RusveError::Unauthenticated
                | RusveError::PermissionDenied(_)
        )
    }
}

/// Result type alias for Rusve operations
pub type Result<T> = std::result::Result<T, RusveError>;
