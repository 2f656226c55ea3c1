//! Application error types.
//!
//! Every fallible operation in the workspace returns [`AppResult`].

use thiserror::Error;

use crate::models::{DatabaseId, InstanceId};

/// Result alias used across the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised by the coordinator or by its external collaborators.
#[derive(Debug, Error)]
pub enum AppError {
    /// Instance metadata could not be found.
    #[error("instance not found: {0}")]
    InstanceNotFound(InstanceId),

    /// Database metadata could not be found.
    #[error("database not found: {0}")]
    DatabaseNotFound(DatabaseId),

    /// The query executor reported a failure.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A backend service was unreachable or answered with garbage.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Another execution is still in flight and the policy rejects overlap.
    #[error("a query is already executing")]
    ExecutionInProgress,

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other collaborator failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, mirroring the backend envelope codes.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InstanceNotFound(_) => "INSTANCE_NOT_FOUND",
            AppError::DatabaseNotFound(_) => "DATABASE_NOT_FOUND",
            AppError::QueryFailed(_) => "QUERY_FAILED",
            AppError::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::ExecutionInProgress => "EXECUTION_IN_PROGRESS",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Other(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_id() {
        assert_eq!(AppError::InstanceNotFound(10).to_string(), "instance not found: 10");
    }

    #[test]
    fn test_anyhow_is_transparent() {
        let err: AppError = anyhow::anyhow!("backend exploded").into();
        assert_eq!(err.to_string(), "backend exploded");
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
