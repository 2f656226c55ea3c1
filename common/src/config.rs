//! Environment-driven configuration.
//!
//! Values are read from environment variables with sensible defaults, so a
//! coordinator can be built without any configuration at all.

use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::ProjectId;

/// What to do when `execute_query` is called while another execution is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    /// Let both executions run; whichever settles last owns the stored result.
    #[default]
    LastWriteWins,
    /// Refuse the second call with `AppError::ExecutionInProgress`.
    RejectIfBusy,
}

impl FromStr for ExecutionPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-write-wins" | "last_write_wins" => Ok(ExecutionPolicy::LastWriteWins),
            "reject-if-busy" | "reject_if_busy" => Ok(ExecutionPolicy::RejectIfBusy),
            other => Err(AppError::Config(format!("unknown execution policy: {}", other))),
        }
    }
}

impl fmt::Display for ExecutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionPolicy::LastWriteWins => write!(f, "last-write-wins"),
            ExecutionPolicy::RejectIfBusy => write!(f, "reject-if-busy"),
        }
    }
}

/// SQL dialect used by the default statement normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialect {
    #[default]
    Generic,
    MySql,
    Postgres,
    SQLite,
}

impl FromStr for SqlDialect {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "generic" => Ok(SqlDialect::Generic),
            "mysql" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "sqlite" => Ok(SqlDialect::SQLite),
            other => Err(AppError::Config(format!("unknown sql dialect: {}", other))),
        }
    }
}

/// Coordinator configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name used in log fields.
    pub service_name: String,
    /// Overlapping execution policy.
    pub execution_policy: ExecutionPolicy,
    /// Project id returned by the reverse lookup when nothing matches.
    pub default_project_id: ProjectId,
    /// Dialect for the default normalizer.
    pub sql_dialect: SqlDialect,
    /// Timeout applied to backend HTTP calls.
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "sql-editor".to_string(),
            execution_policy: ExecutionPolicy::default(),
            default_project_id: 1,
            sql_dialect: SqlDialect::default(),
            http_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Loads configuration from the environment, falling back to defaults.
    ///
    /// Unparseable values are logged and replaced by the default.
    pub fn load_with_service(service_name: &str) -> Self {
        let defaults = Self::default();
        Self {
            service_name: service_name.to_string(),
            execution_policy: env_or("SQL_EDITOR_EXECUTION_POLICY", defaults.execution_policy),
            default_project_id: env_or("SQL_EDITOR_DEFAULT_PROJECT_ID", defaults.default_project_id),
            sql_dialect: env_or("SQL_EDITOR_SQL_DIALECT", defaults.sql_dialect),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
        }
    }

    /// Replaces the execution policy.
    pub fn with_execution_policy(mut self, policy: ExecutionPolicy) -> Self {
        self.execution_policy = policy;
        self
    }
}

/// Base URLs of the backend services the HTTP collaborators talk to.
#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub instance_service: String,
    pub database_service: String,
    pub query_service: String,
    pub connection_tree: String,
}

impl ServiceUrls {
    /// Loads service URLs from the environment.
    pub fn load() -> Self {
        Self {
            instance_service: std::env::var("INSTANCE_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            database_service: std::env::var("DATABASE_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            query_service: std::env::var("QUERY_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            connection_tree: std::env::var("CONNECTION_TREE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
        }
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(key, value = %raw, error = %e, "invalid config value, using default");
            default
        }),
        Err(_) => default,
    }
}
