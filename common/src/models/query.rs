//! SQL query models.
//!
//! Contains the request handed to the query executor and the response it
//! returns.

use serde::{Deserialize, Serialize};

use super::InstanceId;

/// Opaque result payload, stored exactly as the executor returned it.
pub type QueryResult = serde_json::Value;

/// Parameters of one query execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInfo {
    /// Instance to run against.
    pub instance_id: InstanceId,
    /// Database to run against.
    pub database_name: String,
    /// SQL text to execute.
    pub statement: String,
}

impl QueryInfo {
    /// Applies caller overrides; every field set in `overrides` wins.
    pub fn merge(mut self, overrides: QueryInfoOverrides) -> Self {
        if let Some(instance_id) = overrides.instance_id {
            self.instance_id = instance_id;
        }
        if let Some(database_name) = overrides.database_name {
            self.database_name = database_name;
        }
        if let Some(statement) = overrides.statement {
            self.statement = statement;
        }
        self
    }
}

/// Per-call overrides for [`QueryInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryInfoOverrides {
    pub instance_id: Option<InstanceId>,
    pub database_name: Option<String>,
    pub statement: Option<String>,
}

/// Full response of the query executor.
///
/// `data` becomes the stored query result; any other fields are kept verbatim
/// for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Result payload.
    pub data: QueryResult,
    /// Remaining response fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl QueryResponse {
    /// Creates a response with only a data payload.
    pub fn new(data: QueryResult) -> Self {
        Self {
            data,
            extra: serde_json::Map::new(),
        }
    }
}
