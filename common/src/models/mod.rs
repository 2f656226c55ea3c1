//! Shared data models.

pub mod connection;
pub mod database;
pub mod query;

/// Identifier of an instance (database server entry).
pub type InstanceId = i64;
/// Identifier of a database; unique among databases only.
pub type DatabaseId = i64;
/// Identifier of a table; unique among tables only.
pub type TableId = i64;
/// Identifier of a project owning databases.
pub type ProjectId = i64;

// Re-export commonly used types
pub use connection::{
    ConnectionContext, ConnectionContextPatch, ConnectionNode, InstanceItem, NodeKind,
};
pub use database::{DatabaseItem, TableItem};
pub use query::{QueryInfo, QueryInfoOverrides, QueryResponse, QueryResult};
