//! Database and table entity models.

use serde::{Deserialize, Serialize};

use super::{DatabaseId, InstanceId, ProjectId, TableId};

/// Database record as held by the index lookups and the database service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseItem {
    /// Unique database identifier.
    pub id: DatabaseId,
    /// Database name.
    pub name: String,
    /// Hosting instance.
    #[serde(default)]
    pub instance_id: InstanceId,
    /// Owning project.
    #[serde(default)]
    pub project_id: ProjectId,
}

impl DatabaseItem {
    /// Creates a new database item.
    pub fn new(id: DatabaseId, name: &str, instance_id: InstanceId, project_id: ProjectId) -> Self {
        Self {
            id,
            name: name.to_string(),
            instance_id,
            project_id,
        }
    }
}

/// Table record as held by the table index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItem {
    pub id: TableId,
    pub name: String,
    #[serde(default)]
    pub database_id: DatabaseId,
}

impl TableItem {
    /// Creates a new table item.
    pub fn new(id: TableId, name: &str, database_id: DatabaseId) -> Self {
        Self {
            id,
            name: name.to_string(),
            database_id,
        }
    }
}
