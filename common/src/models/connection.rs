//! Connection hierarchy and context models.
//!
//! The hierarchy is instance → database → table. Ids are only unique within
//! their own level, so a node id means nothing without knowing its depth.

use serde::{Deserialize, Serialize};

use super::{DatabaseId, InstanceId, TableId};

/// Instance metadata as returned by the instance service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceItem {
    /// Unique instance identifier.
    pub id: InstanceId,
    /// Instance display name.
    pub name: String,
}

impl InstanceItem {
    /// Creates instance metadata.
    pub fn new(id: InstanceId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Level of a node in the connection tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Instance,
    Database,
    Table,
}

/// One addressable object in the connection tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionNode {
    /// Identifier, unique within its level only.
    pub id: i64,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Tree level.
    pub kind: NodeKind,
    /// Ordered children; empty for tables.
    #[serde(default)]
    pub children: Vec<ConnectionNode>,
}

impl ConnectionNode {
    /// Creates a childless node.
    pub fn leaf(kind: NodeKind, id: i64, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            kind,
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children.
    pub fn with_children(kind: NodeKind, id: i64, label: &str, children: Vec<ConnectionNode>) -> Self {
        Self {
            id,
            label: label.to_string(),
            kind,
            children,
        }
    }
}

/// The coordinate the editor is currently focused on.
///
/// Names are copies taken when the context was set and are never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionContext {
    /// Whether the context was established from a deep link.
    pub has_slug: bool,
    pub instance_id: InstanceId,
    pub instance_name: String,
    pub database_id: DatabaseId,
    pub database_name: String,
    pub table_id: TableId,
    pub table_name: String,
    /// Whether the tree is being (re)loaded.
    pub is_loading_tree: bool,
    /// Transient picker selection, independent of the committed context.
    pub selected_database_id: DatabaseId,
    /// Transient picker selection, independent of the committed context.
    pub selected_table_name: String,
}

/// Partial update of a [`ConnectionContext`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionContextPatch {
    pub has_slug: Option<bool>,
    pub instance_id: Option<InstanceId>,
    pub instance_name: Option<String>,
    pub database_id: Option<DatabaseId>,
    pub database_name: Option<String>,
    pub table_id: Option<TableId>,
    pub table_name: Option<String>,
    pub is_loading_tree: Option<bool>,
    pub selected_database_id: Option<DatabaseId>,
    pub selected_table_name: Option<String>,
}

impl ConnectionContextPatch {
    /// Merges the patch into `context`, field by field.
    pub fn apply_to(self, context: &mut ConnectionContext) {
        if let Some(v) = self.has_slug {
            context.has_slug = v;
        }
        if let Some(v) = self.instance_id {
            context.instance_id = v;
        }
        if let Some(v) = self.instance_name {
            context.instance_name = v;
        }
        if let Some(v) = self.database_id {
            context.database_id = v;
        }
        if let Some(v) = self.database_name {
            context.database_name = v;
        }
        if let Some(v) = self.table_id {
            context.table_id = v;
        }
        if let Some(v) = self.table_name {
            context.table_name = v;
        }
        if let Some(v) = self.is_loading_tree {
            context.is_loading_tree = v;
        }
        if let Some(v) = self.selected_database_id {
            context.selected_database_id = v;
        }
        if let Some(v) = self.selected_table_name {
            context.selected_table_name = v;
        }
    }
}
