//! 内存中的 [`ConnectionIndex`] 实现

use std::collections::HashMap;

use common::models::{DatabaseId, DatabaseItem, InstanceId, ProjectId, TableItem};
use parking_lot::RwLock;

use crate::collaborators::ConnectionIndex;

/// 由加载实体列表的一方填充的索引
///
/// 项目映射保持插入顺序，替换某个项目的列表时保留其原有位置。
#[derive(Debug, Default)]
pub struct InMemoryConnectionIndex {
    databases_by_instance: RwLock<HashMap<InstanceId, Vec<DatabaseItem>>>,
    tables_by_database: RwLock<HashMap<DatabaseId, Vec<TableItem>>>,
    databases_by_project: RwLock<Vec<(ProjectId, Vec<DatabaseItem>)>>,
}

impl InMemoryConnectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从扁平的数据库列表构建索引，按实例与项目分组，顺序为首次出现的顺序
    pub fn from_databases(databases: Vec<DatabaseItem>) -> Self {
        let index = Self::new();
        {
            let mut by_instance = index.databases_by_instance.write();
            let mut by_project = index.databases_by_project.write();
            for database in databases {
                by_instance
                    .entry(database.instance_id)
                    .or_default()
                    .push(database.clone());
                match by_project.iter_mut().find(|(id, _)| *id == database.project_id) {
                    Some((_, list)) => list.push(database),
                    None => by_project.push((database.project_id, vec![database])),
                }
            }
        }
        index
    }

    pub fn set_instance_databases(&self, instance_id: InstanceId, databases: Vec<DatabaseItem>) {
        self.databases_by_instance.write().insert(instance_id, databases);
    }

    pub fn set_database_tables(&self, database_id: DatabaseId, tables: Vec<TableItem>) {
        self.tables_by_database.write().insert(database_id, tables);
    }

    pub fn set_project_databases(&self, project_id: ProjectId, databases: Vec<DatabaseItem>) {
        let mut by_project = self.databases_by_project.write();
        match by_project.iter_mut().find(|(id, _)| *id == project_id) {
            Some((_, list)) => *list = databases,
            None => by_project.push((project_id, databases)),
        }
    }
}

impl ConnectionIndex for InMemoryConnectionIndex {
    fn database_list_by_instance_id(&self, id: InstanceId) -> Vec<DatabaseItem> {
        self.databases_by_instance
            .read()
            .get(&id)
            .cloned()
            .unwrap_or_default()
    }

    fn table_list_by_database_id(&self, id: DatabaseId) -> Vec<TableItem> {
        self.tables_by_database
            .read()
            .get(&id)
            .cloned()
            .unwrap_or_default()
    }

    fn database_list_by_project_id(&self) -> Vec<(ProjectId, Vec<DatabaseItem>)> {
        self.databases_by_project.read().clone()
    }
}
