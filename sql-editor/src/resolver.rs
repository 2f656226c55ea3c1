//! 连接上下文解析模块
//!
//! 推导当前实例节点、可达的数据库与数据表、数据库所属项目以及当前选择的 slug。

use common::models::{
    ConnectionContext, ConnectionNode, DatabaseId, DatabaseItem, ProjectId, TableItem,
};

use crate::collaborators::ConnectionIndex;
use crate::state::SqlEditorState;

/// 当前实例下可达的全部对象
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionInfo {
    /// 实例节点，当前实例不在树中时为 `None`
    pub instance: Option<ConnectionNode>,
    /// 索引中记录的该实例数据库
    pub database_list: Vec<DatabaseItem>,
    /// 实例下每个数据库子节点的数据表，保持树中顺序
    pub table_list: Vec<TableItem>,
}

/// 结合编辑器状态与索引查询的只读视图
pub struct ContextResolver<'a> {
    state: &'a SqlEditorState,
    index: &'a dyn ConnectionIndex,
    default_project_id: ProjectId,
}

impl<'a> ContextResolver<'a> {
    pub fn new(
        state: &'a SqlEditorState,
        index: &'a dyn ConnectionIndex,
        default_project_id: ProjectId,
    ) -> Self {
        Self {
            state,
            index,
            default_project_id,
        }
    }

    /// 当前实例的树节点
    pub fn resolve_instance_node(&self) -> Option<&'a ConnectionNode> {
        self.state
            .tree()
            .find_node_by_instance_id(self.state.connection_context().instance_id)
    }

    /// 当前实例下可达的数据库与数据表
    ///
    /// 数据表按数据库子节点的树中顺序拼接，不排序也不去重。
    pub fn resolve_connection_info(&self) -> ConnectionInfo {
        let Some(instance) = self.resolve_instance_node() else {
            return ConnectionInfo::default();
        };

        let database_list = self.index.database_list_by_instance_id(instance.id);
        let table_list = instance
            .children
            .iter()
            .flat_map(|database| self.index.table_list_by_database_id(database.id))
            .collect();

        ConnectionInfo {
            instance: Some(instance.clone()),
            database_list,
            table_list,
        }
    }

    /// `database_id` 所属的项目
    ///
    /// 按索引顺序扫描项目，第一个命中者胜出；没有命中时返回配置的默认项目。
    pub fn find_project_id_by_database_id(&self, database_id: DatabaseId) -> ProjectId {
        self.index
            .database_list_by_project_id()
            .into_iter()
            .find(|(_, databases)| databases.iter().any(|db| db.id == database_id))
            .map(|(project_id, _)| project_id)
            .unwrap_or(self.default_project_id)
    }

    /// 当前上下文的 `instanceId/databaseId/tableId`
    pub fn current_slug(&self) -> String {
        current_slug(self.state.connection_context())
    }

    /// 编辑器文本是否为空
    ///
    /// 只判断字面为空，仅含空白的文本不算空。
    pub fn is_empty_statement(&self) -> bool {
        self.state.query_statement().is_empty()
    }
}

/// 上下文的 slug，未设置的 ID 显示为 `0`
pub fn current_slug(context: &ConnectionContext) -> String {
    format!(
        "{}/{}/{}",
        context.instance_id, context.database_id, context.table_id
    )
}
