//! 协调器依赖的外部服务接口

use std::sync::Arc;

use async_trait::async_trait;
use common::errors::AppResult;
use common::models::{
    ConnectionNode, DatabaseId, DatabaseItem, InstanceId, InstanceItem, ProjectId, QueryInfo,
    QueryResponse, TableItem,
};
use common::utils::SqlNormalizer;

/// 提供完整的连接层级
#[async_trait]
pub trait TreeProvider: Send + Sync {
    /// 获取实例节点，每个实例包含其数据库及数据表
    async fn fetch_tree(&self) -> AppResult<Vec<ConnectionNode>>;
}

/// 按 ID 查询实例与数据库元数据
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch_instance_by_id(&self, id: InstanceId) -> AppResult<InstanceItem>;

    async fn fetch_database_by_id(&self, id: DatabaseId) -> AppResult<DatabaseItem>;
}

/// 在实例上执行查询
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(&self, info: QueryInfo) -> AppResult<QueryResponse>;
}

/// 对已加载实体的只读同步查询
pub trait ConnectionIndex: Send + Sync {
    /// 实例下的数据库列表
    fn database_list_by_instance_id(&self, id: InstanceId) -> Vec<DatabaseItem>;

    /// 数据库下的数据表，顺序由索引决定
    fn table_list_by_database_id(&self, id: DatabaseId) -> Vec<TableItem>;

    /// 项目到数据库列表的映射
    ///
    /// 反向查找按返回顺序遍历，实现必须保持顺序稳定。
    fn database_list_by_project_id(&self) -> Vec<(ProjectId, Vec<DatabaseItem>)>;
}

/// 单个编辑器使用的协作方集合
#[derive(Clone)]
pub struct Collaborators {
    pub tree_provider: Arc<dyn TreeProvider>,
    pub metadata: Arc<dyn MetadataFetcher>,
    pub executor: Arc<dyn QueryExecutor>,
    pub index: Arc<dyn ConnectionIndex>,
    pub normalizer: Arc<dyn SqlNormalizer>,
}
