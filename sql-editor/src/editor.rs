//! SQL 编辑器状态协调模块
//!
//! 持有编辑器状态，并协调以下异步流程：
//! - 加载连接树
//! - 通过实例 ID 与数据库 ID 建立连接上下文（深链接）
//! - 执行查询
//!
//! 状态锁不会跨越 await 持有，因此多个流程可以交错执行。

use common::config::{AppConfig, ExecutionPolicy};
use common::errors::{AppError, AppResult};
use common::models::{
    ConnectionContext, ConnectionContextPatch, ConnectionNode, DatabaseId, InstanceId, ProjectId,
    QueryInfo, QueryInfoOverrides, QueryResponse, QueryResult,
};
use common::utils::IdGenerator;
use parking_lot::RwLock;

use crate::collaborators::Collaborators;
use crate::resolver::{current_slug, ConnectionInfo, ContextResolver};
use crate::state::{SqlEditorState, SqlEditorStatePatch};
use crate::statement::{active_statement, parsed_statement};

/// SQL 编辑器的连接上下文与查询状态协调器
pub struct SqlEditor {
    state: RwLock<SqlEditorState>,
    collaborators: Collaborators,
    config: AppConfig,
}

impl SqlEditor {
    /// 创建状态为零值的协调器
    pub fn new(config: AppConfig, collaborators: Collaborators) -> Self {
        Self {
            state: RwLock::new(SqlEditorState::default()),
            collaborators,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 返回完整状态的副本
    pub fn snapshot(&self) -> SqlEditorState {
        self.state.read().clone()
    }

    pub fn connection_context(&self) -> ConnectionContext {
        self.state.read().connection_context().clone()
    }

    pub fn query_result(&self) -> Option<QueryResult> {
        self.state.read().query_result().cloned()
    }

    pub fn is_executing(&self) -> bool {
        self.state.read().is_executing()
    }

    // =========================================================================
    // 状态变更
    // =========================================================================

    pub fn set_sql_editor_state(&self, patch: SqlEditorStatePatch) {
        self.state.write().set_sql_editor_state(patch);
    }

    pub fn set_connection_tree(&self, nodes: Vec<ConnectionNode>) {
        tracing::debug!(instances = nodes.len(), "连接树已替换");
        self.state.write().set_connection_tree(nodes);
    }

    pub fn set_query_result(&self, result: Option<QueryResult>) {
        self.state.write().set_query_result(result);
    }

    pub fn set_connection_context(&self, patch: ConnectionContextPatch) {
        self.state.write().set_connection_context(patch);
    }

    pub fn set_is_executing(&self, executing: bool) {
        self.state.write().set_is_executing(executing);
    }

    pub fn set_query_statement(&self, statement: impl Into<String>) {
        self.state.write().set_query_statement(statement);
    }

    pub fn set_selected_statement(&self, statement: impl Into<String>) {
        self.state.write().set_selected_statement(statement);
    }

    pub fn set_is_show_executing_hint(&self, show: bool) {
        self.state.write().set_is_show_executing_hint(show);
    }

    // =========================================================================
    // 派生值
    // =========================================================================

    /// 当前实例在连接树中的节点，不存在时返回 `None`
    pub fn connection_tree_by_instance_id(&self) -> Option<ConnectionNode> {
        let state = self.state.read();
        self.resolver(&state).resolve_instance_node().cloned()
    }

    pub fn connection_info_by_instance_id(&self) -> ConnectionInfo {
        let state = self.state.read();
        self.resolver(&state).resolve_connection_info()
    }

    pub fn find_project_id_by_database_id(&self, database_id: DatabaseId) -> ProjectId {
        let state = self.state.read();
        self.resolver(&state).find_project_id_by_database_id(database_id)
    }

    pub fn current_slug(&self) -> String {
        let state = self.state.read();
        self.resolver(&state).current_slug()
    }

    pub fn is_empty_statement(&self) -> bool {
        let state = self.state.read();
        self.resolver(&state).is_empty_statement()
    }

    /// 规范化后的当前语句；无法解析时原样返回
    pub fn parsed_statement(&self) -> String {
        let state = self.state.read();
        parsed_statement(&state, self.collaborators.normalizer.as_ref())
    }

    fn resolver<'a>(&'a self, state: &'a SqlEditorState) -> ContextResolver<'a> {
        ContextResolver::new(
            state,
            self.collaborators.index.as_ref(),
            self.config.default_project_id,
        )
    }

    // =========================================================================
    // 异步流程
    // =========================================================================

    /// 从连接树提供方重新加载连接树
    ///
    /// 加载期间 `is_loading_tree` 置位，无论成功与否结束后都会清除。
    #[tracing::instrument(skip(self), fields(service = %self.config.service_name))]
    pub async fn load_connection_tree(&self) -> AppResult<()> {
        self.set_connection_context(ConnectionContextPatch {
            is_loading_tree: Some(true),
            ..Default::default()
        });

        let fetched = self.collaborators.tree_provider.fetch_tree().await;

        let mut state = self.state.write();
        state.set_connection_context(ConnectionContextPatch {
            is_loading_tree: Some(false),
            ..Default::default()
        });
        let nodes = fetched.map_err(|e| {
            tracing::error!(code = e.code(), error = %e, "加载连接树失败");
            e
        })?;
        tracing::info!(instances = nodes.len(), "连接树已加载");
        state.set_connection_tree(nodes);
        Ok(())
    }

    /// 在当前实例与数据库上执行当前语句
    ///
    /// 选中文本优先于整个缓冲区，且按原文发送（不做规范化）。`overrides`
    /// 中的字段逐个覆盖请求。成功时响应的 `data` 存为查询结果并返回完整响应。
    /// `is_executing` 覆盖整个执行器调用，失败时同样复位。
    #[tracing::instrument(
        skip(self, overrides),
        fields(service = %self.config.service_name, execution_id = %IdGenerator::execution_id())
    )]
    pub async fn execute_query(&self, overrides: QueryInfoOverrides) -> AppResult<QueryResponse> {
        let info = {
            let mut state = self.state.write();
            if state.is_executing() && self.config.execution_policy == ExecutionPolicy::RejectIfBusy {
                tracing::warn!("已有查询在执行，拒绝本次请求");
                return Err(AppError::ExecutionInProgress);
            }
            state.set_is_executing(true);

            let context = state.connection_context();
            QueryInfo {
                instance_id: context.instance_id,
                database_name: context.database_name.clone(),
                statement: active_statement(state.selected_statement(), state.query_statement())
                    .to_string(),
            }
            .merge(overrides)
        };

        tracing::info!(
            instance_id = info.instance_id,
            database = %info.database_name,
            "开始执行查询"
        );
        let outcome = self.collaborators.executor.query(info).await;

        // 最后完成的调用写入标志与结果
        let mut state = self.state.write();
        state.set_is_executing(false);
        match outcome {
            Ok(response) => {
                state.set_query_result(Some(response.data.clone()));
                tracing::info!("查询执行完成");
                Ok(response)
            }
            Err(e) => {
                tracing::error!(code = e.code(), error = %e, "查询执行失败");
                Err(e)
            }
        }
    }

    /// 仅凭 ID 建立连接上下文（深链接）
    ///
    /// 先获取实例信息，再获取数据库信息。两者都成功后才清空查询结果，
    /// 并以 `has_slug = true` 提交上下文。
    #[tracing::instrument(skip(self), fields(service = %self.config.service_name))]
    pub async fn fetch_connection_by_instance_id_and_database_id(
        &self,
        instance_id: InstanceId,
        database_id: DatabaseId,
    ) -> AppResult<()> {
        let instance = self
            .collaborators
            .metadata
            .fetch_instance_by_id(instance_id)
            .await
            .map_err(|e| {
                tracing::error!(code = e.code(), error = %e, "获取实例信息失败");
                e
            })?;
        let database = self
            .collaborators
            .metadata
            .fetch_database_by_id(database_id)
            .await
            .map_err(|e| {
                tracing::error!(code = e.code(), error = %e, "获取数据库信息失败");
                e
            })?;

        let mut state = self.state.write();
        state.set_query_result(None);
        state.set_connection_context(ConnectionContextPatch {
            has_slug: Some(true),
            instance_id: Some(instance_id),
            instance_name: Some(instance.name),
            database_id: Some(database_id),
            database_name: Some(database.name),
            ..Default::default()
        });
        tracing::info!(slug = %current_slug(state.connection_context()), "连接上下文已设置");
        Ok(())
    }
}
