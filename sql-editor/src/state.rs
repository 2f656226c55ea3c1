//! 编辑器状态模块
//!
//! 字段均为私有，只能通过下列 setter 修改。

use common::models::{ConnectionContext, ConnectionContextPatch, ConnectionNode, QueryResult};

use crate::tree::TreeStore;

/// 单个编辑器的全部状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlEditorState {
    tree: TreeStore,
    connection_context: ConnectionContext,
    query_statement: String,
    selected_statement: String,
    is_executing: bool,
    query_result: Option<QueryResult>,
    is_show_executing_hint: bool,
}

/// [`SqlEditorState`] 的部分更新，`None` 字段保持不变
#[derive(Debug, Clone, Default)]
pub struct SqlEditorStatePatch {
    pub connection_tree: Option<Vec<ConnectionNode>>,
    pub connection_context: Option<ConnectionContext>,
    pub query_statement: Option<String>,
    pub selected_statement: Option<String>,
    pub is_executing: Option<bool>,
    /// `Some(None)` 清空已保存的结果
    pub query_result: Option<Option<QueryResult>>,
    pub is_show_executing_hint: Option<bool>,
}

impl SqlEditorState {
    pub fn tree(&self) -> &TreeStore {
        &self.tree
    }

    pub fn connection_context(&self) -> &ConnectionContext {
        &self.connection_context
    }

    /// 编辑器中的完整文本
    pub fn query_statement(&self) -> &str {
        &self.query_statement
    }

    /// 选中的文本，未选中时为空
    pub fn selected_statement(&self) -> &str {
        &self.selected_statement
    }

    pub fn is_executing(&self) -> bool {
        self.is_executing
    }

    pub fn query_result(&self) -> Option<&QueryResult> {
        self.query_result.as_ref()
    }

    pub fn is_show_executing_hint(&self) -> bool {
        self.is_show_executing_hint
    }

    /// 对任意顶层字段做部分更新
    pub fn set_sql_editor_state(&mut self, patch: SqlEditorStatePatch) {
        if let Some(nodes) = patch.connection_tree {
            self.tree.set_tree(nodes);
        }
        if let Some(context) = patch.connection_context {
            self.connection_context = context;
        }
        if let Some(statement) = patch.query_statement {
            self.query_statement = statement;
        }
        if let Some(statement) = patch.selected_statement {
            self.selected_statement = statement;
        }
        if let Some(executing) = patch.is_executing {
            self.is_executing = executing;
        }
        if let Some(result) = patch.query_result {
            self.query_result = result;
        }
        if let Some(hint) = patch.is_show_executing_hint {
            self.is_show_executing_hint = hint;
        }
    }

    pub fn set_connection_tree(&mut self, nodes: Vec<ConnectionNode>) {
        self.tree.set_tree(nodes);
    }

    pub fn set_query_result(&mut self, result: Option<QueryResult>) {
        self.query_result = result;
    }

    /// 将 `patch` 逐字段合并到当前连接上下文
    pub fn set_connection_context(&mut self, patch: ConnectionContextPatch) {
        patch.apply_to(&mut self.connection_context);
    }

    pub fn set_is_executing(&mut self, executing: bool) {
        self.is_executing = executing;
    }

    pub fn set_query_statement(&mut self, statement: impl Into<String>) {
        self.query_statement = statement.into();
    }

    pub fn set_selected_statement(&mut self, statement: impl Into<String>) {
        self.selected_statement = statement.into();
    }

    pub fn set_is_show_executing_hint(&mut self, show: bool) {
        self.is_show_executing_hint = show;
    }
}
