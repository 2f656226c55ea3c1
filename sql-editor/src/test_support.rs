//! 测试夹具
//!
//! 提供示例连接树、与之匹配的索引，以及替代所有异步协作方的模拟后端。

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use common::config::AppConfig;
use common::errors::{AppError, AppResult};
use common::models::{
    ConnectionNode, DatabaseId, DatabaseItem, InstanceId, InstanceItem, NodeKind, QueryInfo,
    QueryResponse, TableItem,
};
use common::utils::SqlParserNormalizer;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::watch;

use crate::collaborators::{Collaborators, MetadataFetcher, QueryExecutor, TreeProvider};
use crate::editor::SqlEditor;
use crate::index::InMemoryConnectionIndex;

/// 实例 10 下依次为 `billing` (21) 与 `orders` (20)，实例 30 下没有数据库
pub(crate) fn sample_tree() -> Vec<ConnectionNode> {
    vec![
        ConnectionNode::with_children(
            NodeKind::Instance,
            10,
            "orders-db",
            vec![
                ConnectionNode::with_children(
                    NodeKind::Database,
                    21,
                    "billing",
                    vec![ConnectionNode::leaf(NodeKind::Table, 1, "invoices")],
                ),
                ConnectionNode::with_children(
                    NodeKind::Database,
                    20,
                    "orders",
                    vec![
                        ConnectionNode::leaf(NodeKind::Table, 2, "orders"),
                        ConnectionNode::leaf(NodeKind::Table, 3, "order_items"),
                    ],
                ),
            ],
        ),
        ConnectionNode::leaf(NodeKind::Instance, 30, "analytics"),
    ]
}

/// 与 [`sample_tree`] 对应的索引：`orders` 属于项目 2，`billing` 属于项目 3
pub(crate) fn sample_index() -> InMemoryConnectionIndex {
    let index = InMemoryConnectionIndex::from_databases(vec![
        DatabaseItem::new(20, "orders", 10, 2),
        DatabaseItem::new(21, "billing", 10, 3),
    ]);
    index.set_database_tables(
        20,
        vec![TableItem::new(2, "orders", 20), TableItem::new(3, "order_items", 20)],
    );
    index.set_database_tables(21, vec![TableItem::new(1, "invoices", 21)]);
    index
}

pub(crate) fn editor(backend: &MockBackend) -> SqlEditor {
    editor_with_config(backend, AppConfig::default())
}

pub(crate) fn editor_with_config(backend: &MockBackend, config: AppConfig) -> SqlEditor {
    common::telemetry::init_tracing();
    let shared = Arc::new(backend.clone());
    let normalizer = SqlParserNormalizer::from_config(&config);
    SqlEditor::new(
        config,
        Collaborators {
            tree_provider: shared.clone(),
            metadata: shared.clone(),
            executor: shared,
            index: Arc::new(sample_index()),
            normalizer: Arc::new(normalizer),
        },
    )
}

/// 已放行的执行器调用
#[derive(Debug, Clone, Default)]
struct Released {
    all: bool,
    calls: HashSet<usize>,
}

impl Released {
    fn allows(&self, call: usize) -> bool {
        self.all || self.calls.contains(&call)
    }
}

/// 阻塞执行器调用直到被放行，调用编号从 1 开始
#[derive(Clone)]
pub(crate) struct QueryGate {
    started: watch::Sender<usize>,
    released: watch::Sender<Released>,
}

impl QueryGate {
    /// 等待至少 `count` 个执行器调用开始
    pub(crate) async fn wait_started(&self, count: usize) {
        let mut started = self.started.subscribe();
        started
            .wait_for(|n| *n >= count)
            .await
            .expect("gate sender dropped");
    }

    /// 放行所有当前与后续调用
    pub(crate) fn release(&self) {
        self.released.send_modify(|r| r.all = true);
    }

    /// 只放行第 `call` 个调用
    pub(crate) fn release_call(&self, call: usize) {
        self.released.send_modify(|r| {
            r.calls.insert(call);
        });
    }
}

#[derive(Default)]
struct MockState {
    queries: Mutex<Vec<QueryInfo>>,
    metadata_calls: Mutex<Vec<String>>,
    response: Mutex<Option<QueryResponse>>,
    responses: Mutex<Vec<QueryResponse>>,
    query_error: Mutex<Option<String>>,
    tree_error: Mutex<Option<String>>,
    gate: Mutex<Option<QueryGate>>,
}

/// 可编排的模拟后端，克隆之间共享调用记录
#[derive(Clone, Default)]
pub(crate) struct MockBackend {
    inner: Arc<MockState>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond_with(&self, response: QueryResponse) {
        *self.inner.response.lock() = Some(response);
    }

    /// 第 n 个执行器调用返回 `responses[n - 1]`，超出部分退回 `respond_with`
    pub(crate) fn respond_in_order(&self, responses: Vec<QueryResponse>) {
        *self.inner.responses.lock() = responses;
    }

    pub(crate) fn fail_queries(&self, message: &str) {
        *self.inner.query_error.lock() = Some(message.to_string());
    }

    pub(crate) fn fail_tree(&self, message: &str) {
        *self.inner.tree_error.lock() = Some(message.to_string());
    }

    /// 使执行器调用阻塞，直到返回的闸门放行
    pub(crate) fn gate_queries(&self) -> QueryGate {
        let gate = QueryGate {
            started: watch::channel(0).0,
            released: watch::channel(Released::default()).0,
        };
        *self.inner.gate.lock() = Some(gate.clone());
        gate
    }

    pub(crate) fn queries(&self) -> Vec<QueryInfo> {
        self.inner.queries.lock().clone()
    }

    pub(crate) fn metadata_calls(&self) -> Vec<String> {
        self.inner.metadata_calls.lock().clone()
    }
}

#[async_trait]
impl TreeProvider for MockBackend {
    async fn fetch_tree(&self) -> AppResult<Vec<ConnectionNode>> {
        if let Some(message) = self.inner.tree_error.lock().clone() {
            return Err(anyhow::anyhow!(message).into());
        }
        Ok(sample_tree())
    }
}

#[async_trait]
impl MetadataFetcher for MockBackend {
    async fn fetch_instance_by_id(&self, id: InstanceId) -> AppResult<InstanceItem> {
        self.inner.metadata_calls.lock().push(format!("instance:{}", id));
        match id {
            10 => Ok(InstanceItem::new(10, "orders-db")),
            30 => Ok(InstanceItem::new(30, "analytics")),
            _ => Err(AppError::InstanceNotFound(id)),
        }
    }

    async fn fetch_database_by_id(&self, id: DatabaseId) -> AppResult<DatabaseItem> {
        self.inner.metadata_calls.lock().push(format!("database:{}", id));
        match id {
            20 => Ok(DatabaseItem::new(20, "orders", 10, 2)),
            21 => Ok(DatabaseItem::new(21, "billing", 10, 3)),
            _ => Err(AppError::DatabaseNotFound(id)),
        }
    }
}

#[async_trait]
impl QueryExecutor for MockBackend {
    async fn query(&self, info: QueryInfo) -> AppResult<QueryResponse> {
        let call = {
            let mut queries = self.inner.queries.lock();
            queries.push(info);
            queries.len()
        };

        let gate = self.inner.gate.lock().clone();
        if let Some(gate) = gate {
            gate.started.send_modify(|n| *n += 1);
            let mut released = gate.released.subscribe();
            let _ = released.wait_for(|r| r.allows(call)).await;
        }

        if let Some(message) = self.inner.query_error.lock().clone() {
            return Err(AppError::QueryFailed(message));
        }
        if let Some(response) = self.inner.responses.lock().get(call - 1).cloned() {
            return Ok(response);
        }
        Ok(self
            .inner
            .response
            .lock()
            .clone()
            .unwrap_or_else(|| QueryResponse::new(json!({"rows": []}))))
    }
}
