//! SQL 编辑器连接上下文与查询状态协调模块
//!
//! 记录编辑器当前聚焦的实例、数据库与数据表，保存正在编写的 SQL，
//! 推导规范化后的当前语句，并通过可替换的协作方执行查询。
//!
//! ```ignore
//! let backend = Arc::new(HttpBackend::new(ServiceUrls::load(), &config)?);
//! let normalizer = SqlParserNormalizer::from_config(&config);
//! let editor = SqlEditor::new(config, Collaborators {
//!     tree_provider: backend.clone(),
//!     metadata: backend.clone(),
//!     executor: backend,
//!     index: Arc::new(InMemoryConnectionIndex::new()),
//!     normalizer: Arc::new(normalizer),
//! });
//! editor.fetch_connection_by_instance_id_and_database_id(10, 20).await?;
//! editor.set_query_statement("select * from orders");
//! let response = editor.execute_query(QueryInfoOverrides::default()).await?;
//! ```

pub mod collaborators;
pub mod editor;
pub mod http;
pub mod index;
pub mod resolver;
pub mod state;
pub mod statement;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_support;

// 重新导出常用类型
pub use collaborators::{Collaborators, ConnectionIndex, MetadataFetcher, QueryExecutor, TreeProvider};
pub use editor::SqlEditor;
pub use http::HttpBackend;
pub use index::InMemoryConnectionIndex;
pub use resolver::{current_slug, ConnectionInfo, ContextResolver};
pub use state::{SqlEditorState, SqlEditorStatePatch};
pub use statement::{active_statement, parsed_statement};
pub use tree::TreeStore;
