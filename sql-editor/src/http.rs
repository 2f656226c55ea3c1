//! 基于 HTTP 的协作方实现
//!
//! 通过后端服务的 JSON API 获取连接树、元数据并执行查询，
//! 统一解开标准响应包装。

use std::time::Duration;

use async_trait::async_trait;
use common::config::{AppConfig, ServiceUrls};
use common::errors::{AppError, AppResult};
use common::models::{
    ConnectionNode, DatabaseId, DatabaseItem, InstanceId, InstanceItem, QueryInfo, QueryResponse,
    QueryResult,
};
use common::response::ApiResponse;
use common::utils::IdGenerator;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::collaborators::{MetadataFetcher, QueryExecutor, TreeProvider};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// 实现全部异步协作方的后端客户端
#[derive(Clone)]
pub struct HttpBackend {
    urls: ServiceUrls,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// 创建使用配置超时时间的后端客户端
    pub fn new(urls: ServiceUrls, config: &AppConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("创建 HTTP 客户端失败: {}", e)))?;
        Ok(Self::with_client(urls, http_client))
    }

    /// 使用已有的 HTTP 客户端创建
    pub fn with_client(urls: ServiceUrls, http_client: reqwest::Client) -> Self {
        Self { urls, http_client }
    }

    fn tree_url(&self) -> String {
        format!("{}/api/sql-editor/connection-tree", self.urls.connection_tree)
    }

    fn instance_url(&self, id: InstanceId) -> String {
        format!("{}/api/instances/{}", self.urls.instance_service, id)
    }

    fn database_url(&self, id: DatabaseId) -> String {
        format!("{}/api/databases/{}", self.urls.database_service, id)
    }

    fn query_url(&self) -> String {
        format!("{}/api/query", self.urls.query_service)
    }

    /// GET 带包装的资源，404 时返回 `Ok(None)`，由调用方决定含义
    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> AppResult<Option<T>> {
        let response = self
            .http_client
            .get(url)
            .header(REQUEST_ID_HEADER, IdGenerator::request_id())
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("无法连接到 {}: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(AppError::ExternalService(format!("{} 返回状态 {}", url, status)));
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("{} 返回无效响应: {}", url, e)))?;
        envelope.into_data().map(Some)
    }
}

/// 将查询服务的响应包装转换为执行器响应
///
/// 负载放入 `data`，包装中的元数据保存在 `meta` 下。
fn into_query_response(envelope: ApiResponse<QueryResult>) -> AppResult<QueryResponse> {
    if !envelope.success {
        let message = envelope
            .error
            .map(|e| format!("{}: {}", e.code, e.message))
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(AppError::QueryFailed(message));
    }

    let meta = serde_json::to_value(&envelope.meta)
        .map_err(|e| AppError::ExternalService(format!("响应元数据无法序列化: {}", e)))?;
    let mut response = QueryResponse::new(envelope.data.unwrap_or(serde_json::Value::Null));
    response.extra.insert("meta".to_string(), meta);
    Ok(response)
}

#[async_trait]
impl TreeProvider for HttpBackend {
    async fn fetch_tree(&self) -> AppResult<Vec<ConnectionNode>> {
        let url = self.tree_url();
        // 连接树接口缺失属于服务故障，不能当作空树
        self.get_data(&url)
            .await?
            .ok_or_else(|| AppError::ExternalService(format!("连接树接口不存在: {}", url)))
    }
}

#[async_trait]
impl MetadataFetcher for HttpBackend {
    async fn fetch_instance_by_id(&self, id: InstanceId) -> AppResult<InstanceItem> {
        self.get_data(&self.instance_url(id))
            .await?
            .ok_or(AppError::InstanceNotFound(id))
    }

    async fn fetch_database_by_id(&self, id: DatabaseId) -> AppResult<DatabaseItem> {
        self.get_data(&self.database_url(id))
            .await?
            .ok_or(AppError::DatabaseNotFound(id))
    }
}

#[async_trait]
impl QueryExecutor for HttpBackend {
    async fn query(&self, info: QueryInfo) -> AppResult<QueryResponse> {
        let url = self.query_url();
        let response = self
            .http_client
            .post(&url)
            .header(REQUEST_ID_HEADER, IdGenerator::request_id())
            .json(&info)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("无法连接到查询服务: {}", e)))?;

        let status = response.status();
        let envelope: ApiResponse<QueryResult> = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("查询服务返回状态 {} 且响应无效: {}", status, e))
        })?;
        into_query_response(envelope)
    }
}
