//! HTTP Backend Client - 调用平台后端 REST API
//!
//! 实现 ChapterProviderPort 与 PathGatewayPort。
//!
//! 后端 API（{errno, error, data} 信封）:
//! GET  /api/novels/{novel_id}/chapters/tree          章节树
//! GET  /api/novels/{novel_id}/reading-paths/recommended  作者推荐路径
//! GET  /api/novels/{novel_id}/reading-paths/{path_id}    路径详情
//! POST /api/novels/{novel_id}/reading-paths              创建路径
//! PUT  /api/novels/{novel_id}/reading-paths/{path_id}    更新路径

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::{
    ChapterProviderPort, GatewayError, PathGatewayPort, PersistedPath,
};
use crate::domain::chapter::{ChapterForest, ChapterId, ChapterNode};
use crate::domain::path::{PathStep, ReadingPath};

// ============================================================================
// Wire DTOs
// ============================================================================

/// 后端统一响应信封
#[derive(Debug, Deserialize)]
struct BackendEnvelope<T> {
    errno: i32,
    #[serde(default)]
    error: String,
    data: Option<T>,
}

/// 章节树节点（后端 wire 形态）
#[derive(Debug, Deserialize)]
struct ChapterTreeDto {
    id: Uuid,
    title: String,
    #[serde(default)]
    word_count: u32,
    author_id: Uuid,
    #[serde(default)]
    children: Vec<ChapterTreeDto>,
}

impl ChapterTreeDto {
    fn into_node(self) -> Result<ChapterNode, GatewayError> {
        let children = self
            .children
            .into_iter()
            .map(ChapterTreeDto::into_node)
            .collect::<Result<Vec<_>, _>>()?;
        let node = ChapterNode::new(
            ChapterId::from_uuid(self.id),
            self.title,
            self.word_count,
            self.author_id,
        )
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Ok(node.with_children(children))
    }
}

/// 路径详情（后端 wire 形态）
#[derive(Debug, Deserialize)]
struct PathDetailDto {
    path_id: Uuid,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    steps: Vec<PathStepDto>,
}

#[derive(Debug, Deserialize)]
struct PathStepDto {
    chapter_id: Uuid,
    #[serde(default)]
    chapter_title: String,
    #[serde(default)]
    rationale: String,
}

impl From<PathDetailDto> for PersistedPath {
    fn from(dto: PathDetailDto) -> Self {
        let steps = dto
            .steps
            .into_iter()
            .map(|s| {
                PathStep::new(
                    ChapterId::from_uuid(s.chapter_id),
                    s.chapter_title,
                    s.rationale,
                )
            })
            .collect();
        PersistedPath {
            path_id: dto.path_id,
            path: ReadingPath::new(dto.name, dto.description, steps),
        }
    }
}

/// 创建/更新路径请求体
#[derive(Debug, Serialize)]
struct PathPayload<'a> {
    name: &'a str,
    description: &'a str,
    path_type: &'a str,
    steps: Vec<PathStepPayload<'a>>,
}

#[derive(Debug, Serialize)]
struct PathStepPayload<'a> {
    chapter_id: &'a Uuid,
    rationale: &'a str,
}

impl<'a> PathPayload<'a> {
    fn from_path(path: &'a ReadingPath) -> Self {
        Self {
            name: path.name(),
            description: path.description(),
            path_type: path.path_type(),
            steps: path
                .steps()
                .iter()
                .map(|s| PathStepPayload {
                    chapter_id: s.chapter_id().as_uuid(),
                    rationale: s.rationale(),
                })
                .collect(),
        }
    }
}

/// 创建路径响应体
#[derive(Debug, Deserialize)]
struct CreatedPathDto {
    path_id: Uuid,
}

// ============================================================================
// Client
// ============================================================================

/// HTTP Backend 客户端配置
#[derive(Debug, Clone)]
pub struct HttpBackendClientConfig {
    /// 平台后端基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 只读请求的最大重试次数
    pub max_retries: u32,
}

impl Default for HttpBackendClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            timeout_secs: 30,
            max_retries: 0,
        }
    }
}

impl HttpBackendClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Backend 客户端
pub struct HttpBackendClient {
    client: Client,
    config: HttpBackendClientConfig,
}

impl HttpBackendClient {
    pub fn new(config: HttpBackendClientConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn map_send_error(e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::RequestFailed(format!("Cannot connect to backend: {}", e))
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }

    /// 解开响应信封；errno != 0 转换为网关错误
    async fn unwrap_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GatewayError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let envelope: BackendEnvelope<T> = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        match envelope.errno {
            0 => envelope
                .data
                .ok_or_else(|| GatewayError::InvalidResponse("missing data field".to_string())),
            404 => Err(GatewayError::NotFound(envelope.error)),
            _ => Err(GatewayError::ServiceError(envelope.error)),
        }
    }

    /// GET 请求，网络错误时按配置重试
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        let mut last_err = None;
        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tracing::debug!(url = %url, attempt = attempt, "Retrying backend request");
            }
            match self.client.get(url).send().await {
                Ok(response) => return Self::unwrap_envelope(response).await,
                Err(e) => last_err = Some(Self::map_send_error(e)),
            }
        }
        Err(last_err
            .unwrap_or_else(|| GatewayError::RequestFailed("no attempts made".to_string())))
    }
}

#[async_trait]
impl ChapterProviderPort for HttpBackendClient {
    async fn get_chapter_tree(&self, novel_id: Uuid) -> Result<ChapterForest, GatewayError> {
        let url = self.url(&format!("/api/novels/{}/chapters/tree", novel_id));
        let roots: Vec<ChapterTreeDto> = self.get_json(&url).await?;

        let roots = roots
            .into_iter()
            .map(ChapterTreeDto::into_node)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(novel_id = %novel_id, roots = roots.len(), "Chapter tree fetched");
        Ok(ChapterForest::new(roots))
    }
}

#[async_trait]
impl PathGatewayPort for HttpBackendClient {
    async fn get_author_recommended_path(
        &self,
        novel_id: Uuid,
    ) -> Result<Option<PersistedPath>, GatewayError> {
        let url = self.url(&format!("/api/novels/{}/reading-paths/recommended", novel_id));
        match self.get_json::<PathDetailDto>(&url).await {
            Ok(dto) => Ok(Some(dto.into())),
            // 推荐路径尚未创建
            Err(GatewayError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_path_detail(
        &self,
        novel_id: Uuid,
        path_id: Uuid,
    ) -> Result<PersistedPath, GatewayError> {
        let url = self.url(&format!("/api/novels/{}/reading-paths/{}", novel_id, path_id));
        let dto: PathDetailDto = self.get_json(&url).await?;
        Ok(dto.into())
    }

    async fn create_path(
        &self,
        novel_id: Uuid,
        path: &ReadingPath,
    ) -> Result<Uuid, GatewayError> {
        let url = self.url(&format!("/api/novels/{}/reading-paths", novel_id));
        let response = self
            .client
            .post(&url)
            .json(&PathPayload::from_path(path))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let created: CreatedPathDto = Self::unwrap_envelope(response).await?;

        tracing::info!(
            novel_id = %novel_id,
            path_id = %created.path_id,
            steps = path.len(),
            "Reading path created on backend"
        );
        Ok(created.path_id)
    }

    async fn update_path(
        &self,
        novel_id: Uuid,
        path_id: Uuid,
        path: &ReadingPath,
    ) -> Result<(), GatewayError> {
        let url = self.url(&format!("/api/novels/{}/reading-paths/{}", novel_id, path_id));
        let response = self
            .client
            .put(&url)
            .json(&PathPayload::from_path(path))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let _: serde_json::Value = Self::unwrap_envelope(response).await?;

        tracing::info!(
            novel_id = %novel_id,
            path_id = %path_id,
            steps = path.len(),
            "Reading path updated on backend"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpBackendClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpBackendClientConfig::new("http://backend:8080").with_timeout(10);
        assert_eq!(config.base_url, "http://backend:8080");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_chapter_tree_dto_into_node() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "第一章",
            "word_count": 3200,
            "author_id": Uuid::new_v4(),
            "children": [
                {"id": Uuid::new_v4(), "title": "第二章", "author_id": Uuid::new_v4()}
            ]
        });
        let dto: ChapterTreeDto = serde_json::from_value(json).unwrap();
        let node = dto.into_node().unwrap();
        assert_eq!(node.title(), "第一章");
        assert_eq!(node.children().len(), 1);
        // 缺省字段走 default
        assert_eq!(node.children()[0].word_count(), 0);
    }

    #[test]
    fn test_empty_title_in_tree_rejected() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "title": "",
            "author_id": Uuid::new_v4()
        });
        let dto: ChapterTreeDto = serde_json::from_value(json).unwrap();
        assert!(matches!(
            dto.into_node(),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_path_payload_shape() {
        let step = PathStep::new(ChapterId::new(), "第一章", "起始章节");
        let path = ReadingPath::new("主线", "推荐主线", vec![step]);
        let payload = PathPayload::from_path(&path);
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["path_type"], "author_recommended");
        assert_eq!(value["steps"][0]["rationale"], "起始章节");
        assert!(value["steps"][0].get("chapter_title").is_none());
    }
}
