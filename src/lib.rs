//! Plotpath - 分支小说阅读路径编辑服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Chapter Context: 分支章节树（只读模型）
//! - Path Context: 阅读路径构建状态机
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SessionManager, ChapterProvider, PathGateway）
//! - Commands: CQRS 命令处理器（会话生命周期、草稿修改、保存）
//! - Queries: CQRS 查询处理器（候选章节、草稿状态）
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 编辑会话内存存储
//! - Adapters: 平台后端 HTTP/Fake 客户端
//! - Reaper: 过期会话回收任务

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
