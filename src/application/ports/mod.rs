//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod backend;
mod session_manager;

pub use backend::{ChapterProviderPort, GatewayError, PathGatewayPort, PersistedPath};
pub use session_manager::{EditSession, SessionError, SessionManagerPort};
