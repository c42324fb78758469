//! In-Memory 实现
//!
//! 编辑会话全部驻留内存；持久化状态都在平台后端。

mod session_manager;

pub use session_manager::InMemorySessionManager;
