//! 应用层
//!
//! CQRS: commands 处理写操作，queries 处理读操作，
//! ports 定义对基础设施层的抽象接口。

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

pub use commands::*;
pub use error::ApplicationError;
pub use ports::*;
pub use queries::*;
