//! Command Handlers

mod path_handlers;
mod session_handlers;

pub use path_handlers::*;
pub use session_handlers::*;
