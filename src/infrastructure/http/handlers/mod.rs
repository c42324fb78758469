//! HTTP Handlers

mod path;
mod ping;
mod session;

pub use path::*;
pub use ping::*;
pub use session::*;
