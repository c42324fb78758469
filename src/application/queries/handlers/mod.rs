//! Query Handlers

mod path_handlers;

pub use path_handlers::*;
