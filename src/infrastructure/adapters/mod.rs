//! Adapters - 外部协作方适配器

pub mod backend;

pub use backend::{FakeBackendClient, HttpBackendClient, HttpBackendClientConfig};
