//! Chapter Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 章节唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterId(Uuid);

impl ChapterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ChapterId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
