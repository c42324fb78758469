//! Session Reaper - 过期编辑会话回收
//!
//! 周期性关闭超过空闲时限的编辑会话。草稿只存在于内存中，
//! 回收即意味着未保存的编辑被丢弃。

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SessionManagerPort;

/// Reaper 配置
#[derive(Debug, Clone)]
pub struct SessionReaperConfig {
    /// 扫描间隔（秒）
    pub interval_secs: u64,
    /// 会话空闲过期时间（秒）
    pub expire_secs: u64,
}

/// 过期会话回收任务
pub struct SessionReaper {
    config: SessionReaperConfig,
    session_manager: Arc<dyn SessionManagerPort>,
}

impl SessionReaper {
    pub fn new(config: SessionReaperConfig, session_manager: Arc<dyn SessionManagerPort>) -> Self {
        Self {
            config,
            session_manager,
        }
    }

    pub async fn run(self) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        tracing::info!(
            interval_secs = self.config.interval_secs,
            expire_secs = self.config.expire_secs,
            "Session reaper started"
        );

        loop {
            ticker.tick().await;

            let expired = self
                .session_manager
                .get_expired_sessions(self.config.expire_secs);
            if expired.is_empty() {
                continue;
            }

            let mut closed = 0;
            for session_id in expired {
                if self.session_manager.close(&session_id).is_ok() {
                    closed += 1;
                }
            }
            tracing::info!(closed = closed, "Idle edit sessions reaped");
        }
    }
}
