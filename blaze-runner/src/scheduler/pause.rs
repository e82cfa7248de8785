//! Wait primitive used between poll attempts

use async_trait::async_trait;
use std::time::Duration;

/// Suspends the current task for a while
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPause;

#[async_trait]
impl Pause for TokioPause {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately; for tests and local backends that answer synchronously
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediatePause;

#[async_trait]
impl Pause for ImmediatePause {
    async fn pause(&self, _duration: Duration) {}
}
