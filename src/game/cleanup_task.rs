use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info, instrument};

use super::GameService;

/// Configuration for the session cleanup task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupConfig {
    /// How often to sweep the live sessions
    pub cleanup_interval: Duration,
    /// How long an open session may go untouched before it is dropped
    pub idle_timeout: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(5 * 60), // 5 minutes
            idle_timeout: Duration::from_secs(2 * 60 * 60), // 2 hours
        }
    }
}

/// Periodically drops submitted and abandoned sessions. Runs until the task is aborted.
#[instrument(skip(game_service))]
pub async fn start_cleanup_task(game_service: Arc<GameService>, config: CleanupConfig) {
    info!(
        cleanup_interval_secs = config.cleanup_interval.as_secs(),
        idle_timeout_secs = config.idle_timeout.as_secs(),
        "Starting session cleanup background task"
    );

    let mut cleanup_interval = interval(config.cleanup_interval);

    loop {
        cleanup_interval.tick().await;
        sweep(&game_service, config.idle_timeout).await;
    }
}

async fn sweep(game_service: &GameService, idle_timeout: Duration) -> usize {
    let evicted = game_service.evict_stale_sessions(idle_timeout).await;
    if evicted > 0 {
        let live_sessions = game_service.live_session_count().await;
        info!(
            evicted,
            live_sessions,
            "Session cleanup completed"
        );
    } else {
        debug!("No stale sessions to clean up");
    }
    evicted
}
