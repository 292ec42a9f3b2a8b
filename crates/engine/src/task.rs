//! Detached side effects.
//!
//! A detached task runs to completion on its own. Its failure is logged,
//! never returned. Dropping the handle does not cancel the task, which is
//! what keeps an abandoned request from leaving a write half-done.

use std::future::Future;
use std::sync::Arc;

use offcache_core::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;

#[derive(Debug, Clone, Default)]
pub struct DetachedTasks {
    tracker: TaskTracker,
    /// Held across close/wait/reopen so one settle cannot reopen the
    /// tracker while another is still waiting on it.
    settling: Arc<Mutex<()>>,
}

impl DetachedTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `work` onto the runtime. Awaiting the handle is optional.
    pub fn spawn<F>(&self, label: &'static str, work: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<(), Error>> + Send + 'static,
    {
        self.tracker.spawn(async move {
            if let Err(e) = work.await {
                tracing::warn!(task = label, error = %e, "detached task failed");
            }
        })
    }

    /// Number of tasks still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every task spawned so far has finished. Concurrent calls
    /// from clones run one after another.
    pub async fn settle(&self) {
        let _guard = self.settling.lock().await;
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }
}
