//! Cancellation-scoped task groups.
//!
//! A [`TaskScope`] owns a root [`CancellationToken`] and a [`TaskTracker`]
//! covering every task spawned through it. Dropping or shutting down the
//! scope cancels all outstanding work, so background tasks never outlive
//! their owner.
//!
//! Spawning requires a running Tokio runtime.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::error::{CommonError, CommonResult};

/// Group of background tasks sharing one cancellation root.
pub struct TaskScope {
    name: String,
    cancellation: CancellationToken,
    tracker: TaskTracker,
}

impl TaskScope {
    /// Create a new, empty scope.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), cancellation: CancellationToken::new(), tracker: TaskTracker::new() }
    }

    /// Nested scope: cancelled with this one, tracked separately so it can be
    /// drained or shut down on its own.
    pub fn child(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cancellation: self.cancellation.child_token(),
            tracker: TaskTracker::new(),
        }
    }

    /// Name used in log fields.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token that is cancelled when the scope shuts down.
    pub fn token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Child token: cancelled with the scope, or independently by its holder.
    pub fn child_token(&self) -> CancellationToken {
        self.cancellation.child_token()
    }

    /// Whether the scope has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Spawn a task bound to the scope's root token.
    ///
    /// Returns `false` (and spawns nothing) once the scope is cancelled.
    pub fn spawn<F>(&self, label: &'static str, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.cancellation.clone();
        self.spawn_with_token(label, token, task)
    }

    /// Spawn a task that stops when `token` is cancelled.
    ///
    /// `token` should come from [`Self::child_token`] so that shutting down
    /// the scope also stops the task.
    pub fn spawn_with_token<F>(&self, label: &'static str, token: CancellationToken, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.cancellation.is_cancelled() || token.is_cancelled() {
            debug!(scope = %self.name, task = label, "scope cancelled; task not spawned");
            return false;
        }

        let scope = self.name.clone();
        self.tracker.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {
                    debug!(scope = %scope, task = label, "task cancelled");
                }
                () = task => {}
            }
        });
        true
    }

    /// Number of tasks still running.
    pub fn active_tasks(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every tracked task has finished, without cancelling.
    pub async fn wait_idle(&self, timeout: Duration) -> CommonResult<()> {
        self.tracker.close();
        let result = tokio::time::timeout(timeout, self.tracker.wait()).await;
        self.tracker.reopen();
        result.map_err(|_| CommonError::timeout(format!("{}::wait_idle", self.name), timeout))
    }

    /// Cancel every task and join them, bounded by `timeout`.
    pub async fn shutdown(&self, timeout: Duration) -> CommonResult<()> {
        self.cancellation.cancel();
        self.tracker.close();

        tokio::time::timeout(timeout, self.tracker.wait()).await.map_err(|_| {
            warn!(
                scope = %self.name,
                timeout_ms = timeout.as_millis() as u64,
                remaining = self.tracker.len(),
                "scope shutdown timed out"
            );
            CommonError::timeout(format!("{}::shutdown", self.name), timeout)
        })?;

        debug!(scope = %self.name, "scope shut down");
        Ok(())
    }
}

impl Drop for TaskScope {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

impl std::fmt::Debug for TaskScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScope")
            .field("name", &self.name)
            .field("cancelled", &self.cancellation.is_cancelled())
            .field("active_tasks", &self.tracker.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn spawned_tasks_run_to_completion() {
        let scope = TaskScope::new("test");
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = counter.clone();
            assert!(scope.spawn("inc", async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        scope.wait_idle(Duration::from_secs(1)).await.unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(scope.active_tasks(), 0);
        assert!(scope.spawn("after_idle", async {}));
    }

    #[tokio::test]
    async fn shutdown_cancels_pending_tasks() {
        let scope = TaskScope::new("test");
        let finished = Arc::new(AtomicUsize::new(0));
        let flag = finished.clone();

        scope.spawn("sleeper", async move {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            flag.fetch_add(1, Ordering::SeqCst);
        });

        scope.shutdown(Duration::from_secs(1)).await.unwrap();
        assert!(scope.is_cancelled());
        assert_eq!(finished.load(Ordering::SeqCst), 0);
        assert!(!scope.spawn("late", async {}));
    }

    #[tokio::test]
    async fn child_scope_follows_parent_cancellation() {
        let parent = TaskScope::new("parent");
        let child = parent.child("parent.child");

        child.spawn("sleeper", async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        });
        assert_eq!(child.active_tasks(), 1);

        parent.shutdown(Duration::from_secs(1)).await.unwrap();
        assert!(child.is_cancelled());
        child.wait_idle(Duration::from_secs(1)).await.unwrap();
        assert_eq!(child.active_tasks(), 0);
    }

    #[tokio::test]
    async fn cancelling_child_token_stops_only_that_task() {
        let scope = TaskScope::new("test");
        let child = scope.child_token();
        let done = Arc::new(AtomicUsize::new(0));

        let d = done.clone();
        scope.spawn_with_token("child", child.clone(), async move {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            d.fetch_add(1, Ordering::SeqCst);
        });
        let d = done.clone();
        scope.spawn("root", async move {
            d.fetch_add(10, Ordering::SeqCst);
        });

        child.cancel();
        scope.wait_idle(Duration::from_secs(1)).await.unwrap();
        assert_eq!(done.load(Ordering::SeqCst), 10);
        assert!(!scope.is_cancelled());
    }
}
