//! Bounded worker pool used by every fan-out stage.
//!
//! Tasks run on the multi-threaded runtime, at most `limit` at a time.
//! Results are gathered in completion order once every task has finished;
//! callers impose a deterministic order afterwards. Dropping the returned
//! future aborts all outstanding tasks.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Run `task` over every item with at most `limit` tasks in flight.
pub async fn run_bounded<I, T, F, Fut>(items: I, limit: usize, task: F) -> Vec<T>
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut set = JoinSet::new();

    for item in items {
        let semaphore = semaphore.clone();
        let work = task(item);
        set.spawn(async move {
            // The semaphore is never closed, so acquisition only fails on shutdown.
            let _permit = semaphore.acquire_owned().await.ok();
            work.await
        });
    }

    let mut results = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(value) => results.push(value),
            Err(e) => tracing::warn!("Worker task did not complete: {}", e),
        }
    }
    results
}
