//! Bounded fetch scheduler.
//!
//! Runs a batch of futures with at most `max_concurrency` of them in flight.
//! Tasks start in submission order and results come back in submission
//! order, regardless of which finished first.

use futures::future::join_all;
use gaze_types::layout::DEFAULT_MAX_CONCURRENCY;
use std::future::Future;
use tokio::sync::Semaphore;

/// Concurrency limiter for one batch of widget fetches.
///
/// Every call to [`run`](Self::run) gets its own permit pool, so a container
/// fetching its children inside a page batch never waits on the permits its
/// parent is holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchScheduler {
    max_concurrency: usize,
}

impl FetchScheduler {
    /// Create a scheduler. A limit of zero is raised to one.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Run every task to completion and return their outputs in input order.
    ///
    /// The semaphore is fair, so waiting tasks acquire permits in the order
    /// they were submitted.
    pub async fn run<F>(&self, tasks: Vec<F>) -> Vec<F::Output>
    where
        F: Future,
    {
        if tasks.is_empty() {
            return Vec::new();
        }

        let semaphore = Semaphore::new(self.max_concurrency.min(tasks.len()));
        let limited: Vec<_> = tasks
            .into_iter()
            .map(|task| with_permit(&semaphore, task))
            .collect();

        join_all(limited).await
    }
}

async fn with_permit<F: Future>(semaphore: &Semaphore, task: F) -> F::Output {
    // Never closed, so acquire cannot fail.
    let _permit = semaphore.acquire().await.ok();
    task.await
}

impl Default for FetchScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONCURRENCY)
    }
}
