//! Bounded worker pool scoped to a single batch

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Runs a batch of jobs with at most `workers` in flight.
///
/// Every call builds its own queue and workers and tears them down before
/// returning; nothing is shared between batches.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// Create a pool with `workers` concurrent slots (at least one)
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `work` over `items` and return the outputs in input order.
    ///
    /// Slot `i` holds the output for `items[i]`, or `None` if the worker
    /// handling it died before reporting.
    pub async fn run<T, R, F, Fut>(&self, items: Vec<T>, work: F) -> Vec<Option<R>>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let total = items.len();
        if total == 0 {
            return Vec::new();
        }

        // Queue holds the whole batch, so submission never waits on workers.
        let (job_tx, job_rx) = mpsc::channel::<(usize, T)>(total);
        for job in items.into_iter().enumerate() {
            if job_tx.send(job).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::channel::<(usize, R)>(total);
        let work = Arc::new(work);

        let spawned = self.workers.min(total);
        debug!("Starting {} workers for {} jobs", spawned, total);

        let mut workers = JoinSet::new();
        for worker_id in 0..spawned {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let work = Arc::clone(&work);

            workers.spawn(async move {
                loop {
                    let next = job_rx.lock().await.recv().await;
                    let Some((index, item)) = next else {
                        break;
                    };

                    let output = (*work)(item).await;
                    if result_tx.send((index, output)).await.is_err() {
                        break;
                    }
                }
                debug!("Worker {} drained", worker_id);
            });
        }
        drop(result_tx);

        let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
        while let Some((index, output)) = result_rx.recv().await {
            slots[index] = Some(output);
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                warn!("Worker exited abnormally: {}", e);
            }
        }

        slots
    }
}
