//! Per-key exclusive execution
//!
//! This module provides the `KeyedExecutor` struct, which guarantees that
//! operations sharing a key run one at a time in submission order, while
//! operations on distinct keys run fully in parallel.
//!
//! # Design
//!
//! Each active key owns a dedicated worker task consuming an ordered,
//! unbounded channel of jobs. The worker is the only code that ever runs a
//! key's operations, so exclusivity and FIFO ordering hold by construction
//! rather than by locking discipline inside the operations themselves.
//!
//! # Architecture
//!
//! ```text
//! KeyedExecutor
//!     └── DashMap<key, UnboundedSender<Job>>   (slot registry)
//!             │
//!             │ one channel per active key
//!             ▼
//!     worker task ── runs jobs FIFO ── replies via oneshot
//! ```
//!
//! # Slot reclamation
//!
//! A worker retires once its queue drains, removing its registry entry so
//! long-idle keys do not accumulate channels. Retirement and submission
//! both act under the registry's entry lock: a submission sends its job
//! while holding the lock, and a worker only removes an entry after
//! verifying, under that same lock, that the entry still refers to its own
//! channel and that the queue is empty. A job can therefore never be sent
//! into a channel whose worker has already decided to retire.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};

use crate::types::WalletError;

/// A unit of work bound to a key, with the reply channel already captured
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Executor guaranteeing single-flight, FIFO execution per key
///
/// For a fixed key, at most one submitted operation is in flight at any
/// instant, and queued operations execute in the order their submissions
/// were accepted. Operations for distinct keys never block each other.
///
/// The executor is a mechanism, not a policy: it has no failure modes of
/// its own in normal operation, and all domain failures originate from the
/// operations it runs. An operation's outcome is delivered to exactly the
/// caller that submitted it; a failed operation does not poison or delay
/// the rest of its key's queue.
#[derive(Debug)]
pub struct KeyedExecutor {
    /// Registry of live slots: one sender per key with a running worker
    slots: Arc<DashMap<String, mpsc::UnboundedSender<Job>>>,
}

impl KeyedExecutor {
    /// Create a new executor with no active slots
    pub fn new() -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
        }
    }

    /// Submit an operation for a key and wait for its result
    ///
    /// The operation runs on the key's worker task after every previously
    /// submitted operation for that key has fully completed. Submissions
    /// for other keys proceed independently; awaiting this future never
    /// delays another key's queue.
    ///
    /// # Arguments
    ///
    /// * `key` - The key whose queue the operation joins
    /// * `op` - The operation to run inside the key's exclusive section
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - The operation's return value
    /// * `Err(WalletError::ExecutorUnavailable)` - The worker terminated
    ///   abnormally before delivering a result (it panicked mid-queue)
    ///
    /// # Cancellation
    ///
    /// Dropping the returned future abandons only the reply channel. The
    /// operation itself still runs in its queued position.
    pub async fn submit<T, F>(&self, key: &str, op: F) -> Result<T, WalletError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let mut job: Job = Box::new(move || {
            let _ = reply_tx.send(op());
        });

        loop {
            // Get or create the slot and send while the entry lock is held,
            // so a retiring worker cannot miss this job.
            let send_result = {
                let slot = self
                    .slots
                    .entry(key.to_string())
                    .or_insert_with(|| self.spawn_worker(key));
                slot.value().send(job)
            };

            match send_result {
                Ok(()) => break,
                Err(mpsc::error::SendError(returned)) => {
                    // The previous worker died without retiring cleanly.
                    // Drop its stale slot and resubmit on a fresh one.
                    job = returned;
                    self.slots.remove_if(key, |_, slot| slot.is_closed());
                }
            }
        }

        reply_rx
            .await
            .map_err(|_| WalletError::executor_unavailable(key))
    }

    /// Number of keys that currently hold a live slot
    ///
    /// Slots are reclaimed once a key's queue drains, so this count falls
    /// back to zero when the executor goes idle.
    pub fn active_slots(&self) -> usize {
        self.slots.len()
    }

    /// Spawn the worker task for a key and return the slot's sender
    fn spawn_worker(&self, key: &str) -> mpsc::UnboundedSender<Job> {
        let (job_tx, job_rx) = mpsc::unbounded_channel();
        let worker = Worker {
            key: key.to_string(),
            jobs: job_rx,
            probe: job_tx.clone(),
            slots: Arc::clone(&self.slots),
        };

        tokio::spawn(worker.run());

        job_tx
    }
}

impl Default for KeyedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Dedicated worker for a single key's job queue
struct Worker {
    /// The key this worker serves
    key: String,

    /// Ordered queue of jobs for the key
    jobs: mpsc::UnboundedReceiver<Job>,

    /// The worker's own copy of the slot sender, used to verify during
    /// retirement that the registry entry is still this worker's channel
    probe: mpsc::UnboundedSender<Job>,

    /// Shared slot registry, needed to remove this worker's entry
    slots: Arc<DashMap<String, mpsc::UnboundedSender<Job>>>,
}

impl Worker {
    /// Run jobs FIFO until the queue drains, then retire
    async fn run(mut self) {
        tracing::trace!(key = %self.key, "slot worker started");

        loop {
            match self.jobs.recv().await {
                Some(job) => job(),
                // Unreachable while `probe` is held, but ends the task
                // cleanly if the channel is ever severed.
                None => break,
            }

            // Drain without touching the registry lock.
            while let Ok(job) = self.jobs.try_recv() {
                job();
            }

            // Retire only if, under the entry lock, the registry still maps
            // the key to this worker's channel and nothing new was sent.
            // Submissions send under the same lock, so the emptiness check
            // cannot race with an in-flight send.
            let retired = self
                .slots
                .remove_if(&self.key, |_, slot| {
                    slot.same_channel(&self.probe) && self.jobs.is_empty()
                })
                .is_some();

            if retired {
                break;
            }
        }

        tracing::trace!(key = %self.key, "slot worker retired");
    }
}
