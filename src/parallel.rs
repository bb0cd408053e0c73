//! Fixed-size worker pool for independent chunk tasks.

use crossbeam_channel::{self, Receiver, Sender};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use thiserror::Error;

use crate::config::PipelineConfig;

/// Failures of a batch of chunk tasks
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutorError {
    #[error("Failed to create worker pool: {0}")]
    ThreadPool(String),

    #[error("Chunk {chunk} failed: {message}")]
    ChunkFailed { chunk: usize, message: String },
}

/// Runs one pure task per chunk on a fixed pool and returns the results in
/// chunk order, whatever order the tasks finish in.
pub struct ChunkExecutor {
    pool: rayon::ThreadPool,
    num_workers: usize,
    progress_interval: usize,
}

impl ChunkExecutor {
    pub fn new(num_workers: usize) -> Result<Self, ExecutorError> {
        if num_workers == 0 {
            return Err(ExecutorError::ThreadPool(
                "worker count must be at least 1".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers)
            .thread_name(|i| format!("chunk-worker-{}", i))
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            pool,
            num_workers,
            progress_interval: 0,
        })
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, ExecutorError> {
        Ok(Self::new(config.num_workers)?.with_progress_interval(config.progress_interval))
    }

    /// Log progress every `interval` completed chunks (0 disables)
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Run `task` for every chunk index in `0..num_chunks`.
    ///
    /// A failure (an `Err` or a panic inside `task`) stops the batch and no
    /// results are returned. Chunks above the lowest failing index seen so far
    /// are skipped; chunks below it still run, so when several chunks fail the
    /// lowest failing index is always the one reported.
    pub fn execute<T, E, F>(&self, num_chunks: usize, task: F) -> Result<Vec<T>, ExecutorError>
    where
        T: Send,
        E: Display,
        F: Fn(usize) -> Result<T, E> + Sync,
    {
        debug!(
            "Dispatching {} chunks to {} workers",
            num_chunks, self.num_workers
        );

        let (tx, rx): (
            Sender<(usize, Result<T, String>)>,
            Receiver<(usize, Result<T, String>)>,
        ) = crossbeam_channel::unbounded();
        // Lowest failing chunk so far; usize::MAX while none has failed
        let lowest_failure = AtomicUsize::new(usize::MAX);
        let monitor = ProgressMonitor::new(num_chunks, self.progress_interval);

        self.pool.install(|| {
            (0..num_chunks)
                .into_par_iter()
                .for_each_with(tx, |tx, chunk| {
                    if chunk > lowest_failure.load(Ordering::Relaxed) {
                        return;
                    }

                    let outcome = match panic::catch_unwind(AssertUnwindSafe(|| task(chunk))) {
                        Ok(Ok(value)) => Ok(value),
                        Ok(Err(e)) => Err(e.to_string()),
                        Err(payload) => Err(panic_message(payload)),
                    };

                    if outcome.is_err() {
                        lowest_failure.fetch_min(chunk, Ordering::Relaxed);
                    }
                    monitor.increment();

                    // The receiver outlives every sender, so this cannot fail
                    let _ = tx.send((chunk, outcome));
                });
        });

        let mut slots: Vec<Option<T>> = (0..num_chunks).map(|_| None).collect();
        let mut failure: Option<(usize, String)> = None;

        for (chunk, outcome) in rx.iter() {
            match outcome {
                Ok(value) => slots[chunk] = Some(value),
                Err(message) => {
                    let earliest = match &failure {
                        Some((first, _)) => chunk < *first,
                        None => true,
                    };
                    if earliest {
                        failure = Some((chunk, message));
                    }
                }
            }
        }

        if let Some((chunk, message)) = failure {
            warn!("Aborting batch of {} chunks: chunk {} failed: {}", num_chunks, chunk, message);
            return Err(ExecutorError::ChunkFailed { chunk, message });
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(chunk, slot)| {
                slot.ok_or_else(|| ExecutorError::ChunkFailed {
                    chunk,
                    message: "no result produced".to_string(),
                })
            })
            .collect()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}

/// Monitor parallel processing progress
pub struct ProgressMonitor {
    total_tasks: usize,
    interval: usize,
    completed_tasks: AtomicUsize,
    start_time: Instant,
}

impl ProgressMonitor {
    pub fn new(total_tasks: usize, interval: usize) -> Self {
        Self {
            total_tasks,
            interval,
            completed_tasks: AtomicUsize::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn completed(&self) -> usize {
        self.completed_tasks.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        let completed = self.completed_tasks.fetch_add(1, Ordering::Relaxed) + 1;

        if self.interval == 0 {
            return;
        }
        if completed % self.interval == 0 || completed == self.total_tasks {
            let elapsed = self.start_time.elapsed();
            let rate = completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            let eta_seconds = self.total_tasks.saturating_sub(completed) as f64 / rate;

            info!(
                "Progress: {}/{} ({:.1}%) - Rate: {:.1} chunks/s - ETA: {:.0}s",
                completed,
                self.total_tasks,
                completed as f64 / self.total_tasks.max(1) as f64 * 100.0,
                rate,
                eta_seconds
            );
        }
    }
}
