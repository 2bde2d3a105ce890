//! Broker State and Operations
//!
//! `Space` owns the two shared queues, the worker registry, and the
//! monotonically increasing worker-id counter. No global lock serializes
//! unrelated operations: each queue is internally synchronized and the
//! registry is a concurrent map.

use super::dispatch;
use super::queue::SharedQueue;
use super::remote::WorkerHandle;
use super::types::WorkerRegistration;
use crate::api::types::{now_ms, TaskEnvelope, TaskResult, WorkerId};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub struct Space {
    tasks: Arc<SharedQueue<TaskEnvelope>>,
    results: Arc<SharedQueue<TaskResult>>,
    registry: DashMap<WorkerId, WorkerRegistration>,
    next_worker_id: AtomicU64,
    execute_timeout: Option<Duration>,
}

impl Space {
    /// Creates a new space.
    ///
    /// `execute_timeout` caps the transport round trip of each dispatch
    /// call; `None` (the default deployment) lets a hung call block its
    /// dispatch loop indefinitely.
    pub fn new(execute_timeout: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            tasks: Arc::new(SharedQueue::new()),
            results: Arc::new(SharedQueue::new()),
            registry: DashMap::new(),
            next_worker_id: AtomicU64::new(0),
            execute_timeout,
        })
    }

    /// Enqueues a task for dispatch. Never blocks; the queue is unbounded.
    pub async fn put(&self, task: TaskEnvelope) {
        tracing::debug!("task {} ({}) enqueued", task.task_id.0, task.kind);
        self.tasks.push(task).await;
    }

    /// Removes and returns the earliest-available result, waiting until
    /// one exists. Concurrent callers each receive a distinct result;
    /// ordering follows completion time, not submission order.
    pub async fn take(&self) -> TaskResult {
        self.results.pop().await
    }

    /// Registers a worker: assigns the next sequential id, records the
    /// handle, and starts one dispatch loop bound to it.
    ///
    /// Safe to call concurrently from many workers. Dispatch begins
    /// immediately, including on tasks that were queued before the worker
    /// appeared. Execution through the new loop is at-least-once: a task
    /// whose call fails after the worker already computed it is
    /// redelivered and executed again.
    pub fn register(&self, handle: Arc<dyn WorkerHandle>) -> WorkerId {
        let id = WorkerId(self.next_worker_id.fetch_add(1, Ordering::SeqCst) + 1);

        self.registry.insert(
            id,
            WorkerRegistration {
                id,
                handle: handle.clone(),
                registered_at: now_ms(),
            },
        );
        tracing::info!("registering worker {}", id.0);

        tokio::spawn(dispatch::run(
            id,
            handle,
            self.tasks.clone(),
            self.results.clone(),
        ));

        id
    }

    /// Sends a stop directive to every registered worker, including ones
    /// whose dispatch loop already retired. A worker that cannot be
    /// reached is logged and skipped, not retried. Returns the number of
    /// workers that acknowledged.
    ///
    /// Halting the broker process afterwards is the caller's job; shutdown
    /// is best-effort and terminal, in-flight dispatches are not drained.
    pub async fn stop_workers(&self) -> usize {
        let mut registrations: Vec<WorkerRegistration> = self
            .registry
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        registrations.sort_by_key(|registration| registration.id.0);

        let mut stopped = 0;
        for registration in registrations {
            tracing::info!("stopping worker {}", registration.id.0);
            match registration.handle.stop().await {
                Ok(()) => stopped += 1,
                Err(e) => {
                    tracing::warn!(
                        "worker {} unreachable during shutdown: {}",
                        registration.id.0,
                        e
                    );
                }
            }
        }

        stopped
    }

    pub fn worker_count(&self) -> usize {
        self.registry.len()
    }

    pub async fn queued_tasks(&self) -> usize {
        self.tasks.len().await
    }

    pub async fn pending_results(&self) -> usize {
        self.results.len().await
    }

    pub(crate) fn execute_timeout(&self) -> Option<Duration> {
        self.execute_timeout
    }
}
