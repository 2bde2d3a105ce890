//! Per-Worker Dispatch Loop
//!
//! One loop runs per registered worker, spawned at registration time and
//! owning clones of the shared queue handles. The algorithm, repeated
//! until failure:
//!
//! 1. Wait for a task in the shared task queue and remove it.
//! 2. Invoke the bound worker's remote `execute`.
//! 3. On success, push the returned result into the shared result queue.
//! 4. On a communication failure, push the just-removed task back onto the
//!    task queue so another worker picks it up, and retire permanently.
//!
//! Retirement is the only way a loop ends: the worker is implicitly dead
//! and no further task is ever routed through it. Its registry entry is
//! not removed. If the failed call had in fact completed on the worker,
//! the redelivered task executes a second time; execution through the
//! space is at-least-once.

use super::queue::SharedQueue;
use super::remote::WorkerHandle;
use crate::api::types::{TaskEnvelope, TaskResult, WorkerId};
use std::sync::Arc;

pub(crate) async fn run(
    worker_id: WorkerId,
    worker: Arc<dyn WorkerHandle>,
    tasks: Arc<SharedQueue<TaskEnvelope>>,
    results: Arc<SharedQueue<TaskResult>>,
) {
    tracing::info!("dispatch loop started for worker {}", worker_id.0);

    loop {
        let task = tasks.pop().await;
        let task_id = task.task_id;

        match worker.execute(&task).await {
            Ok(result) => {
                tracing::debug!(
                    "worker {} finished task {} in {} ms",
                    worker_id.0,
                    task_id.0,
                    result.elapsed_ms
                );
                results.push(result).await;
            }
            Err(e) => {
                // The space accommodates faulty workers: the task goes
                // back to the queue for another worker, this loop ends.
                tracing::warn!(
                    "communication failure on worker {} while executing task {}: {}",
                    worker_id.0,
                    task_id.0,
                    e
                );
                tracing::info!(
                    "returning task {} to the queue and retiring worker {}",
                    task_id.0,
                    worker_id.0
                );
                tasks.push(task).await;
                break;
            }
        }
    }
}
