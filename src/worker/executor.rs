//! Timed Execution Wrapper
//!
//! Runs one task through the handler registry and measures wall-clock time
//! immediately around the handler call; the measurement happens on the
//! worker, not the client. A handler failure is captured into the result's
//! payload: the space has no contract for recovering an application-level
//! failure, so it must never see one as an error.

use super::registry::HandlerRegistry;
use crate::api::types::{Outcome, TaskEnvelope, TaskResult};
use std::sync::Arc;
use std::time::Instant;

pub struct Executor {
    handlers: Arc<HandlerRegistry>,
}

impl Executor {
    pub fn new(handlers: Arc<HandlerRegistry>) -> Arc<Self> {
        Arc::new(Self { handlers })
    }

    /// Executes a task and returns its result, tagged with the originating
    /// task id and the measured run time.
    pub async fn execute(&self, task: &TaskEnvelope) -> TaskResult {
        tracing::debug!("executing task {} ({})", task.task_id.0, task.kind);

        let started = Instant::now();
        let outcome = match self
            .handlers
            .dispatch(&task.kind, task.payload.clone())
            .await
        {
            Ok(value) => Outcome::Value(value),
            Err(e) => {
                tracing::error!("task {} failed: {}", task.task_id.0, e);
                Outcome::Error(e.to_string())
            }
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        TaskResult {
            task_id: task.task_id,
            elapsed_ms,
            outcome,
        }
    }
}
