//! Remote Worker Handle
//!
//! The space talks to workers through the `WorkerHandle` trait so that the
//! dispatch loop is independent of the transport: production uses the HTTP
//! implementation below, tests substitute mocks.
//!
//! The error contract is the load-bearing part: any `Err` from `execute` is
//! a *communication failure* (the call could not complete), which triggers
//! redelivery. A failure inside the task's own logic is not an `Err` here;
//! it arrives as `Outcome::Error` inside a successful response.

use crate::api::protocol::{
    ExecuteTaskRequest, ExecuteTaskResponse, ENDPOINT_EXECUTE_TASK, ENDPOINT_STOP_WORKER,
};
use crate::api::types::{TaskEnvelope, TaskResult};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait WorkerHandle: Send + Sync {
    /// Forwards a task to the worker and waits for the computed result.
    async fn execute(&self, task: &TaskEnvelope) -> Result<TaskResult>;

    /// Tells the worker process to terminate. Fire-and-forget from the
    /// space's perspective; a failure is logged and skipped by the caller.
    async fn stop(&self) -> Result<()>;
}

/// HTTP implementation of `WorkerHandle`.
pub struct HttpWorker {
    endpoint: String,
    client: reqwest::Client,
    /// Optional transport timeout for `execute`. Off by default: a hung
    /// call blocks its dispatch loop indefinitely. When set, a fired
    /// timeout is a communication failure like any other.
    execute_timeout: Option<Duration>,
}

impl HttpWorker {
    pub fn new(endpoint: String, execute_timeout: Option<Duration>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            execute_timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl WorkerHandle for HttpWorker {
    async fn execute(&self, task: &TaskEnvelope) -> Result<TaskResult> {
        let url = format!("{}{}", self.endpoint, ENDPOINT_EXECUTE_TASK);

        let mut request = self.client.post(url).json(&ExecuteTaskRequest {
            task: task.clone(),
        });
        if let Some(timeout) = self.execute_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "execute call to {} failed: {}",
                self.endpoint,
                response.status()
            ));
        }

        let body: ExecuteTaskResponse = response.json().await?;
        Ok(body.result)
    }

    async fn stop(&self) -> Result<()> {
        let url = format!("{}{}", self.endpoint, ENDPOINT_STOP_WORKER);

        // Stop is best-effort: give the worker a short window to answer.
        let response = self
            .client
            .post(url)
            .timeout(Duration::from_millis(2000))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "stop call to {} failed: {}",
                self.endpoint,
                response.status()
            ));
        }

        Ok(())
    }
}
