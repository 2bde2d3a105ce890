//! Client Handle to a Running Space
//!
//! Thin HTTP wrapper over the broker surface, used by jobs (`put`/`take`/
//! `stop`) and by the worker binary (`register`). The handle is cheap to
//! share: all methods take `&self`.

use crate::api::protocol::*;
use crate::api::types::{TaskEnvelope, TaskResult, WorkerId};
use anyhow::Result;

pub struct SpaceClient {
    base_url: String,
    client: reqwest::Client,
}

impl SpaceClient {
    /// Connects to the space at `base_url`, e.g. `http://10.0.0.1:5000`.
    ///
    /// The underlying client carries no request timeout: `take` blocks for
    /// as long as the space has no result to hand out.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Submits one task. Never blocks on queue capacity.
    pub async fn put(&self, task: TaskEnvelope) -> Result<()> {
        let url = format!("{}{}", self.base_url, ENDPOINT_PUT_TASK);
        let response = self
            .client
            .post(url)
            .json(&PutTaskRequest { task })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("put failed: {}", response.status()));
        }

        let body: PutTaskResponse = response.json().await?;
        if !body.accepted {
            return Err(anyhow::anyhow!("space rejected the task"));
        }

        Ok(())
    }

    /// Takes one result, blocking until the space has one. Results arrive
    /// in completion order, not submission order.
    pub async fn take(&self) -> Result<TaskResult> {
        let url = format!("{}{}", self.base_url, ENDPOINT_TAKE_RESULT);
        let response = self.client.post(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("take failed: {}", response.status()));
        }

        let body: TakeResultResponse = response.json().await?;
        Ok(body.result)
    }

    /// Registers a worker reachable at `endpoint` and returns its assigned
    /// id.
    pub async fn register(&self, endpoint: &str) -> Result<WorkerId> {
        let url = format!("{}{}", self.base_url, ENDPOINT_REGISTER_WORKER);
        let response = self
            .client
            .post(url)
            .json(&RegisterWorkerRequest {
                endpoint: endpoint.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("register failed: {}", response.status()));
        }

        let body: RegisterWorkerResponse = response.json().await?;
        Ok(body.worker_id)
    }

    /// Stops every registered worker and then the space itself. Returns
    /// the number of workers that acknowledged the stop directive.
    pub async fn stop(&self) -> Result<usize> {
        let url = format!("{}{}", self.base_url, ENDPOINT_STOP_SPACE);
        let response = self.client.post(url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("stop failed: {}", response.status()));
        }

        let body: StopSpaceResponse = response.json().await?;
        Ok(body.workers_stopped)
    }
}
