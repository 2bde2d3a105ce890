//! Network Protocol Definitions
//!
//! Defines the DTOs used for HTTP communication on all three surfaces:
//! client-to-space (`put`/`take`/`stop`), worker-to-space (`register`),
//! and space-to-worker (`execute`/`stop`).
//!
//! Constants define the specific API endpoints each message is posted to.

use super::types::*;
use serde::{Deserialize, Serialize};

// Space endpoints.
pub const ENDPOINT_PUT_TASK: &str = "/task/put";
pub const ENDPOINT_TAKE_RESULT: &str = "/task/take";
pub const ENDPOINT_REGISTER_WORKER: &str = "/worker/register";
pub const ENDPOINT_STOP_SPACE: &str = "/stop";

// Worker endpoints.
pub const ENDPOINT_EXECUTE_TASK: &str = "/execute";
pub const ENDPOINT_STOP_WORKER: &str = "/stop";

#[derive(Debug, Serialize, Deserialize)]
pub struct PutTaskRequest {
    pub task: TaskEnvelope,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PutTaskResponse {
    pub accepted: bool,
}

/// Response of the blocking `take` call. The HTTP request itself long-polls
/// until a result exists, so the response always carries one.
#[derive(Debug, Serialize, Deserialize)]
pub struct TakeResultResponse {
    pub result: TaskResult,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterWorkerRequest {
    /// Base URL the space should call the worker back on,
    /// e.g. `http://10.0.0.5:6100`.
    pub endpoint: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterWorkerResponse {
    pub worker_id: WorkerId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StopSpaceResponse {
    /// Workers that acknowledged the stop directive. Unreachable workers
    /// are skipped, not retried.
    pub workers_stopped: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteTaskRequest {
    pub task: TaskEnvelope,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteTaskResponse {
    pub result: TaskResult,
}
