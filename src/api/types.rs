use serde::{Deserialize, Serialize};

/// Identifier of a task, unique only within the job that created it.
///
/// Two concurrently submitted jobs may both use id 0; correlating results
/// across jobs is the job's own responsibility.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskId(pub u32);

/// Identifier assigned to a worker by the space at registration time.
/// Sequential, starting at 1.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct WorkerId(pub u64);

/// One transferable unit of work.
///
/// The envelope carries everything the computation needs: `kind` selects a
/// handler registered on the worker, `payload` is the handler's input. An
/// envelope must tolerate being executed more than once, since the space
/// redelivers it whenever the worker holding it fails mid-flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEnvelope {
    pub task_id: TaskId,
    pub kind: String,
    pub payload: serde_json::Value,
}

/// What a task execution produced.
///
/// A failure inside the task's own logic (unknown kind, malformed payload,
/// handler error) is encoded as `Error` and travels back to the client as
/// ordinary data. It is never raised as a transport error: only an
/// unreachable worker is a transport error, and that is the space's
/// concern, not the client's.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Outcome {
    Value(serde_json::Value),
    Error(String),
}

/// The output of one task execution.
///
/// `elapsed_ms` is wall-clock execution time measured by the worker around
/// the handler call, not by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: TaskId,
    pub elapsed_ms: u64,
    pub outcome: Outcome,
}

/// Helper to get the current system time in milliseconds.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}
