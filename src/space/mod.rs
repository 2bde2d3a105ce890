//! The Space (Broker)
//!
//! This module implements the shared task/result exchange that clients and
//! workers cooperate through. The design is deliberately simple and
//! self-healing:
//!
//! 1. **Submission**: Clients `put` tasks into an unbounded shared queue;
//!    submission never blocks.
//! 2. **Dispatch**: Every registered worker gets its own dispatch loop that
//!    pulls one task at a time from the shared queue and forwards it to the
//!    worker over the `WorkerHandle` seam.
//! 3. **Redelivery**: When the remote call fails, the loop pushes the task
//!    back onto the queue for another worker and retires itself. The worker
//!    is implicitly considered dead from that point on.
//! 4. **Retrieval**: Clients `take` results from a second shared queue,
//!    blocking until one is available; each result goes to exactly one
//!    caller, in completion order rather than submission order.
//!
//! Execution is therefore at-least-once, never exactly-once: a call that
//! fails after the worker finished computing is silently redelivered and
//! executed again.
//!
//! ## Submodules
//! - **`queue`**: The blocking multi-consumer FIFO queue backing both the
//!   task queue and the result queue.
//! - **`space`**: The broker state (queues, registry, id counter) and its
//!   public operations.
//! - **`dispatch`**: The per-worker dispatch loop.
//! - **`remote`**: The `WorkerHandle` seam and its HTTP implementation.
//! - **`handlers`**: The axum surface exposing `put`, `take`, `register`
//!   and `stop`.

pub mod dispatch;
pub mod handlers;
pub mod queue;
pub mod remote;
pub mod space;
pub mod types;
