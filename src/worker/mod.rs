//! Worker-Side Execution Engine
//!
//! A worker is a separate process that announces itself to the space and
//! then serially executes whatever the space's dispatch loop hands it.
//! It performs no retry, no queuing, and no concurrency of its own with
//! respect to the space: each worker has exactly one bound dispatch loop,
//! so there is at most one outstanding call at a time.
//!
//! ## Submodules
//! - **`registry`**: Maps task kinds (e.g. "mandelbrot_region") to the
//!   actual code, so the engine stays generic over workloads.
//! - **`executor`**: Wraps one task execution with wall-clock timing and
//!   captures handler failures into the result payload.
//! - **`handlers`**: The axum surface the space calls (`execute`, `stop`).

pub mod executor;
pub mod handlers;
pub mod registry;

#[cfg(test)]
mod tests;
