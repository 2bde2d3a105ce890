//! Task/Result Contracts and Wire Protocol
//!
//! Everything that crosses a process boundary lives here: the value types
//! that represent a unit of work and its outcome, and the request/response
//! shapes of the three RPC surfaces (client-facing, worker-facing, and
//! space-to-worker).
//!
//! ## Submodules
//! - **`types`**: `TaskEnvelope`, `TaskResult`, and the identifiers that
//!   correlate them. Tasks are retry-safe value types carrying all of
//!   their input data; results are immutable once constructed.
//! - **`protocol`**: HTTP endpoint constants and the JSON DTOs exchanged
//!   on each of them.

pub mod protocol;
pub mod types;
