//! Master–Worker Compute Space
//!
//! This library crate implements a shared task/result exchange (the "space")
//! that any number of clients and remote workers cooperate through: clients
//! decompose a large computation into independent tasks and submit them to
//! the space, workers pull tasks, execute them, and hand the results back.
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems plus a client
//! handle:
//!
//! - **`api`**: The task/result value types and the wire-level protocol
//!   (request/response shapes and endpoints) shared by every surface.
//! - **`space`**: The broker. Owns the shared task queue, the shared result
//!   queue, and the worker registry; runs one dispatch loop per registered
//!   worker and redelivers a task when its worker fails mid-flight.
//! - **`worker`**: The worker-side execution engine. Maps task kinds to
//!   registered handlers and wraps each execution with wall-clock timing.
//! - **`jobs`**: Sample workloads (a Mandelbrot region evaluator and a
//!   brute-force Euclidean TSP solver) expressed as client-side jobs plus
//!   their worker-side handlers.
//! - **`client`**: An HTTP handle to a running space, used by jobs and by
//!   the worker binary to register itself.

pub mod api;
pub mod client;
pub mod jobs;
pub mod space;
pub mod worker;
