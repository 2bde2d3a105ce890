//! Sample Workloads
//!
//! Two illustrative jobs exercise the space: a Mandelbrot region evaluator
//! and a brute-force Euclidean TSP solver. Each job supplies the two sides
//! of the client contract: decomposition into tasks and reassembly of the
//! collected results. The matching worker-side handlers live next to the
//! jobs and are registered into a worker's `HandlerRegistry` at startup.
//!
//! A job owns its per-task submission-time bookkeeping; it is used purely
//! for client-side latency reporting and never crosses into the space.

use crate::client::SpaceClient;
use crate::worker::registry::HandlerRegistry;
use anyhow::Result;
use async_trait::async_trait;

pub mod mandelbrot;
pub mod tsp;

#[cfg(test)]
mod tests;

/// Client-side decomposition/composition policy.
///
/// `generate_tasks` submits one task per unit of work; `collect_results`
/// retrieves exactly as many results as tasks were generated and folds
/// them into the job's final answer. Results arrive in completion order,
/// so implementations key reassembly off each result's task id.
#[async_trait]
pub trait Job {
    type Output;

    async fn generate_tasks(&mut self, space: &SpaceClient) -> Result<()>;

    async fn collect_results(&mut self, space: &SpaceClient) -> Result<Self::Output>;
}

/// Registers the worker-side handlers for all sample workloads.
pub fn register_handlers(registry: &HandlerRegistry) {
    mandelbrot::register(registry);
    tsp::register(registry);
}
