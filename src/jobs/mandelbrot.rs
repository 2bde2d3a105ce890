//! Mandelbrot Region Workload
//!
//! Evaluates an n-by-n pixel grid over a square region of the complex
//! plane. The job decomposes the grid into fixed-height row bands, one
//! task per band; the worker-side handler computes the iteration count of
//! each pixel's representative point; collection reassembles the full
//! grid keyed by task id.

use super::Job;
use crate::api::types::{now_ms, Outcome, TaskEnvelope, TaskId};
use crate::client::SpaceClient;
use crate::worker::registry::HandlerRegistry;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const KIND: &str = "mandelbrot_region";

/// Number of pixel rows each task gets to process.
pub const ROWS_PER_TASK: usize = 32;

/// Input of one region task: the full region geometry plus the band index
/// identifying which rows this task covers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionPayload {
    /// Lower-left corner of the square region in the complex plane.
    pub corner_x: f64,
    pub corner_y: f64,
    /// Edge length of the square region.
    pub edge_length: f64,
    /// Grid resolution: the region is subdivided into n-by-n pixels.
    pub resolution: usize,
    /// Iteration count after which a point is considered inside the set.
    pub iteration_limit: u32,
    /// Band index; the task covers rows `band * ROWS_PER_TASK` onward.
    pub band: usize,
}

/// Output of one region task: iteration counts for the band's pixels in
/// row-major order. The final band may be shorter than `ROWS_PER_TASK`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegionCounts {
    pub counts: Vec<u32>,
}

/// Computes the iteration counts of one row band.
pub fn evaluate_region(region: &RegionPayload) -> Vec<u32> {
    let first_row = region.band * ROWS_PER_TASK;
    let rows = ROWS_PER_TASK.min(region.resolution.saturating_sub(first_row));

    let mut counts = Vec::with_capacity(rows * region.resolution);
    for i in 0..rows {
        for j in 0..region.resolution {
            counts.push(iterations(region, first_row + i, j));
        }
    }
    counts
}

/// Iterates z = z^2 + c for the representative point of pixel (i, j) until
/// the orbit escapes modulus 2 or the iteration limit is reached.
fn iterations(region: &RegionPayload, i: usize, j: usize) -> u32 {
    let scale = region.edge_length / region.resolution as f64;
    let c_real = region.corner_x + i as f64 * scale;
    let c_imag = region.corner_y + j as f64 * scale;

    let mut real = 0.0_f64;
    let mut imag = 0.0_f64;
    let mut k = 1_u32;
    while real * real + imag * imag < 4.0 && k < region.iteration_limit {
        let next_real = real * real - imag * imag + c_real;
        imag = 2.0 * real * imag + c_imag;
        real = next_real;
        k += 1;
    }
    k
}

/// Registers the worker-side handler for this workload.
pub fn register(registry: &HandlerRegistry) {
    registry.register(KIND, |payload| async move {
        let region: RegionPayload = serde_json::from_value(payload)?;
        let counts = evaluate_region(&region);
        Ok(serde_json::to_value(RegionCounts { counts })?)
    });
}

/// The client-side job: one task per row band, reassembled into the full
/// count grid.
pub struct MandelbrotJob {
    corner: (f64, f64),
    edge_length: f64,
    resolution: usize,
    iteration_limit: u32,
    /// Submission time per task, for client-side latency reporting only.
    submitted_at: HashMap<TaskId, u64>,
}

impl MandelbrotJob {
    pub fn new(corner: (f64, f64), edge_length: f64, resolution: usize, iteration_limit: u32) -> Self {
        Self {
            corner,
            edge_length,
            resolution,
            iteration_limit,
            submitted_at: HashMap::new(),
        }
    }

    /// Number of tasks the job decomposes into. Works even when the
    /// resolution is not a multiple of the band height.
    pub fn task_count(&self) -> usize {
        self.resolution.div_ceil(ROWS_PER_TASK)
    }
}

#[async_trait]
impl Job for MandelbrotJob {
    type Output = Vec<Vec<u32>>;

    async fn generate_tasks(&mut self, space: &SpaceClient) -> Result<()> {
        tracing::info!("generating {} mandelbrot tasks", self.task_count());

        for band in 0..self.task_count() {
            let task = TaskEnvelope {
                task_id: TaskId(band as u32),
                kind: KIND.to_string(),
                payload: serde_json::to_value(RegionPayload {
                    corner_x: self.corner.0,
                    corner_y: self.corner.1,
                    edge_length: self.edge_length,
                    resolution: self.resolution,
                    iteration_limit: self.iteration_limit,
                    band,
                })?,
            };
            self.submitted_at.insert(task.task_id, now_ms());
            space.put(task).await?;
        }

        Ok(())
    }

    async fn collect_results(&mut self, space: &SpaceClient) -> Result<Vec<Vec<u32>>> {
        let task_count = self.task_count();
        let mut grid = vec![vec![0_u32; self.resolution]; self.resolution];
        let mut total_worker_ms = 0_u64;

        for _ in 0..task_count {
            let result = space.take().await?;

            let submitted = self
                .submitted_at
                .get(&result.task_id)
                .copied()
                .ok_or_else(|| {
                    anyhow::anyhow!("no submission record for task {}", result.task_id.0)
                })?;
            let observed_ms = now_ms().saturating_sub(submitted);
            total_worker_ms += result.elapsed_ms;
            tracing::info!(
                "task {}: {} ms on the worker ({} ms observed)",
                result.task_id.0,
                result.elapsed_ms,
                observed_ms
            );

            let value = match result.outcome {
                Outcome::Value(value) => value,
                Outcome::Error(e) => {
                    return Err(anyhow::anyhow!(
                        "task {} failed on the worker: {}",
                        result.task_id.0,
                        e
                    ))
                }
            };
            let region: RegionCounts = serde_json::from_value(value)?;

            let first_row = result.task_id.0 as usize * ROWS_PER_TASK;
            for (offset, row) in region.counts.chunks(self.resolution).enumerate() {
                grid[first_row + offset].copy_from_slice(row);
            }
        }

        tracing::info!(
            "average worker time per task: {} ms",
            total_worker_ms / task_count.max(1) as u64
        );

        Ok(grid)
    }
}
