//! Euclidean TSP Workload
//!
//! Brute-force traveling-salesman solver over cities in the 2D Euclidean
//! plane. Every tour starts and ends at city 0, so fixing the city visited
//! second splits the (n-1)! search space into n-1 independent slices of
//! (n-2)! permutations each: one task per slice. The worker-side handler
//! scans its slice in lexicographic order for the cheapest tour; the
//! client folds the per-slice minima into the global minimal tour.

use super::Job;
use crate::api::types::{now_ms, Outcome, TaskEnvelope, TaskId};
use crate::client::SpaceClient;
use crate::worker::registry::HandlerRegistry;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const KIND: &str = "tsp_permutations";

/// Input of one slice task: the city coordinates and the city fixed in
/// second position of every tour this task considers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourPayload {
    pub cities: Vec<(f64, f64)>,
    pub second_city: usize,
}

/// The cheapest tour found in a slice: the visiting order (starting at
/// city 0) and its total closed-loop length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourOutcome {
    pub tour: Vec<usize>,
    pub distance: f64,
}

/// Scans every ordering of the remaining cities for the cheapest closed
/// tour `0 -> second_city -> ... -> 0`.
pub fn best_tour(cities: &[(f64, f64)], second_city: usize) -> TourOutcome {
    let rest: Vec<usize> = (1..cities.len()).filter(|&c| c != second_city).collect();

    let mut permutation = rest;
    let mut best: Vec<usize> = Vec::new();
    let mut best_distance = f64::MAX;

    loop {
        let mut tour = Vec::with_capacity(cities.len());
        tour.push(0);
        tour.push(second_city);
        tour.extend_from_slice(&permutation);

        let distance = tour_distance(cities, &tour);
        if distance < best_distance {
            best_distance = distance;
            best = tour;
        }

        if !next_permutation(&mut permutation) {
            break;
        }
    }

    TourOutcome {
        tour: best,
        distance: best_distance,
    }
}

/// Total length of the closed loop visiting `tour` in order and returning
/// to its first city.
pub fn tour_distance(cities: &[(f64, f64)], tour: &[usize]) -> f64 {
    let mut total = 0.0;
    for window in tour.windows(2) {
        total += euclidean(cities[window[0]], cities[window[1]]);
    }
    if let (Some(&first), Some(&last)) = (tour.first(), tour.last()) {
        total += euclidean(cities[last], cities[first]);
    }
    total
}

fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Advances `values` to its next lexicographic permutation in place.
/// Returns false when `values` already is the last permutation.
fn next_permutation(values: &mut [usize]) -> bool {
    if values.len() < 2 {
        return false;
    }

    // Largest k with values[k] < values[k + 1]; none means we are done.
    let Some(k) = (0..values.len() - 1).rev().find(|&k| values[k] < values[k + 1]) else {
        return false;
    };
    // Largest l > k with values[k] < values[l]; k + 1 qualifies, so it exists.
    let l = (k + 1..values.len())
        .rev()
        .find(|&l| values[k] < values[l])
        .unwrap_or(k + 1);

    values.swap(k, l);
    values[k + 1..].reverse();
    true
}

/// Registers the worker-side handler for this workload.
pub fn register(registry: &HandlerRegistry) {
    registry.register(KIND, |payload| async move {
        let slice: TourPayload = serde_json::from_value(payload)?;
        if slice.second_city == 0 || slice.second_city >= slice.cities.len() {
            return Err(anyhow::anyhow!(
                "second_city {} out of range for {} cities",
                slice.second_city,
                slice.cities.len()
            ));
        }
        let outcome = best_tour(&slice.cities, slice.second_city);
        Ok(serde_json::to_value(outcome)?)
    });
}

/// The client-side job: n-1 slice tasks folded into the minimal tour.
pub struct TspJob {
    cities: Vec<(f64, f64)>,
    /// Submission time per task, for client-side latency reporting only.
    submitted_at: HashMap<TaskId, u64>,
}

impl TspJob {
    pub fn new(cities: Vec<(f64, f64)>) -> Self {
        Self {
            cities,
            submitted_at: HashMap::new(),
        }
    }

    pub fn task_count(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }
}

#[async_trait]
impl Job for TspJob {
    type Output = TourOutcome;

    async fn generate_tasks(&mut self, space: &SpaceClient) -> Result<()> {
        tracing::info!(
            "generating {} tsp tasks over {} cities",
            self.task_count(),
            self.cities.len()
        );

        for (index, second_city) in (1..self.cities.len()).enumerate() {
            let task = TaskEnvelope {
                task_id: TaskId(index as u32),
                kind: KIND.to_string(),
                payload: serde_json::to_value(TourPayload {
                    cities: self.cities.clone(),
                    second_city,
                })?,
            };
            self.submitted_at.insert(task.task_id, now_ms());
            space.put(task).await?;
        }

        Ok(())
    }

    async fn collect_results(&mut self, space: &SpaceClient) -> Result<TourOutcome> {
        let task_count = self.task_count();
        let mut best: Option<TourOutcome> = None;
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
            let slice_best: TourOutcome = serde_json::from_value(value)?;

            let improved = best
                .as_ref()
                .map(|current| slice_best.distance < current.distance)
                .unwrap_or(true);
            if improved {
                best = Some(slice_best);
            }
        }

        tracing::info!(
            "average worker time per task: {} ms",
            total_worker_ms / task_count.max(1) as u64
        );

        best.ok_or_else(|| anyhow::anyhow!("job produced no tasks"))
    }
}
