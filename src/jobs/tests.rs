//! Jobs Module Tests
//!
//! ## Test Scopes
//! - **TSP**: slice scanning and global folding, including the 4-city
//!   square whose minimal tour is its perimeter.
//! - **Mandelbrot**: band decomposition, pixel iteration counts.
//! - **End to end**: a full job run through real space and worker routers.

#[cfg(test)]
mod tests {
    use crate::client::SpaceClient;
    use crate::jobs::mandelbrot::{evaluate_region, RegionPayload, ROWS_PER_TASK};
    use crate::jobs::tsp::{best_tour, tour_distance, TspJob};
    use crate::jobs::{register_handlers, Job};
    use crate::space::space::Space;
    use crate::worker::executor::Executor;
    use crate::worker::registry::HandlerRegistry;
    use std::time::Duration;

    /// Unit square: the minimal tour is the perimeter, length 4.
    fn square() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
    }

    // ============================================================
    // TSP
    // ============================================================

    #[test]
    fn test_tour_distance_closes_the_loop() {
        let distance = tour_distance(&square(), &[0, 1, 2, 3]);
        assert!((distance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_square_minimal_tour_is_the_perimeter() {
        // Fold the per-slice minima exactly as the job does: one slice
        // per choice of second city.
        let cities = square();
        let best = (1..cities.len())
            .map(|second_city| best_tour(&cities, second_city))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
            .expect("at least one slice");

        assert!((best.distance - 4.0).abs() < 1e-9);

        // The winning tour is a permutation of all four cities starting
        // at city 0.
        let mut visited = best.tour.clone();
        visited.sort();
        assert_eq!(visited, vec![0, 1, 2, 3]);
        assert_eq!(best.tour[0], 0);
    }

    #[test]
    fn test_slice_scans_its_whole_permutation_space() {
        // A crossing tour (0 -> 2 second) is strictly longer than the
        // perimeter, but the slice must still find its own best ordering.
        let crossing = best_tour(&square(), 2);
        assert!(crossing.distance > 4.0);
        assert_eq!(crossing.tour[1], 2);
    }

    #[test]
    fn test_two_city_degenerate_slice() {
        let cities = vec![(0.0, 0.0), (3.0, 4.0)];
        let outcome = best_tour(&cities, 1);
        assert_eq!(outcome.tour, vec![0, 1]);
        assert!((outcome.distance - 10.0).abs() < 1e-9);
    }

    // ============================================================
    // MANDELBROT
    // ============================================================

    #[test]
    fn test_band_decomposition_handles_ragged_last_band() {
        // 40 rows with 32 rows per task: a full band plus a band of 8.
        let region = RegionPayload {
            corner_x: -2.0,
            corner_y: -2.0,
            edge_length: 4.0,
            resolution: 40,
            iteration_limit: 16,
            band: 1,
        };
        let counts = evaluate_region(&region);
        assert_eq!(counts.len(), (40 - ROWS_PER_TASK) * 40);
    }

    #[test]
    fn test_point_inside_the_set_reaches_the_iteration_limit() {
        // c = 0 never escapes.
        let region = RegionPayload {
            corner_x: 0.0,
            corner_y: 0.0,
            edge_length: 1.0,
            resolution: 1,
            iteration_limit: 50,
            band: 0,
        };
        assert_eq!(evaluate_region(&region), vec![50]);
    }

    #[test]
    fn test_point_outside_the_set_escapes_quickly() {
        // c = 2 + 2i escapes on the second check.
        let region = RegionPayload {
            corner_x: 2.0,
            corner_y: 2.0,
            edge_length: 1.0,
            resolution: 1,
            iteration_limit: 50,
            band: 0,
        };
        assert_eq!(evaluate_region(&region), vec![2]);
    }

    // ============================================================
    // END TO END
    // ============================================================

    #[tokio::test]
    async fn test_tsp_job_end_to_end_over_http() {
        // Worker with the real sample handlers.
        let registry = HandlerRegistry::new();
        register_handlers(&registry);
        let executor = Executor::new(registry);

        let worker_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let worker_addr = worker_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(worker_listener, crate::worker::handlers::router(executor))
                .await
                .unwrap();
        });

        let space = Space::new(None);
        let space_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let space_addr = space_listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(space_listener, crate::space::handlers::router(space))
                .await
                .unwrap();
        });

        let client = SpaceClient::new(&format!("http://{}", space_addr));
        client
            .register(&format!("http://{}", worker_addr))
            .await
            .unwrap();

        let mut job = TspJob::new(square());
        job.generate_tasks(&client).await.unwrap();
        let best = tokio::time::timeout(Duration::from_secs(30), job.collect_results(&client))
            .await
            .expect("the job should complete")
            .unwrap();

        assert!((best.distance - 4.0).abs() < 1e-9);
        let mut visited = best.tour.clone();
        visited.sort();
        assert_eq!(visited, vec![0, 1, 2, 3]);
    }
}
