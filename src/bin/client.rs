use compute_space::client::SpaceClient;
use compute_space::jobs::mandelbrot::MandelbrotJob;
use compute_space::jobs::tsp::TspJob;
use compute_space::jobs::Job;
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 5 {
        eprintln!(
            "Usage: {} --space <url> --job <mandelbrot|tsp|all>",
            args[0]
        );
        eprintln!(
            "Example: {} --space http://127.0.0.1:5000 --job tsp",
            args[0]
        );
        std::process::exit(1);
    }

    let mut space_url: Option<String> = None;
    let mut job_name: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--space" => {
                space_url = Some(args[i + 1].clone());
                i += 2;
            }
            "--job" => {
                job_name = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let space_url = space_url.expect("--space is required");
    let job_name = job_name.expect("--job is required");

    let client = SpaceClient::new(&space_url);

    if job_name == "mandelbrot" || job_name == "all" {
        let mut job = MandelbrotJob::new((-0.7510975859375, 0.1315680625), 0.01611, 1024, 512);
        let grid = run_job("mandelbrot", &mut job, &client).await?;
        let inside = grid
            .iter()
            .flatten()
            .filter(|&&count| count >= 512)
            .count();
        tracing::info!(
            "mandelbrot: {}x{} grid, {} pixels inside the set",
            grid.len(),
            grid[0].len(),
            inside
        );
    }

    if job_name == "tsp" || job_name == "all" {
        let cities = vec![
            (1.0, 1.0),
            (8.0, 1.0),
            (8.0, 8.0),
            (1.0, 8.0),
            (2.0, 2.0),
            (7.0, 2.0),
            (7.0, 7.0),
            (2.0, 7.0),
            (3.0, 3.0),
            (6.0, 3.0),
            (6.0, 6.0),
            (3.0, 6.0),
        ];
        let mut job = TspJob::new(cities);
        let best = run_job("tsp", &mut job, &client).await?;
        tracing::info!(
            "tsp: minimal tour {:?} with length {:.4}",
            best.tour,
            best.distance
        );
    }

    match client.stop().await {
        Ok(stopped) => tracing::info!("space stopped ({} workers acknowledged)", stopped),
        Err(e) => tracing::warn!("space did not confirm the stop: {}", e),
    }

    Ok(())
}

/// Decomposes the job into tasks and folds the collected results, logging
/// the overall elapsed time the way each job logs its per-task times.
async fn run_job<J: Job>(
    name: &str,
    job: &mut J,
    client: &SpaceClient,
) -> anyhow::Result<J::Output> {
    tracing::info!("running job: {}", name);
    let started = Instant::now();

    job.generate_tasks(client).await?;
    let output = job.collect_results(client).await?;

    tracing::info!("job {} finished in {} ms", name, started.elapsed().as_millis());
    Ok(output)
}
