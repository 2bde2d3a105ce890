use compute_space::client::SpaceClient;
use compute_space::jobs;
use compute_space::worker::executor::Executor;
use compute_space::worker::handlers;
use compute_space::worker::registry::HandlerRegistry;
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 5 {
        eprintln!("Usage: {} --bind <addr:port> --space <url>", args[0]);
        eprintln!(
            "Example: {} --bind 127.0.0.1:6100 --space http://127.0.0.1:5000",
            args[0]
        );
        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut space_url: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--space" => {
                space_url = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.expect("--bind is required");
    let space_url = space_url.expect("--space is required");

    let registry = HandlerRegistry::new();
    jobs::register_handlers(&registry);
    let executor = Executor::new(registry);

    let app = handlers::router(executor);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let endpoint = format!("http://{}", listener.local_addr()?);

    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let worker_id = SpaceClient::new(&space_url).register(&endpoint).await?;
    tracing::info!("worker {} ready on {}", worker_id.0, endpoint);

    server.await??;

    Ok(())
}
