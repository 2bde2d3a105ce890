use compute_space::space::handlers;
use compute_space::space::space::Space;
use std::net::SocketAddr;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} --bind <addr:port> [--timeout-ms <ms>]", args[0]);
        eprintln!("Example: {} --bind 127.0.0.1:5000", args[0]);
        std::process::exit(1);
    }

    let mut bind_addr: Option<SocketAddr> = None;
    let mut execute_timeout: Option<Duration> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = Some(args[i + 1].parse()?);
                i += 2;
            }
            "--timeout-ms" => {
                execute_timeout = Some(Duration::from_millis(args[i + 1].parse()?));
                i += 2;
            }
            _ => {
                i += 1;
            }
        }
    }

    let bind_addr = bind_addr.expect("--bind is required");

    let space = Space::new(execute_timeout);
    let app = handlers::router(space);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("space is ready on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
