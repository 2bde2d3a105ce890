use super::remote::HttpWorker;
use super::space::Space;
use crate::api::protocol::*;
use axum::routing::post;
use axum::{extract::Extension, http::StatusCode, Json, Router};
use std::sync::Arc;
use std::time::Duration;

/// Assembles the broker's HTTP surface.
pub fn router(space: Arc<Space>) -> Router {
    Router::new()
        .route(ENDPOINT_PUT_TASK, post(handle_put_task))
        .route(ENDPOINT_TAKE_RESULT, post(handle_take_result))
        .route(ENDPOINT_REGISTER_WORKER, post(handle_register_worker))
        .route(ENDPOINT_STOP_SPACE, post(handle_stop_space))
        .layer(Extension(space))
}

pub async fn handle_put_task(
    Extension(space): Extension<Arc<Space>>,
    Json(req): Json<PutTaskRequest>,
) -> (StatusCode, Json<PutTaskResponse>) {
    space.put(req.task).await;
    (StatusCode::OK, Json(PutTaskResponse { accepted: true }))
}

/// Blocks until a result is available. Each concurrent caller receives a
/// distinct result.
pub async fn handle_take_result(
    Extension(space): Extension<Arc<Space>>,
) -> (StatusCode, Json<TakeResultResponse>) {
    let result = space.take().await;
    tracing::debug!("result for task {} taken", result.task_id.0);
    (StatusCode::OK, Json(TakeResultResponse { result }))
}

/// Registration cannot fail: any endpoint string is accepted, and a worker
/// that turns out to be unreachable is weeded out by its first dispatch
/// call failing.
pub async fn handle_register_worker(
    Extension(space): Extension<Arc<Space>>,
    Json(req): Json<RegisterWorkerRequest>,
) -> (StatusCode, Json<RegisterWorkerResponse>) {
    let handle = Arc::new(HttpWorker::new(req.endpoint, space.execute_timeout()));
    let worker_id = space.register(handle);
    (StatusCode::OK, Json(RegisterWorkerResponse { worker_id }))
}

pub async fn handle_stop_space(
    Extension(space): Extension<Arc<Space>>,
) -> (StatusCode, Json<StopSpaceResponse>) {
    tracing::info!("stopping all registered workers");
    let workers_stopped = space.stop_workers().await;
    tracing::info!("stopping space");

    // Exit on a detached task so this response can flush first.
    tokio::spawn(async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        std::process::exit(0);
    });

    (StatusCode::OK, Json(StopSpaceResponse { workers_stopped }))
}
