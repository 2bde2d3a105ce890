use super::executor::Executor;
use crate::api::protocol::*;
use axum::routing::post;
use axum::{extract::Extension, http::StatusCode, Json, Router};
use std::sync::Arc;
use std::time::Duration;

/// Assembles the worker's HTTP surface.
pub fn router(executor: Arc<Executor>) -> Router {
    Router::new()
        .route(ENDPOINT_EXECUTE_TASK, post(handle_execute_task))
        .route(ENDPOINT_STOP_WORKER, post(handle_stop_worker))
        .layer(Extension(executor))
}

pub async fn handle_execute_task(
    Extension(executor): Extension<Arc<Executor>>,
    Json(req): Json<ExecuteTaskRequest>,
) -> (StatusCode, Json<ExecuteTaskResponse>) {
    let result = executor.execute(&req.task).await;
    (StatusCode::OK, Json(ExecuteTaskResponse { result }))
}

/// Terminates the worker process on a detached task, leaving a short
/// window for this response to flush.
pub async fn handle_stop_worker() -> StatusCode {
    tracing::info!("received command to stop");

    tokio::spawn(async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        std::process::exit(0);
    });

    StatusCode::OK
}
