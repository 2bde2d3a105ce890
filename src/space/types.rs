use super::remote::WorkerHandle;
use crate::api::types::WorkerId;
use std::sync::Arc;

/// The broker-side record binding a worker's remote handle to its id.
///
/// Created at registration, never explicitly destroyed except as a side
/// effect of shutdown. When a worker's dispatch loop retires after a
/// communication failure the registration record stays: the stop sweep
/// still contacts the worker and logs the failure.
#[derive(Clone)]
pub struct WorkerRegistration {
    pub id: WorkerId,
    pub handle: Arc<dyn WorkerHandle>,
    /// Timestamp (ms) when the worker registered.
    pub registered_at: u64,
}
