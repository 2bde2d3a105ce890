//! Task Handler Registry
//!
//! A dynamic registry that maps task kinds (e.g. "tsp_permutations") to
//! executable Rust closures. This keeps the execution engine generic:
//! workloads register themselves at worker startup instead of being
//! hardcoded into the engine.

use anyhow::Result;
use dashmap::DashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a thread-safe, asynchronous task handler. It takes the
/// task's JSON payload and resolves to the computed return value.
pub type HandlerFn = Arc<
    dyn Fn(serde_json::Value) -> Pin<Box<dyn Future<Output = Result<serde_json::Value>> + Send>>
        + Send
        + Sync,
>;

/// Registry holding the mapping between task kinds and their implementation.
pub struct HandlerRegistry {
    handlers: DashMap<String, HandlerFn>,
}

impl HandlerRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            handlers: DashMap::new(),
        })
    }

    /// Registers a handler under a task kind.
    pub fn register<F, Fut>(&self, kind: &str, handler: F)
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value>> + Send + 'static,
    {
        // Box::pin type-erases the concrete future so differently-typed
        // async functions can live in the same map.
        let handler_fn: HandlerFn = Arc::new(move |payload: serde_json::Value| {
            Box::pin(handler(payload))
                as Pin<Box<dyn Future<Output = Result<serde_json::Value>> + Send>>
        });

        self.handlers.insert(kind.to_string(), handler_fn);

        tracing::info!("registered task handler: {}", kind);
    }

    /// Looks up the handler for a kind and runs it with the given payload.
    ///
    /// Returns `Err` for an unknown kind or a failing handler; the caller
    /// encodes either into the result payload rather than propagating it
    /// across the process boundary.
    pub async fn dispatch(&self, kind: &str, payload: serde_json::Value) -> Result<serde_json::Value> {
        if let Some(handler_fn) = self.handlers.get(kind) {
            handler_fn.value()(payload).await
        } else {
            Err(anyhow::anyhow!("unknown task kind: {}", kind))
        }
    }

    pub fn has_handler(&self, kind: &str) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Returns all registered task kinds.
    pub fn kinds(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }
}
