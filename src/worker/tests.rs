//! Worker Module Tests
//!
//! ## Test Scopes
//! - **Registry**: registration, lookup, dispatch, unknown kinds.
//! - **Executor**: wall-clock timing and the capture of application-level
//!   failures into the result payload.

#[cfg(test)]
mod tests {
    use crate::api::types::{Outcome, TaskEnvelope, TaskId};
    use crate::worker::executor::Executor;
    use crate::worker::registry::HandlerRegistry;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn task(kind: &str, payload: serde_json::Value) -> TaskEnvelope {
        TaskEnvelope {
            task_id: TaskId(0),
            kind: kind.to_string(),
            payload,
        }
    }

    // ============================================================
    // REGISTRY
    // ============================================================

    #[tokio::test]
    async fn test_registry_register_and_dispatch() {
        let registry = HandlerRegistry::new();
        let call_count = Arc::new(AtomicUsize::new(0));
        let call_count_clone = call_count.clone();

        registry.register("count", move |_payload| {
            let count = call_count_clone.clone();
            async move {
                count.fetch_add(1, Ordering::SeqCst);
                Ok(serde_json::Value::Null)
            }
        });

        assert!(registry.has_handler("count"));
        assert_eq!(registry.handler_count(), 1);

        let result = registry.dispatch("count", serde_json::Value::Null).await;

        assert!(result.is_ok());
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_registry_unknown_kind_returns_error() {
        let registry = HandlerRegistry::new();

        let result = registry
            .dispatch("does_not_exist", serde_json::Value::Null)
            .await;

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unknown task kind"));
    }

    #[tokio::test]
    async fn test_registry_handler_receives_payload() {
        let registry = HandlerRegistry::new();

        registry.register("double", |payload| async move {
            let n = payload["n"].as_u64().unwrap_or(0);
            Ok(serde_json::json!({ "doubled": n * 2 }))
        });

        let value = registry
            .dispatch("double", serde_json::json!({ "n": 21 }))
            .await
            .unwrap();
        assert_eq!(value["doubled"], 42);
    }

    // ============================================================
    // EXECUTOR
    // ============================================================

    #[tokio::test]
    async fn test_executor_tags_result_with_task_id() {
        let registry = HandlerRegistry::new();
        registry.register("echo", |payload| async move { Ok(payload) });
        let executor = Executor::new(registry);

        let mut input = task("echo", serde_json::json!("hello"));
        input.task_id = TaskId(9);

        let result = executor.execute(&input).await;

        assert_eq!(result.task_id, TaskId(9));
        assert_eq!(result.outcome, Outcome::Value(serde_json::json!("hello")));
    }

    #[tokio::test]
    async fn test_executor_measures_elapsed_time() {
        let registry = HandlerRegistry::new();
        registry.register("slow", |_payload| async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(serde_json::Value::Null)
        });
        let executor = Executor::new(registry);

        let result = executor.execute(&task("slow", serde_json::Value::Null)).await;

        assert!(
            result.elapsed_ms >= 40,
            "expected at least ~50 ms, measured {} ms",
            result.elapsed_ms
        );
    }

    #[tokio::test]
    async fn test_executor_captures_handler_failure_into_outcome() {
        let registry = HandlerRegistry::new();
        registry.register("broken", |_payload| async move {
            Err(anyhow::anyhow!("intentional failure"))
        });
        let executor = Executor::new(registry);

        let result = executor
            .execute(&task("broken", serde_json::Value::Null))
            .await;

        match result.outcome {
            Outcome::Error(message) => assert!(message.contains("intentional failure")),
            Outcome::Value(_) => panic!("handler failure must surface as an error outcome"),
        }
    }

    #[tokio::test]
    async fn test_executor_reports_unknown_kind_as_error_outcome() {
        let registry = HandlerRegistry::new();
        let executor = Executor::new(registry);

        let result = executor
            .execute(&task("unregistered", serde_json::Value::Null))
            .await;

        match result.outcome {
            Outcome::Error(message) => assert!(message.contains("unknown task kind")),
            Outcome::Value(_) => panic!("expected an error outcome"),
        }
    }
}
