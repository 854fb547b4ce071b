use crate::error::AspectError;
use crate::join_point::JoinPoint;
use async_trait::async_trait;
use std::error::Error;

mod logging;

pub use logging::AspectLogging;

/// Result type for processor hooks.
pub type AspectResult = Result<(), AspectError>;

/// # MethodAspectProcessor
///
/// Handles the cross-cutting concern of a single intercepted method whose
/// target returns `R`. A [`crate::aspect::MethodAspect`] drives the hooks
/// around the target call.
///
/// The mismatch and throw hooks default to [`AspectLogging`]. Override
/// [`MethodAspectProcessor::logging`] to route them to a different logger
/// factory.
///
/// ### Example
///
/// ```rust
/// use meshestra_aspect::prelude::*;
///
/// pub struct AuditProcessor;
///
/// #[async_trait]
/// impl MethodAspectProcessor<u64> for AuditProcessor {
///     async fn on_return(&self, point: &JoinPoint, order_id: &u64) {
///         tracing::info!("{} created order {}", point.log_tag(), order_id);
///     }
/// }
/// ```
#[async_trait]
pub trait MethodAspectProcessor<R>: Send + Sync + 'static
where
    R: Send + Sync + 'static,
{
    /// Whether this processor handles the intercepted method.
    async fn is_matched(&self, _point: &JoinPoint) -> bool {
        true
    }

    /// Called instead of the other hooks when `is_matched` returns `false`.
    async fn on_mismatch(&self, point: &JoinPoint) {
        self.logging().on_mismatch(point);
    }

    /// Executed before the target method. An error vetoes the call.
    async fn on_before(&self, _point: &JoinPoint) -> AspectResult {
        Ok(())
    }

    /// Executed after the target method returned successfully.
    async fn on_return(&self, _point: &JoinPoint, _result: &R) {}

    /// Executed when the target method returned an error.
    ///
    /// The error is propagated to the caller after this hook returns.
    async fn on_throw(&self, point: &JoinPoint, error: &(dyn Error + Send + Sync + 'static)) {
        self.logging().on_throw(point, error);
    }

    fn logging(&self) -> &AspectLogging {
        AspectLogging::shared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join_point::MethodSignature;
    use crate::testing::{LogLevel, MemoryLoggerFactory};
    use std::sync::Arc;

    struct OrderService;

    struct LoggedProcessor {
        logging: AspectLogging,
    }

    #[async_trait]
    impl MethodAspectProcessor<u64> for LoggedProcessor {
        fn logging(&self) -> &AspectLogging {
            &self.logging
        }
    }

    #[tokio::test]
    async fn test_default_hooks_delegate_to_logging() {
        let factory = MemoryLoggerFactory::new();
        let processor = LoggedProcessor {
            logging: AspectLogging::new(Arc::new(factory.clone())),
        };
        let point = JoinPoint::new(
            Arc::new(OrderService),
            MethodSignature::new::<u64>("place").processed_by::<LoggedProcessor>(),
        );

        assert!(processor.is_matched(&point).await);
        assert!(processor.on_before(&point).await.is_ok());
        processor.on_return(&point, &7).await;
        assert!(factory.is_empty());

        processor.on_mismatch(&point).await;
        let error: Box<dyn Error + Send + Sync> = "boom".into();
        processor.on_throw(&point, error.as_ref()).await;

        let records = factory.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, LogLevel::Warn);
        assert_eq!(records[1].level, LogLevel::Error);
        assert_eq!(records[1].error.as_deref(), Some("boom"));
    }
}
