use crate::error::InvocationError;
use crate::join_point::{JoinPoint, Proceed};
use crate::processor::{AspectLogging, MethodAspectProcessor};
use crate::registry::ProcessorRegistry;
use std::sync::Arc;
use tracing::Instrument;

/// # MethodAspect
///
/// Dispatches an intercepted call to the processor named by its method
/// signature, resolved from an explicit [`ProcessorRegistry`].
///
/// ### Dispatch order
///
/// 1. No processor configured, the processor is a trait or abstract type, or
///    it is missing from the registry: log the mismatch and run the target.
/// 2. `is_matched` is false: the processor's `on_mismatch`, then run the target.
/// 3. `on_before` fails: return that error, the target is not run.
/// 4. Run the target, then `on_return` or `on_throw`. Target errors are
///    returned unchanged.
///
/// ### Example
///
/// ```rust,ignore
/// let aspect = MethodAspect::new(Arc::new(registry));
/// let point = JoinPoint::new(
///     Arc::clone(&orders),
///     MethodSignature::new::<u64>("place").processed_by::<AuditProcessor>(),
/// );
/// let id = aspect
///     .around(point, Proceed::from_fn(move || async move { orders.place().await }))
///     .await?;
/// ```
#[derive(Clone)]
pub struct MethodAspect {
    registry: Arc<ProcessorRegistry>,
    logging: AspectLogging,
}

impl MethodAspect {
    pub fn new(registry: Arc<ProcessorRegistry>) -> Self {
        Self {
            registry,
            logging: AspectLogging::shared().clone(),
        }
    }

    /// Use `logging` for invocations without a usable processor
    pub fn with_logging(mut self, logging: AspectLogging) -> Self {
        self.logging = logging;
        self
    }

    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }

    /// Run `proceed` with the processor hooks of `point` around it
    pub async fn around<R>(&self, point: JoinPoint, proceed: Proceed<R>) -> Result<R, InvocationError>
    where
        R: Send + Sync + 'static,
    {
        let span = tracing::debug_span!(
            "method_aspect",
            invocation = %point.id(),
            tag = %point.log_tag()
        );
        self.dispatch(point, proceed).instrument(span).await
    }

    async fn dispatch<R>(&self, point: JoinPoint, proceed: Proceed<R>) -> Result<R, InvocationError>
    where
        R: Send + Sync + 'static,
    {
        let Some(processor) = self.processor_for::<R>(&point) else {
            self.logging.on_mismatch(&point);
            return proceed.run().await;
        };

        if !processor.is_matched(&point).await {
            processor.on_mismatch(&point).await;
            return proceed.run().await;
        }

        // 1. Before hook, may veto
        if let Err(e) = processor.on_before(&point).await {
            tracing::debug!("Invocation vetoed: {}", e);
            return Err(Box::new(e));
        }

        // 2. Target call
        match proceed.run().await {
            Ok(result) => {
                // 3. Return hook on success
                processor.on_return(&point, &result).await;
                Ok(result)
            }
            Err(e) => {
                // 4. Throw hook, then hand the error back untouched
                processor.on_throw(&point, e.as_ref()).await;
                Err(e)
            }
        }
    }

    fn processor_for<R>(&self, point: &JoinPoint) -> Option<Arc<dyn MethodAspectProcessor<R>>>
    where
        R: Send + Sync + 'static,
    {
        let descriptor = point.signature().processor()?;
        if !descriptor.is_concrete() {
            return None;
        }

        match self.registry.resolve::<R>(descriptor) {
            Ok(processor) => Some(processor),
            Err(e) => {
                tracing::debug!("No usable processor: {}", e);
                None
            }
        }
    }
}
