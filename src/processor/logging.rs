use crate::config::AspectConfig;
use crate::join_point::{JoinPoint, TypeDescriptor};
use crate::logging::{AspectLogger, ErrorReport, LoggerFactory, TracingLoggerFactory};
use std::error::Error;
use std::sync::{Arc, LazyLock};

static SHARED: LazyLock<AspectLogging> = LazyLock::new(AspectLogging::default);

/// Default logging for the two cases every processor inherits:
/// an intercepted method that no processor handled, and a target method
/// that returned an error.
///
/// Each call resolves a logger for the target's runtime type and writes
/// exactly one entry. Nothing is stored between calls.
#[derive(Clone)]
pub struct AspectLogging {
    factory: Arc<dyn LoggerFactory>,
    config: AspectConfig,
}

impl Default for AspectLogging {
    fn default() -> Self {
        Self::new(Arc::new(TracingLoggerFactory::new()))
    }
}

impl AspectLogging {
    pub fn new(factory: Arc<dyn LoggerFactory>) -> Self {
        Self {
            factory,
            config: AspectConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AspectConfig) -> Self {
        self.config = config;
        self
    }

    /// Process-wide instance backed by `tracing`
    pub fn shared() -> &'static AspectLogging {
        &SHARED
    }

    pub fn config(&self) -> &AspectConfig {
        &self.config
    }

    /// Warn that no concrete processor handled the invocation
    pub fn on_mismatch(&self, point: &JoinPoint) {
        let logger = self.logger(point);
        let tag = self.log_tag(point);
        let language = self.config.language;

        let message = match point.signature().processor() {
            None => language.no_processor(&tag),
            Some(processor) if !processor.is_concrete() => {
                language.processor_not_concrete(&tag, processor.simple_name())
            }
            Some(processor) => language.not_handled(&tag, processor.simple_name()),
        };

        logger.warn(&tag, &message);
    }

    /// Log the error raised by the target method
    ///
    /// The error is only observed; propagating it stays with the caller.
    pub fn on_throw(&self, point: &JoinPoint, error: &(dyn Error + 'static)) {
        let logger = self.logger(point);
        let tag = self.log_tag(point);

        let mut report = ErrorReport::new(error);
        if !self.config.error_chain {
            report = report.top_level();
        }

        logger.error(&tag, &self.config.language.failed(&tag), &report);
    }

    /// Logger scoped to the runtime type of the target
    pub fn logger(&self, point: &JoinPoint) -> Arc<dyn AspectLogger> {
        self.factory.logger(point.target_type().full_name())
    }

    /// `<TargetSimpleName>.<method>`
    pub fn log_tag(&self, point: &JoinPoint) -> String {
        point.log_tag()
    }

    /// Declared return type of the intercepted method
    pub fn return_type<'a>(&self, point: &'a JoinPoint) -> &'a TypeDescriptor {
        point.signature().return_type()
    }
}
