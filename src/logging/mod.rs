//! Logger factory seam used by the default processor logging.
//!
//! Loggers are addressed by a category string, normally the full type name
//! of the intercepted target. [`TracingLoggerFactory`] writes through
//! `tracing`; tests swap in [`crate::testing::MemoryLoggerFactory`].

mod messages;
mod report;

pub use messages::MessageLanguage;
pub use report::ErrorReport;

use dashmap::DashMap;
use std::sync::Arc;

/// A logging sink scoped to one category
pub trait AspectLogger: Send + Sync {
    fn category(&self) -> &str;

    /// Emit a warning for the invocation identified by `tag`
    fn warn(&self, tag: &str, message: &str);

    /// Emit an error together with the full error detail
    fn error(&self, tag: &str, message: &str, report: &ErrorReport<'_>);
}

/// Creates loggers keyed by category
pub trait LoggerFactory: Send + Sync + 'static {
    fn logger(&self, category: &str) -> Arc<dyn AspectLogger>;
}

/// Logger that emits `tracing` events
#[derive(Debug, Clone)]
pub struct TracingLogger {
    category: String,
}

impl TracingLogger {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl AspectLogger for TracingLogger {
    fn category(&self) -> &str {
        &self.category
    }

    fn warn(&self, tag: &str, message: &str) {
        tracing::warn!(logger = %self.category, tag = %tag, "{}", message);
    }

    fn error(&self, tag: &str, message: &str, report: &ErrorReport<'_>) {
        tracing::error!(
            logger = %self.category,
            tag = %tag,
            error = %report,
            "{}",
            message
        );
    }
}

/// Default factory; loggers are created once per category and reused
#[derive(Default)]
pub struct TracingLoggerFactory {
    loggers: DashMap<String, Arc<TracingLogger>>,
}

impl TracingLoggerFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoggerFactory for TracingLoggerFactory {
    fn logger(&self, category: &str) -> Arc<dyn AspectLogger> {
        if let Some(logger) = self.loggers.get(category) {
            return logger.clone();
        }
        self.loggers
            .entry(category.to_string())
            .or_insert_with(|| Arc::new(TracingLogger::new(category)))
            .clone()
    }
}
