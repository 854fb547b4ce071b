//! In-memory logging for asserting on processor output.

use crate::logging::{AspectLogger, ErrorReport, LoggerFactory};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
    Warn,
    Error,
}

/// One captured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub category: String,
    pub level: LogLevel,
    pub tag: String,
    pub message: String,
    /// Rendered error report, for error entries
    pub error: Option<String>,
}

type Records = Arc<Mutex<Vec<LogRecord>>>;

/// Logger factory that keeps every entry in memory.
///
/// Clones share the same record list.
#[derive(Clone, Default)]
pub struct MemoryLoggerFactory {
    records: Records,
}

impl MemoryLoggerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        lock(&self.records).clone()
    }

    pub fn records_for(&self, category: &str) -> Vec<LogRecord> {
        lock(&self.records)
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        lock(&self.records).clear();
    }
}

impl LoggerFactory for MemoryLoggerFactory {
    fn logger(&self, category: &str) -> Arc<dyn AspectLogger> {
        Arc::new(MemoryLogger {
            category: category.to_string(),
            records: Arc::clone(&self.records),
        })
    }
}

struct MemoryLogger {
    category: String,
    records: Records,
}

impl MemoryLogger {
    fn push(&self, level: LogLevel, tag: &str, message: &str, error: Option<String>) {
        lock(&self.records).push(LogRecord {
            category: self.category.clone(),
            level,
            tag: tag.to_string(),
            message: message.to_string(),
            error,
        });
    }
}

impl AspectLogger for MemoryLogger {
    fn category(&self) -> &str {
        &self.category
    }

    fn warn(&self, tag: &str, message: &str) {
        self.push(LogLevel::Warn, tag, message, None);
    }

    fn error(&self, tag: &str, message: &str, report: &ErrorReport<'_>) {
        self.push(LogLevel::Error, tag, message, Some(report.to_string()));
    }
}

fn lock(records: &Records) -> MutexGuard<'_, Vec<LogRecord>> {
    records.lock().unwrap_or_else(PoisonError::into_inner)
}
