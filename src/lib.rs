//! # Meshestra Aspect
//!
//! Method-level aspect processors for Meshestra, with default logging for
//! the two cases every processor has to report:
//!
//! - an intercepted method that no concrete processor handled (a warning),
//! - a target method that returned an error (an error entry with the full
//!   error chain).
//!
//! Both are tagged `<TargetType>.<method>` and written to a logger scoped to
//! the target's runtime type.
//!
//! ## Features
//!
//! - **Explicit dispatch**: processors are named on the [`MethodSignature`]
//!   and resolved from a [`ProcessorRegistry`], no reflection involved
//! - **Default hooks**: [`MethodAspectProcessor`] logs mismatches and
//!   failures through [`AspectLogging`] unless overridden
//! - **Pluggable logging**: `tracing` by default, any [`LoggerFactory`] on demand
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meshestra_aspect::prelude::*;
//!
//! struct OrderService;
//!
//! impl OrderService {
//!     async fn place(&self, sku: &str) -> std::result::Result<u64, InvocationError> {
//!         if sku.is_empty() {
//!             return Err("empty sku".into());
//!         }
//!         Ok(1)
//!     }
//! }
//!
//! // 1. Define a processor; mismatch and error logging come for free
//! struct AuditProcessor;
//!
//! #[async_trait]
//! impl MethodAspectProcessor<u64> for AuditProcessor {}
//!
//! #[tokio::main]
//! async fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // 2. Register it
//!     let registry = RegistryBuilder::new()
//!         .register::<_, u64>(AuditProcessor)
//!         .build();
//!     let aspect = MethodAspect::new(Arc::new(registry));
//!
//!     // 3. Intercept a call
//!     let orders = Arc::new(OrderService);
//!     let point = JoinPoint::new(
//!         Arc::clone(&orders),
//!         MethodSignature::new::<u64>("place")
//!             .param::<str>()
//!             .processed_by::<AuditProcessor>(),
//!     )
//!     .with_arg(String::new());
//!
//!     // Logs "OrderService.place 执行时出错" and returns the error
//!     let result = aspect
//!         .around(point, Proceed::from_fn(move || async move { orders.place("").await }))
//!         .await;
//!     assert!(result.is_err());
//! }
//! ```

pub mod aspect;
pub mod config;
pub mod error;
pub mod join_point;
pub mod logging;
pub mod processor;
pub mod registry;
pub mod testing;

// Re-export core types
pub use aspect::MethodAspect;
pub use config::AspectConfig;
pub use error::{AspectError, InvocationError, Result};
pub use join_point::{JoinPoint, MethodSignature, Proceed, TypeDescriptor, TypeKind};
pub use logging::{AspectLogger, LoggerFactory, MessageLanguage, TracingLoggerFactory};
pub use processor::{AspectLogging, AspectResult, MethodAspectProcessor};
pub use registry::{ProcessorRegistry, RegistryBuilder};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;

/// Prelude module for convenient imports
///
/// ```
/// use meshestra_aspect::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aspect::MethodAspect;
    pub use crate::config::AspectConfig;
    pub use crate::error::{AspectError, InvocationError, Result};
    pub use crate::join_point::{JoinPoint, MethodSignature, Proceed, TypeDescriptor, TypeKind};
    pub use crate::logging::{
        AspectLogger, ErrorReport, LoggerFactory, MessageLanguage, TracingLoggerFactory,
    };
    pub use crate::processor::{AspectLogging, AspectResult, MethodAspectProcessor};
    pub use crate::registry::{ProcessorRegistry, RegistryBuilder};
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
