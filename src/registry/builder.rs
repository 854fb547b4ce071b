use crate::error::Result;
use crate::join_point::TypeDescriptor;
use crate::processor::MethodAspectProcessor;
use crate::registry::ProcessorRegistry;
use std::sync::Arc;

/// Builder for constructing a processor registry
///
/// # Example
/// ```rust,ignore
/// let registry = RegistryBuilder::new()
///     .register::<_, Receipt>(AuditProcessor)
///     .register::<_, u64>(RetryProcessor::new(3))
///     .build();
/// ```
pub struct RegistryBuilder {
    registry: ProcessorRegistry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: ProcessorRegistry::new(),
        }
    }

    /// Register a processor under its own type
    pub fn register<P, R>(mut self, processor: P) -> Self
    where
        P: MethodAspectProcessor<R>,
        R: Send + Sync + 'static,
    {
        self.registry.register::<P, R>(processor);
        self
    }

    /// Register a shared processor under an explicit, concrete descriptor
    pub fn register_as<R>(
        mut self,
        descriptor: TypeDescriptor,
        processor: Arc<dyn MethodAspectProcessor<R>>,
    ) -> Result<Self>
    where
        R: Send + Sync + 'static,
    {
        self.registry.register_as(descriptor, processor)?;
        Ok(self)
    }

    pub fn build(self) -> ProcessorRegistry {
        self.registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
