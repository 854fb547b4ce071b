use crate::error::{AspectError, Result};
use crate::join_point::TypeDescriptor;
use crate::processor::MethodAspectProcessor;
use dashmap::DashMap;
use std::any::Any;
use std::sync::Arc;

mod builder;

pub use builder::RegistryBuilder;

/// Thread-safe registry of aspect processors, keyed by processor type.
///
/// Each entry holds an `Arc<dyn MethodAspectProcessor<R>>` behind `dyn Any`,
/// so processors for different return types live in the same registry.
#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    processors: DashMap<String, ProcessorEntry>,
}

#[derive(Clone)]
struct ProcessorEntry {
    descriptor: TypeDescriptor,
    instance: Arc<dyn Any + Send + Sync>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under its own type
    pub fn register<P, R>(&mut self, processor: P) -> &mut Self
    where
        P: MethodAspectProcessor<R>,
        R: Send + Sync + 'static,
    {
        let processor: Arc<dyn MethodAspectProcessor<R>> = Arc::new(processor);
        self.insert(TypeDescriptor::of::<P>(), processor);
        self
    }

    /// Register a shared processor under an explicit descriptor
    ///
    /// Only concrete descriptors can be registered.
    pub fn register_as<R>(
        &mut self,
        descriptor: TypeDescriptor,
        processor: Arc<dyn MethodAspectProcessor<R>>,
    ) -> Result<&mut Self>
    where
        R: Send + Sync + 'static,
    {
        if !descriptor.is_concrete() {
            return Err(AspectError::NotConcrete {
                type_name: descriptor.full_name().to_string(),
            });
        }
        self.insert(descriptor, processor);
        Ok(self)
    }

    fn insert<R>(&mut self, descriptor: TypeDescriptor, processor: Arc<dyn MethodAspectProcessor<R>>)
    where
        R: Send + Sync + 'static,
    {
        tracing::debug!("Registering aspect processor: {}", descriptor);
        let entry = ProcessorEntry {
            descriptor: descriptor.clone(),
            instance: Arc::new(processor),
        };
        self.processors
            .insert(descriptor.full_name().to_string(), entry);
    }

    /// Resolve the processor registered for `descriptor`
    pub fn resolve<R>(&self, descriptor: &TypeDescriptor) -> Result<Arc<dyn MethodAspectProcessor<R>>>
    where
        R: Send + Sync + 'static,
    {
        let entry = self.processors.get(descriptor.full_name()).ok_or_else(|| {
            AspectError::ProcessorNotRegistered {
                type_name: descriptor.full_name().to_string(),
            }
        })?;

        entry
            .instance
            .downcast_ref::<Arc<dyn MethodAspectProcessor<R>>>()
            .cloned()
            .ok_or_else(|| AspectError::ReturnTypeMismatch {
                type_name: entry.descriptor.full_name().to_string(),
                expected: std::any::type_name::<R>().to_string(),
            })
    }

    pub fn contains(&self, descriptor: &TypeDescriptor) -> bool {
        self.processors.contains_key(descriptor.full_name())
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join_point::JoinPoint;
    use async_trait::async_trait;

    struct AuditProcessor;

    #[async_trait]
    impl MethodAspectProcessor<u64> for AuditProcessor {}

    struct OnlyPlaceProcessor;

    #[async_trait]
    impl MethodAspectProcessor<String> for OnlyPlaceProcessor {
        async fn is_matched(&self, point: &JoinPoint) -> bool {
            point.method_name() == "place"
        }
    }

    trait PaymentAspectProcessor {}

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ProcessorRegistry::new();
        registry.register::<_, u64>(AuditProcessor);

        let descriptor = TypeDescriptor::of::<AuditProcessor>();
        assert!(registry.contains(&descriptor));
        assert_eq!(registry.len(), 1);
        assert!(registry.resolve::<u64>(&descriptor).is_ok());
    }

    #[test]
    fn test_resolve_missing_processor() {
        let registry = ProcessorRegistry::new();
        let result = registry.resolve::<u64>(&TypeDescriptor::of::<AuditProcessor>());
        assert!(matches!(
            result,
            Err(AspectError::ProcessorNotRegistered { .. })
        ));
    }

    #[test]
    fn test_resolve_with_wrong_return_type() {
        let mut registry = ProcessorRegistry::new();
        registry.register::<_, String>(OnlyPlaceProcessor);

        let result = registry.resolve::<u64>(&TypeDescriptor::of::<OnlyPlaceProcessor>());
        assert!(matches!(result, Err(AspectError::ReturnTypeMismatch { .. })));
    }

    #[test]
    fn test_register_as_rejects_interfaces() {
        let mut registry = ProcessorRegistry::new();
        let processor: Arc<dyn MethodAspectProcessor<u64>> = Arc::new(AuditProcessor);

        let result = registry.register_as(
            TypeDescriptor::interface::<dyn PaymentAspectProcessor>(),
            Arc::clone(&processor),
        );
        assert!(matches!(result, Err(AspectError::NotConcrete { .. })));
        assert!(registry.is_empty());

        registry
            .register_as(TypeDescriptor::of::<AuditProcessor>(), processor)
            .unwrap();
        assert_eq!(registry.len(), 1);
    }
}
