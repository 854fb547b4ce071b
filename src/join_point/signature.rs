use super::TypeDescriptor;

/// Declared shape of an intercepted method.
///
/// The optional processor descriptor is the explicit replacement for
/// annotation metadata: it names the processor the host should dispatch to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    parameter_types: Vec<TypeDescriptor>,
    return_type: TypeDescriptor,
    processor: Option<TypeDescriptor>,
}

impl MethodSignature {
    /// Create a signature for a method named `name` returning `R`
    pub fn new<R: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter_types: Vec::new(),
            return_type: TypeDescriptor::of::<R>(),
            processor: None,
        }
    }

    /// Append a declared parameter type
    pub fn param<T: ?Sized + 'static>(mut self) -> Self {
        self.parameter_types.push(TypeDescriptor::of::<T>());
        self
    }

    /// Name the processor that handles this method
    pub fn with_processor(mut self, processor: TypeDescriptor) -> Self {
        self.processor = Some(processor);
        self
    }

    /// Shorthand for `with_processor(TypeDescriptor::of::<P>())`
    pub fn processed_by<P: 'static>(self) -> Self {
        self.with_processor(TypeDescriptor::of::<P>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameter_types(&self) -> &[TypeDescriptor] {
        &self.parameter_types
    }

    pub fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }

    pub fn processor(&self) -> Option<&TypeDescriptor> {
        self.processor.as_ref()
    }
}
