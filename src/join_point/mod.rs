//! Interception context handed to aspect processors.
//!
//! A [`JoinPoint`] describes one intercepted call: the target instance and
//! its runtime type, the method signature, and the runtime arguments. It is
//! read-only and lives for the duration of that call. The deferred call
//! itself travels separately as a [`Proceed`].

mod descriptor;
mod signature;

pub use descriptor::{TypeDescriptor, TypeKind};
pub use signature::MethodSignature;

use crate::error::InvocationError;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use uuid::Uuid;

/// Future produced by a [`Proceed`]
pub type ProceedFuture<R> = Pin<Box<dyn Future<Output = Result<R, InvocationError>> + Send>>;

type SharedValue = Arc<dyn Any + Send + Sync>;

/// One intercepted method call.
#[derive(Clone)]
pub struct JoinPoint {
    id: Uuid,
    target: SharedValue,
    target_type: TypeDescriptor,
    signature: Arc<MethodSignature>,
    args: Vec<SharedValue>,
}

impl JoinPoint {
    /// Create a join point for a call on `target`
    ///
    /// The runtime type of the target is captured from `T`.
    pub fn new<T>(target: Arc<T>, signature: impl Into<Arc<MethodSignature>>) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::with_target_type(target, TypeDescriptor::of::<T>(), signature)
    }

    /// Create a join point for a target whose runtime type is stated explicitly
    ///
    /// For hosts holding their targets as trait objects, e.g. `Arc<dyn Service>`.
    pub fn with_target_type<T>(
        target: Arc<T>,
        target_type: TypeDescriptor,
        signature: impl Into<Arc<MethodSignature>>,
    ) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self {
            id: Uuid::new_v4(),
            target: Arc::new(target),
            target_type,
            signature: signature.into(),
            args: Vec::new(),
        }
    }

    /// Append a runtime argument
    pub fn with_arg<A: Send + Sync + 'static>(mut self, arg: A) -> Self {
        self.args.push(Arc::new(arg));
        self
    }

    /// Unique id of this invocation
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Runtime type of the target instance
    pub fn target_type(&self) -> &TypeDescriptor {
        &self.target_type
    }

    /// Borrow the target as `T`, if that is its runtime type
    pub fn target<T: 'static>(&self) -> Option<&T> {
        self.shared_target::<T>().map(|target| &**target)
    }

    /// The target as the `Arc<T>` the join point was created with
    pub fn shared_target<T: ?Sized + 'static>(&self) -> Option<&Arc<T>> {
        self.target.downcast_ref::<Arc<T>>()
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    pub fn method_name(&self) -> &str {
        self.signature.name()
    }

    /// Borrow the argument at `index` as `A`
    pub fn arg<A: 'static>(&self, index: usize) -> Option<&A> {
        self.args.get(index)?.downcast_ref::<A>()
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// `<TargetSimpleName>.<method>`
    pub fn log_tag(&self) -> String {
        format!("{}.{}", self.target_type.simple_name(), self.signature.name())
    }
}

impl fmt::Debug for JoinPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinPoint")
            .field("id", &self.id)
            .field("target_type", &self.target_type)
            .field("signature", &self.signature)
            .field("args", &self.args.len())
            .finish()
    }
}

/// The deferred target call of a join point
pub struct Proceed<R: 'static> {
    run: Box<dyn FnOnce() -> ProceedFuture<R> + Send>,
}

impl<R: Send + 'static> Proceed<R> {
    /// Create a proceed handle from a function returning a boxed future
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> ProceedFuture<R> + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Create a proceed handle from any async closure
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<R, InvocationError>> + Send + 'static,
    {
        Self::new(move || Box::pin(f()))
    }

    /// Invoke the target method
    pub async fn run(self) -> Result<R, InvocationError> {
        (self.run)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OrderService {
        region: &'static str,
    }

    #[test]
    fn test_log_tag_is_simple_type_and_method() {
        let signature = MethodSignature::new::<()>("place");
        let point = JoinPoint::new(Arc::new(OrderService { region: "eu" }), signature);

        assert_eq!(point.log_tag(), "OrderService.place");
        assert_eq!(point.method_name(), "place");
        assert_eq!(point.target::<OrderService>().map(|s| s.region), Some("eu"));
        assert!(point.target::<String>().is_none());
    }

    trait Service: Send + Sync {
        fn region(&self) -> &'static str;
    }

    impl Service for OrderService {
        fn region(&self) -> &'static str {
            self.region
        }
    }

    #[test]
    fn test_trait_object_target_with_explicit_type() {
        let service: Arc<dyn Service> = Arc::new(OrderService { region: "apac" });
        let point = JoinPoint::with_target_type(
            Arc::clone(&service),
            TypeDescriptor::of::<OrderService>(),
            MethodSignature::new::<()>("place"),
        );

        assert_eq!(point.log_tag(), "OrderService.place");
        assert_eq!(
            point.shared_target::<dyn Service>().map(|s| s.region()),
            Some("apac")
        );
        assert!(point.target::<OrderService>().is_none());
    }

    #[test]
    fn test_shared_target_of_sized_target() {
        let target = Arc::new(OrderService { region: "eu" });
        let point = JoinPoint::new(Arc::clone(&target), MethodSignature::new::<()>("place"));

        let shared = point.shared_target::<OrderService>().unwrap();
        assert!(Arc::ptr_eq(shared, &target));
    }

    #[test]
    fn test_log_tag_of_tuple_target() {
        let point = JoinPoint::new(
            Arc::new((OrderService { region: "eu" }, 3u8)),
            MethodSignature::new::<()>("place"),
        );
        assert_eq!(point.log_tag(), "(OrderService, u8).place");
    }

    #[test]
    fn test_typed_arguments() {
        let point = JoinPoint::new(
            Arc::new(OrderService { region: "us" }),
            MethodSignature::new::<()>("place").param::<u32>().param::<String>(),
        )
        .with_arg(7u32)
        .with_arg("sku-1".to_string());

        assert_eq!(point.arg_count(), 2);
        assert_eq!(point.arg::<u32>(0), Some(&7));
        assert_eq!(point.arg::<String>(1).map(String::as_str), Some("sku-1"));
        assert!(point.arg::<String>(0).is_none());
        assert!(point.arg::<u32>(5).is_none());
    }

    #[test]
    fn test_each_join_point_has_its_own_id() {
        let target = Arc::new(OrderService { region: "eu" });
        let signature = Arc::new(MethodSignature::new::<()>("place"));
        let a = JoinPoint::new(Arc::clone(&target), Arc::clone(&signature));
        let b = JoinPoint::new(target, signature);
        assert_ne!(a.id(), b.id());
    }

    #[tokio::test]
    async fn test_proceed_runs_target() {
        let proceed = Proceed::from_fn(|| async { Ok::<_, InvocationError>(42) });
        assert_eq!(proceed.run().await.unwrap(), 42);
    }
}
