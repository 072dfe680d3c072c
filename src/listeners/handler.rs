//! # Listener callbacks and owner identities.
//!
//! [`Handler`] is the shared callback type stored by events. Closures cannot be
//! compared, so a handler's identity is the identity of its allocation: keep a
//! clone of the handler you registered and pass it back to remove it.
//!
//! [`Context`] is the optional owner a listener is registered for. Like the
//! handler it compares by identity, which lets one handler be registered once
//! per owner and removed per owner.
//!
//! ## Example
//! ```rust
//! use observable::{Event, Handler, Value};
//!
//! let event = Event::new();
//! let double = Handler::new(|args: &[Value]| {
//!     Value::from(args[0].as_i64().unwrap_or(0) * 2)
//! });
//!
//! event.on(double.clone()).unwrap();
//! assert!(event.has_listener(Some(&double), None, None));
//! assert!(event.un(&double));
//! ```

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::Value;

use crate::error::EventError;
use crate::outcome::{IntoOutcome, Outcome};

type CallbackFn = dyn Fn(&[Value]) -> Result<Outcome, EventError> + Send + Sync;

/// Shared listener callback.
#[derive(Clone)]
pub struct Handler(Arc<CallbackFn>);

impl Handler {
    /// Wraps a synchronous closure.
    ///
    /// The closure may return anything implementing [`IntoOutcome`], including
    /// an [`Outcome::Pending`] when it hands work off.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&[Value]) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        Self(Arc::new(move |args: &[Value]| f(args).into_outcome()))
    }

    /// Wraps a closure producing a future; every call yields a pending outcome.
    pub fn from_future<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, EventError>> + Send + 'static,
    {
        Self(Arc::new(move |args: &[Value]| {
            Ok(Outcome::Pending(f(args.to_vec()).boxed()))
        }))
    }

    /// Invokes the callback.
    pub fn call(&self, args: &[Value]) -> Result<Outcome, EventError> {
        (self.0)(args)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Owner a listener is registered on behalf of.
#[derive(Clone)]
pub struct Context(Arc<dyn Any + Send + Sync>);

impl Context {
    pub fn new<T: Any + Send + Sync>(owner: T) -> Self {
        Self(Arc::new(owner))
    }

    /// Borrows the owner if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Context")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handler_identity_follows_allocation() {
        let a = Handler::new(|_: &[Value]| ());
        let b = Handler::new(|_: &[Value]| ());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_context_identity_and_downcast() {
        let owner = Context::new(String::from("widget"));
        let same = owner.clone();
        let other = Context::new(String::from("widget"));
        assert_eq!(owner, same);
        assert_ne!(owner, other);
        assert_eq!(owner.downcast_ref::<String>().map(String::as_str), Some("widget"));
        assert!(owner.downcast_ref::<u32>().is_none());
    }

    #[tokio::test]
    async fn test_future_handler_is_pending() {
        let h = Handler::from_future(|args: Vec<Value>| async move { Ok(json!(args.len())) });
        let out = h.call(&[json!(1), json!(2)]).unwrap();
        assert!(out.is_pending());
        assert_eq!(out.resolve().await.unwrap(), json!(2));
    }
}
