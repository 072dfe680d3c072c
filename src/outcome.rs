//! # Listener and dispatch results.
//!
//! A listener may answer right away or hand back work that completes later.
//! [`Outcome`] makes that explicit so the aggregation code can stay on the
//! synchronous path whenever every participant was synchronous.
//!
//! ```text
//! Outcome::Ready(value)   ── already computed
//! Outcome::Pending(fut)   ── resolves to Result<Value, EventError>
//! ```
//!
//! ## Example
//! ```rust
//! use observable::{Outcome, Value};
//!
//! let ready = Outcome::from(Value::from(1));
//! assert!(!ready.is_pending());
//! assert_eq!(ready.as_ready(), Some(&Value::from(1)));
//! ```

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::Value;

use crate::error::EventError;

/// A value that will be available later.
pub type Pending = BoxFuture<'static, Result<Value, EventError>>;

/// Result of a listener call or of a dispatch.
pub enum Outcome {
    /// The value is available now.
    Ready(Value),
    /// The value is still being produced.
    Pending(Pending),
}

impl Outcome {
    /// Wraps a future as a pending outcome.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = Result<Value, EventError>> + Send + 'static,
    {
        Outcome::Pending(fut.boxed())
    }

    /// `Ready(null)`.
    #[inline]
    pub fn null() -> Self {
        Outcome::Ready(Value::Null)
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    /// Borrows the value if it is available now.
    #[inline]
    pub fn as_ready(&self) -> Option<&Value> {
        match self {
            Outcome::Ready(v) => Some(v),
            Outcome::Pending(_) => None,
        }
    }

    /// Takes the value if it is available now.
    #[inline]
    pub fn into_ready(self) -> Option<Value> {
        match self {
            Outcome::Ready(v) => Some(v),
            Outcome::Pending(_) => None,
        }
    }

    /// Converts into a future, whatever the variant.
    pub fn into_pending(self) -> Pending {
        match self {
            Outcome::Ready(v) => futures::future::ready(Ok(v)).boxed(),
            Outcome::Pending(fut) => fut,
        }
    }

    /// Waits for the value.
    pub async fn resolve(self) -> Result<Value, EventError> {
        match self {
            Outcome::Ready(v) => Ok(v),
            Outcome::Pending(fut) => fut.await,
        }
    }
}

/// Turns the result of a dispatch into a single future, failures included.
pub(crate) fn settle(result: Result<Outcome, EventError>) -> Pending {
    match result {
        Ok(outcome) => outcome.into_pending(),
        Err(e) => futures::future::ready(Err(e)).boxed(),
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Ready(value)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(v) => f.debug_tuple("Ready").field(v).finish(),
            Outcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Conversion from a handler's return value into a listener result.
///
/// Implemented for the shapes handlers usually return: a [`Value`], a
/// `bool`, `()` (→ `null`), an [`Outcome`], and `Result`s of those.
pub trait IntoOutcome {
    fn into_outcome(self) -> Result<Outcome, EventError>;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Result<Outcome, EventError> {
        Ok(self)
    }
}

impl IntoOutcome for Value {
    fn into_outcome(self) -> Result<Outcome, EventError> {
        Ok(Outcome::Ready(self))
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Result<Outcome, EventError> {
        Ok(Outcome::Ready(Value::Bool(self)))
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Result<Outcome, EventError> {
        Ok(Outcome::null())
    }
}

impl<T: IntoOutcome> IntoOutcome for Result<T, EventError> {
    fn into_outcome(self) -> Result<Outcome, EventError> {
        self.and_then(IntoOutcome::into_outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_resolve_both_variants() {
        assert_eq!(Outcome::from(json!(1)).resolve().await.unwrap(), json!(1));
        let pending = Outcome::pending(async { Ok(json!("later")) });
        assert!(pending.is_pending());
        assert_eq!(pending.resolve().await.unwrap(), json!("later"));
    }

    #[test]
    fn test_result_conversion_keeps_error() {
        let failed: Result<Value, EventError> = Err(EventError::listener("nope"));
        assert!(failed.into_outcome().is_err());
        assert_eq!(().into_outcome().unwrap().into_ready(), Some(Value::Null));
    }
}
