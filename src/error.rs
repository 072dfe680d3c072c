//! Error types used by events and event buses.
//!
//! This module defines:
//!
//! - [`EventError`]: every failure surfaced by the crate (listener failures,
//!   capacity violations, invalid names, runtime problems).
//! - [`ErrorReport`]: what an error listener receives when a failure is routed
//!   to it instead of being returned to the caller.
//!
//! ## Routing rules
//! - A listener failure is first offered to the event's own error listeners;
//!   if there are none it is returned from the dispatch call and the pass aborts.
//! - A bus wraps the whole named dispatch: failures escaping the event are
//!   offered to the bus error listeners and returned only if there are none.
//! - [`EventError::TooManyListeners`] is never routed; it is always returned.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::bus::EventName;

/// # Errors produced by events and buses.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum EventError {
    /// A listener reported a failure.
    #[error("listener failed: {message}")]
    Listener {
        /// The listener's error message.
        message: String,
    },

    /// The event refused a new listener because its ceiling was reached.
    #[error("max listeners ({limit}) reached; adding more listeners is a bug")]
    TooManyListeners {
        /// The configured ceiling.
        limit: usize,
    },

    /// An event name failed validation.
    #[error("invalid event name {name:?}: {reason}")]
    InvalidName {
        /// The rejected identifier.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// An async listener was scheduled while no tokio runtime was running.
    #[error("async listener scheduled outside of a tokio runtime")]
    NoRuntime,

    /// A scheduled async call panicked or was aborted.
    #[error("scheduled call did not complete: {message}")]
    Join {
        /// Details reported by the runtime.
        message: String,
    },

    /// A pending `promise()` lost its listener before any matching dispatch.
    #[error("event was reset before a matching dispatch arrived")]
    Closed,

    /// An event source does not provide an optional hook.
    #[error("event source does not support {operation}")]
    Unsupported {
        /// Name of the missing operation.
        operation: &'static str,
    },
}

impl EventError {
    /// Shorthand for [`EventError::Listener`], for use inside handlers.
    ///
    /// # Example
    /// ```
    /// use observable::EventError;
    ///
    /// let err = EventError::listener("boom");
    /// assert_eq!(err.to_string(), "listener failed: boom");
    /// ```
    pub fn listener(message: impl Into<String>) -> Self {
        EventError::Listener {
            message: message.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use observable::EventError;
    ///
    /// let err = EventError::TooManyListeners { limit: 2 };
    /// assert_eq!(err.as_label(), "too_many_listeners");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventError::Listener { .. } => "listener_failed",
            EventError::TooManyListeners { .. } => "too_many_listeners",
            EventError::InvalidName { .. } => "invalid_name",
            EventError::NoRuntime => "no_runtime",
            EventError::Join { .. } => "join_failed",
            EventError::Closed => "closed",
            EventError::Unsupported { .. } => "unsupported",
        }
    }

    /// Whether this error may be handed to error listeners instead of the caller.
    ///
    /// Capacity errors indicate a caller bug and are never routed.
    pub fn is_routable(&self) -> bool {
        !matches!(self, EventError::TooManyListeners { .. })
    }
}

/// Where a reported error was caught.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// Caught around a single listener invocation.
    Listener,
    /// Caught around a whole named dispatch on a bus.
    Dispatch,
}

/// Error delivered to error listeners.
///
/// - `origin`: where the error was caught
/// - `event`: the event name (bus-level reports only)
/// - `error`: the failure itself
/// - `args`: arguments of the dispatch that failed
#[derive(Debug)]
pub struct ErrorReport<'a> {
    pub origin: ErrorOrigin,
    pub event: Option<&'a EventName>,
    pub error: &'a EventError,
    pub args: &'a [Value],
}

type ErrorFn = dyn Fn(&ErrorReport<'_>) + Send + Sync;

/// Shared error listener.
///
/// Identity is the identity of the wrapped closure: clones of one handler are
/// equal, two handlers built from identical closures are not.
#[derive(Clone)]
pub struct ErrorHandler(Arc<ErrorFn>);

impl ErrorHandler {
    /// Wraps a closure as an error listener.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&ErrorReport<'_>) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, report: &ErrorReport<'_>) {
        (self.0)(report)
    }
}

impl PartialEq for ErrorHandler {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl Eq for ErrorHandler {}

impl fmt::Debug for ErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorHandler")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
