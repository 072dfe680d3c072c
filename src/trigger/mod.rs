//! Trigger engine: the [`Event`] type and the dispatch machinery behind it.
//!
//! ## Contents
//! - [`Event`] registry owner, dispatch pass, suspend/queue, tag scope
//! - [`TriggerMode`] result aggregation policy of a dispatch
//! - [`schedule`] deferred listener calls on the current tokio runtime
//! - [`DispatchFilter`] per-event predicate consulted before each listener
//! - `TagScope` per-thread ambient tag sets shared by a bus and its events
//!
//! Results are reduced by `reduce`, which stays synchronous until a listener
//! hands back a pending value.

mod event;
mod mode;
mod reduce;
mod scheduler;
mod scope;

pub use event::{DispatchFilter, Event};
pub(crate) use scope::TagScope;
pub use mode::TriggerMode;
pub use scheduler::schedule;
