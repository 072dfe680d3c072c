//! Listener bookkeeping: callbacks, options, ordering, tags and the registry.
//!
//! ## Contents
//! - [`Handler`], [`Context`] callback and owner identities
//! - [`ListenerOptions`], [`Listener`] registration options and records
//! - [`compare_listeners`] ordering policy (pinned groups, then index)
//! - [`tags_intersect`] tag-scope predicate
//! - [`ListenerRegistry`] ordered, de-duplicated listener list of one event

mod handler;
mod listener;
mod ordering;
mod registry;
mod tags;

pub use handler::{Context, Handler};
pub use listener::{Listener, ListenerOptions, Placement};
pub use ordering::compare_listeners;
pub use registry::ListenerRegistry;
pub use tags::tags_intersect;
