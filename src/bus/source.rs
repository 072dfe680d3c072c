//! # External event producers.
//!
//! [`EventSource`] is the contract a bus consumes when it attaches a producer
//! with [`EventBus::add_event_source`](crate::EventBus::add_event_source) or
//! relays from it with [`EventBus::relay`](crate::EventBus::relay).
//!
//! ## Rules
//! - `on`/`un` are required; the all-events hooks are optional and report
//!   [`EventError::Unsupported`] by default.
//! - The bus asks [`EventSource::accepts`] once per distinct local name before
//!   subscribing to it.
//! - [`EventSource::default_mode`] picks the mode relayed calls are dispatched
//!   with when the relay itself does not name one.
//!
//! Every [`EventBus`](crate::EventBus) is itself an event source, so buses can
//! be chained.

use crate::bus::EventName;
use crate::error::EventError;
use crate::listeners::Handler;
use crate::trigger::TriggerMode;

/// Producer of named events a bus can subscribe to.
pub trait EventSource: Send + Sync {
    /// Subscribes `handler` to `name`.
    fn on(&self, name: &EventName, handler: Handler) -> Result<(), EventError>;

    /// Unsubscribes `handler` from `name`; returns whether it was subscribed.
    fn un(&self, name: &EventName, handler: &Handler) -> bool;

    /// Subscribes `handler` to every event the source emits.
    ///
    /// The handler receives `[name, args-array, tags-array|null]`.
    fn add_all_events_listener(&self, _handler: Handler) -> Result<(), EventError> {
        Err(EventError::Unsupported {
            operation: "add_all_events_listener",
        })
    }

    fn remove_all_events_listener(&self, _handler: &Handler) -> bool {
        false
    }

    /// Whether the bus should subscribe to `name` on this source.
    fn accepts(&self, _name: &EventName) -> bool {
        true
    }

    /// Mode for calls relayed from this source.
    fn default_mode(&self) -> Option<TriggerMode> {
        None
    }
}
