//! Event bus: named events, interception, sources and relays.
//!
//! ## Contents
//! - [`EventBus`] name → [`Event`](crate::Event) multiplexer
//! - [`EventName`], [`IntoEventName`] validated identifiers (`"*"` is the wildcard)
//! - [`EventSource`] contract for external producers (every bus is one)
//! - [`RelayOptions`] standing forwarding from a source into a bus
//! - [`Interceptor`] veto consulted before each named dispatch

mod event_bus;
mod name;
mod relay;
mod source;

pub use event_bus::{EventBus, Interceptor};
pub use name::{EventName, IntoEventName};
pub use relay::RelayOptions;
pub use source::EventSource;
