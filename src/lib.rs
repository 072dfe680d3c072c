//! # observable
//!
//! **Observable** is an in-process event library: listener registries with
//! ordering, call limits and tags, dispatch with result aggregation, and a
//! named event bus that can intercept, scope and relay dispatches.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   RelayOptions / EventSource            user code
//!            │ proxy handlers                  │ on / trigger / pipe / ...
//!            ▼                                 ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  EventBus (named multiplexer)                                     │
//! │  - interceptor (veto)                                             │
//! │  - tag scope (shared with owned events)                           │
//! │  - wildcard observer "*"  ◄── [name, args, tags] after dispatch   │
//! │  - error listeners (origin = Dispatch)                            │
//! │  - proxy cache (relays, attached sources)                         │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   ┌──────────┐       ┌──────────┐       ┌──────────┐
//!   │  Event   │       │  Event   │       │  Event   │
//!   │ "saved"  │       │ "loaded" │       │  ...     │
//!   └────┬─────┘       └──────────┘       └──────────┘
//!        ▼
//!   ListenerRegistry ──► snapshot ──► listeners (inline or scheduled)
//!                                        └─► Outcome::Ready | Outcome::Pending
//!                                              └─► reduce(TriggerMode)
//! ```
//!
//! ### Dispatch pass
//! ```text
//! event.dispatch(mode, args)
//!   ├─► queued / suspended / over limit ─► dropped (queued ones replay on resume)
//!   └─► for listener in snapshot:
//!         ├─► filter, tags, start threshold
//!         ├─► call (async listeners go through the scheduler)
//!         │     ├─ Err ─► error listeners, or abort the pass
//!         │     └─ limit reached ─► listener removed
//!         └─► First / UntilTrue / UntilFalse / FirstNonEmpty may stop early
//!       result = reduce(mode, outcomes)   (pending if anything was pending)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                         |
//! |-------------------|---------------------------------------------------------------|--------------------------------------------|
//! | **Events**        | Single fan-out point with aggregation modes.                  | [`Event`], [`TriggerMode`], [`Outcome`]    |
//! | **Listeners**     | Callbacks with ordering, limits, tags and owner contexts.     | [`Handler`], [`ListenerOptions`]           |
//! | **Bus**           | Named events, interception, wildcard observer, tag scopes.    | [`EventBus`], [`EventName`]                |
//! | **Relays**        | Forward events between buses or from external producers.      | [`RelayOptions`], [`EventSource`]          |
//! | **Errors**        | Typed errors and error listeners.                             | [`EventError`], [`ErrorHandler`]           |
//! | **Configuration** | Per-event and per-bus settings.                               | [`EventConfig`], [`BusConfig`]             |
//!
//! ## Example
//! ```rust
//! use observable::{EventBus, Handler, ListenerOptions, Value};
//! use serde_json::json;
//!
//! fn main() -> Result<(), observable::EventError> {
//!     let bus = EventBus::new();
//!
//!     bus.on("price", Handler::new(|args: &[Value]| json!(args[0].as_f64().unwrap_or(0.0) * 1.2)))?;
//!     bus.add_listener(
//!         "price",
//!         Handler::new(|args: &[Value]| json!(args[0].as_f64().unwrap_or(0.0).round())),
//!         ListenerOptions::default().always_last(),
//!     )?;
//!
//!     let total = bus.pipe("price", vec![json!(10.0)])?;
//!     assert_eq!(total.into_ready(), Some(json!(12.0)));
//!     Ok(())
//! }
//! ```
mod bus;
mod config;
mod error;
mod listeners;
mod outcome;
mod trigger;

// ---- Public re-exports ----

pub use bus::{EventBus, EventName, EventSource, Interceptor, IntoEventName, RelayOptions};
pub use config::{BusConfig, EventConfig, DEFAULT_MAX_LISTENERS};
pub use error::{ErrorHandler, ErrorOrigin, ErrorReport, EventError};
pub use listeners::{
    compare_listeners, tags_intersect, Context, Handler, Listener, ListenerOptions, ListenerRegistry, Placement,
};
pub use outcome::{IntoOutcome, Outcome, Pending};
pub use trigger::{schedule, DispatchFilter, Event, TriggerMode};

pub use serde_json::Value;
