//! # Event and bus configuration.
//!
//! [`EventConfig`] holds the per-event knobs; [`BusConfig`] carries the
//! defaults a bus applies to the events it creates, plus per-name overrides.
//!
//! ## Sentinel values
//! - `limit = 0` → unlimited dispatches
//! - `async_delay = None` → listeners run synchronously unless they ask otherwise
//! - `max_listeners` is clamped to a minimum of 1

use std::collections::HashMap;
use std::time::Duration;

use crate::bus::EventName;

/// Default listener ceiling for a single event.
pub const DEFAULT_MAX_LISTENERS: usize = 1000;

/// Configuration of a single event.
///
/// ## Field semantics
/// - `max_listeners`: hard ceiling on registered listeners; adding past it fails
/// - `limit`: number of dispatches the event accepts before ignoring further calls (`0` = unlimited)
/// - `async_delay`: default deferral for every listener without its own setting
/// - `auto_trigger`: replay the most recent arguments to listeners added later
///
/// ## Notes
/// All fields are public. Prefer the accessors over sprinkling sentinel checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventConfig {
    /// Maximum number of listeners the event accepts.
    pub max_listeners: usize,

    /// Maximum number of dispatches (`0` = unlimited).
    ///
    /// Once reached, further dispatches are dropped silently.
    pub limit: u64,

    /// Event-wide async mode.
    ///
    /// - `None` = synchronous listeners
    /// - `Some(d)` = listeners are deferred by `d` (zero yields to the scheduler once)
    pub async_delay: Option<Duration>,

    /// Replay the last dispatched arguments to newly added listeners.
    pub auto_trigger: bool,
}

impl EventConfig {
    /// Returns the dispatch limit as an `Option`.
    ///
    /// - `None` → unlimited
    /// - `Some(n)` → at most `n` dispatches
    #[inline]
    pub fn dispatch_limit(&self) -> Option<u64> {
        if self.limit == 0 {
            None
        } else {
            Some(self.limit)
        }
    }

    /// Returns the listener ceiling clamped to a minimum of 1.
    #[inline]
    pub fn listener_ceiling(&self) -> usize {
        self.max_listeners.max(1)
    }

    /// Returns a config with updated async mode.
    pub fn with_async(mut self, delay: Duration) -> Self {
        self.async_delay = Some(delay);
        self
    }

    /// Returns a config with an updated dispatch limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Returns a config with auto-trigger enabled.
    pub fn with_auto_trigger(mut self) -> Self {
        self.auto_trigger = true;
        self
    }

    /// Returns a config with an updated listener ceiling.
    pub fn with_max_listeners(mut self, max: usize) -> Self {
        self.max_listeners = max;
        self
    }
}

impl Default for EventConfig {
    /// Default configuration:
    ///
    /// - `max_listeners = 1000`
    /// - `limit = 0` (unlimited)
    /// - `async_delay = None` (synchronous)
    /// - `auto_trigger = false`
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
            limit: 0,
            async_delay: None,
            auto_trigger: false,
        }
    }
}

/// Configuration of an event bus.
///
/// Events are created lazily; each one gets `events[name]` when present and
/// `defaults` otherwise. An explicit config passed to
/// [`EventBus::add`](crate::EventBus::add) wins over both.
#[derive(Clone, Debug, Default)]
pub struct BusConfig {
    /// Config for events without an explicit entry.
    pub defaults: EventConfig,
    /// Per-event overrides.
    pub events: HashMap<EventName, EventConfig>,
}

impl BusConfig {
    /// Returns the configuration a newly created event named `name` receives.
    pub fn config_for(&self, name: &EventName) -> EventConfig {
        self.events
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.defaults.clone())
    }

    /// Adds a per-event override.
    pub fn with_event(mut self, name: EventName, config: EventConfig) -> Self {
        self.events.insert(name, config);
        self
    }
}
