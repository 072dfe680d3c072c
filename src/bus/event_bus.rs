//! # EventBus: named multiplexer over many events.
//!
//! [`EventBus`] maps [`EventName`]s to lazily created [`Event`]s and adds the
//! bus-wide concerns around them: interception, an ambient tag scope, a
//! wildcard observer, error reporting, external sources and relays.
//!
//! ## Dispatch path
//! ```text
//! bus.dispatch(name, mode, args)
//!   ├─► name == "*"            ──► no-op
//!   ├─► interceptor(name, args, tags, mode) == false ──► no-op
//!   ├─► get(name), else create it (auto-trigger names) or use a transient event
//!   ├─► event.dispatch(mode, args)     (bus tag scope applies)
//!   ├─► wildcard observer.trigger([name, args, tags|null])
//!   └─► error? ──► bus error listeners (origin = Dispatch)
//!                    └─ none registered ──► returned to the caller
//! ```
//!
//! ## Sources
//! ```text
//! add_event_source(src)
//! bus.on(name, h) ──► src.accepts(name)? ──► src.on(name, proxy(name))   (once per name)
//! remove_event_source(src) ──► src.un(name, proxy) for every subscribed name
//! ```
//!
//! ## Rules
//! - Listening on `"*"` registers a wildcard observer; dispatching `"*"` does nothing.
//! - The interceptor vetoes the dispatch and the wildcard notification together.
//! - `with_tags` scopes this bus and every event it owns, including dispatches
//!   issued directly on an [`Event`] obtained from [`EventBus::get`]. The
//!   scope belongs to the calling thread.
//! - Dispatching an unknown name only creates the event when its config asks
//!   for auto-trigger; vetoed dispatches never create one.
//! - No bus lock is held while user code (listeners, interceptor, sources) runs.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, trace, warn};

use super::name::{EventName, IntoEventName};
use super::relay::{self, ProxyKey, RelayOptions};
use super::source::EventSource;
use crate::config::{BusConfig, EventConfig};
use crate::error::{ErrorHandler, ErrorOrigin, ErrorReport, EventError};
use crate::listeners::{Context, Handler, ListenerOptions};
use crate::outcome::{settle, Outcome, Pending};
use crate::trigger::{Event, TagScope, TriggerMode};

/// Veto consulted before every named dispatch: `(name, args, tags, mode)`.
pub type Interceptor = Arc<dyn Fn(&EventName, &[Value], Option<&[String]>, TriggerMode) -> bool + Send + Sync>;

struct AttachedSource {
    source: Arc<dyn EventSource>,
    /// Names the source was asked about; `None` when it declined.
    subscribed: HashMap<EventName, Option<Handler>>,
}

pub(crate) struct BusInner {
    config: BusConfig,
    events: Mutex<HashMap<EventName, Event>>,
    interceptor: Mutex<Option<Interceptor>>,
    scope: TagScope,
    all_events: Event,
    error_listeners: Mutex<Vec<ErrorHandler>>,
    proxies: Mutex<HashMap<ProxyKey, Handler>>,
    sources: Mutex<Vec<AttachedSource>>,
}

/// Named event multiplexer. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            inner: Arc::new(BusInner {
                config,
                events: Mutex::new(HashMap::new()),
                interceptor: Mutex::new(None),
                scope: TagScope::new(),
                all_events: Event::named(EventName::wildcard(), EventConfig::default(), TagScope::new()),
                error_listeners: Mutex::new(Vec::new()),
                proxies: Mutex::new(HashMap::new()),
                sources: Mutex::new(Vec::new()),
            }),
        }
    }

    pub(crate) fn upgrade(weak: &Weak<BusInner>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    // ---------------------------
    // Events
    // ---------------------------

    /// Returns the event named `name`, creating it if needed.
    ///
    /// A `config` given here wins over the bus config, also for an existing event.
    pub fn add(&self, name: impl IntoEventName, config: Option<EventConfig>) -> Result<Event, EventError> {
        let name = name.into_event_name()?;
        if name.is_wildcard() {
            if let Some(config) = config {
                self.inner.all_events.set_options(config);
            }
            return Ok(self.inner.all_events.clone());
        }

        let mut events = self.inner.events.lock();
        if let Some(event) = events.get(&name) {
            if let Some(config) = config {
                event.set_options(config);
            }
            return Ok(event.clone());
        }
        let config = config.unwrap_or_else(|| self.inner.config.config_for(&name));
        let event = Event::named(name.clone(), config, self.inner.scope);
        events.insert(name.clone(), event.clone());
        debug!(event = %name, "event created");
        Ok(event)
    }

    /// Returns the event named `name` without creating it.
    pub fn get(&self, name: impl IntoEventName) -> Option<Event> {
        let name = name.into_event_name().ok()?;
        if name.is_wildcard() {
            return Some(self.inner.all_events.clone());
        }
        self.inner.events.lock().get(&name).cloned()
    }

    /// Returns the event named `name`, creating it with the bus config if needed.
    pub fn get_or_add(&self, name: impl IntoEventName) -> Result<Event, EventError> {
        self.add(name, None)
    }

    /// Names of the events created so far, sorted.
    pub fn event_names(&self) -> Vec<EventName> {
        let mut names: Vec<_> = self.inner.events.lock().keys().cloned().collect();
        names.sort();
        names
    }

    // ---------------------------
    // Listeners
    // ---------------------------

    /// Registers `handler` on `name`, then subscribes attached sources to it.
    pub fn add_listener(
        &self,
        name: impl IntoEventName,
        handler: Handler,
        options: ListenerOptions,
    ) -> Result<(), EventError> {
        let name = name.into_event_name()?;
        self.get_or_add(&name)?.add_listener(handler, options)?;
        if !name.is_wildcard() {
            self.subscribe_sources(&name)?;
        }
        Ok(())
    }

    pub fn on(&self, name: impl IntoEventName, handler: Handler) -> Result<(), EventError> {
        self.add_listener(name, handler, ListenerOptions::default())
    }

    pub fn once(&self, name: impl IntoEventName, handler: Handler) -> Result<(), EventError> {
        self.add_listener(name, handler, ListenerOptions::default().once())
    }

    pub fn remove_listener(
        &self,
        name: impl IntoEventName,
        handler: &Handler,
        context: Option<&Context>,
        tag: Option<&str>,
    ) -> bool {
        self.get(name)
            .is_some_and(|event| event.remove_listener(handler, context, tag))
    }

    pub fn un(&self, name: impl IntoEventName, handler: &Handler) -> bool {
        self.remove_listener(name, handler, None, None)
    }

    pub fn has_listener(
        &self,
        name: impl IntoEventName,
        handler: Option<&Handler>,
        context: Option<&Context>,
        tag: Option<&str>,
    ) -> bool {
        self.get(name)
            .is_some_and(|event| event.has_listener(handler, context, tag))
    }

    pub fn remove_all_listeners(&self, name: impl IntoEventName, tag: Option<&str>) {
        if let Some(event) = self.get(name) {
            event.remove_all_listeners(tag);
        }
    }

    /// Registers a wildcard observer; it receives `[name, args, tags|null]`
    /// after every dispatch that was not intercepted.
    pub fn add_all_events_listener(&self, handler: Handler, options: ListenerOptions) -> Result<(), EventError> {
        self.inner.all_events.add_listener(handler, options)
    }

    pub fn remove_all_events_listener(&self, handler: &Handler, context: Option<&Context>, tag: Option<&str>) -> bool {
        self.inner.all_events.remove_listener(handler, context, tag)
    }

    // ---------------------------
    // Error listeners
    // ---------------------------

    pub fn add_error_listener(&self, handler: ErrorHandler) {
        let mut listeners = self.inner.error_listeners.lock();
        if !listeners.contains(&handler) {
            listeners.push(handler);
        }
    }

    pub fn remove_error_listener(&self, handler: &ErrorHandler) -> bool {
        let mut listeners = self.inner.error_listeners.lock();
        let before = listeners.len();
        listeners.retain(|h| h != handler);
        before != listeners.len()
    }

    pub fn has_error_listeners(&self) -> bool {
        !self.inner.error_listeners.lock().is_empty()
    }

    fn report(&self, name: &EventName, error: EventError, args: &[Value]) -> Result<(), EventError> {
        let listeners = self.inner.error_listeners.lock().clone();
        if listeners.is_empty() || !error.is_routable() {
            warn!(event = %name, error = %error, label = error.as_label(), "dispatch failed");
            return Err(error);
        }
        let report = ErrorReport {
            origin: ErrorOrigin::Dispatch,
            event: Some(name),
            error: &error,
            args,
        };
        for listener in &listeners {
            listener.call(&report);
        }
        Ok(())
    }

    // ---------------------------
    // Dispatch
    // ---------------------------

    /// Shared dispatch path; `skipped` supplies the result of a no-op dispatch.
    ///
    /// `explicit` tags, when given, are what the interceptor and the wildcard
    /// observers see; otherwise they see the ambient scope.
    fn run<T>(
        &self,
        name: impl IntoEventName,
        mode: TriggerMode,
        args: Vec<Value>,
        explicit: Option<Vec<String>>,
        skipped: fn() -> T,
        call: impl FnOnce(&Event, Vec<Value>, Option<&[String]>) -> Result<T, EventError>,
    ) -> Result<T, EventError> {
        let name = name.into_event_name()?;
        if name.is_wildcard() {
            trace!("dispatch on wildcard ignored");
            return Ok(skipped());
        }
        let tags = explicit.clone().or_else(|| self.inner.scope.current());

        let interceptor = self.inner.interceptor.lock().clone();
        if let Some(intercept) = interceptor {
            if !intercept(&name, &args, tags.as_deref(), mode) {
                debug!(event = %name, mode = mode.as_label(), "dispatch intercepted");
                return Ok(skipped());
            }
        }

        let event = self.target(&name)?;
        call(&event, args.clone(), explicit.as_deref())
            .and_then(|result| {
                let tags = tags.map_or(Value::Null, |t| Value::Array(t.into_iter().map(Value::String).collect()));
                let notice = vec![Value::String(name.to_string()), Value::Array(args.clone()), tags];
                self.inner.all_events.trigger(notice).map(|()| result)
            })
            .or_else(|error| {
                self.report(&name, error, &args)?;
                Ok(skipped())
            })
    }

    /// Existing event for `name`; unknown names get a new event only when
    /// their config auto-triggers, since only those keep state worth storing.
    fn target(&self, name: &EventName) -> Result<Event, EventError> {
        if let Some(event) = self.get(name) {
            return Ok(event);
        }
        let config = self.inner.config.config_for(name);
        if config.auto_trigger {
            return self.get_or_add(name);
        }
        trace!(event = %name, "dispatch on unknown event");
        Ok(Event::named(name.clone(), config, self.inner.scope))
    }

    pub fn trigger(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<(), EventError> {
        self.dispatch(name, TriggerMode::Default, args).map(drop)
    }

    pub fn emit(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<(), EventError> {
        self.trigger(name, args)
    }

    pub fn dispatch(&self, name: impl IntoEventName, mode: TriggerMode, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.run(name, mode, args, None, Outcome::null, |event, args, tags| {
            event.dispatch_scoped(mode, args, tags)
        })
    }

    /// Dispatches under `mode`, reaching only listeners sharing one of `tags`.
    pub fn dispatch_with_tags<I, T>(
        &self,
        name: impl IntoEventName,
        mode: TriggerMode,
        args: Vec<Value>,
        tags: I,
    ) -> Result<Outcome, EventError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into).collect();
        self.run(name, mode, args, Some(tags), Outcome::null, |event, args, tags| {
            event.dispatch_scoped(mode, args, tags)
        })
    }

    pub fn all(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::All, args)
    }

    pub fn concat(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::Concat, args)
    }

    pub fn merge(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::Merge, args)
    }

    pub fn last(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::Last, args)
    }

    pub fn first(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::First, args)
    }

    pub fn pipe(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::Pipe, args)
    }

    pub fn until_true(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::UntilTrue, args)
    }

    pub fn until_false(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::UntilFalse, args)
    }

    pub fn first_non_empty(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(name, TriggerMode::FirstNonEmpty, args)
    }

    /// Per-listener results, pending ones left pending.
    pub fn raw(&self, name: impl IntoEventName, args: Vec<Value>) -> Result<Vec<Outcome>, EventError> {
        self.run(name, TriggerMode::Raw, args, None, Vec::new, |event, args, tags| {
            event.raw_scoped(args, tags)
        })
    }

    pub fn resolve_dispatch(&self, name: impl IntoEventName, mode: TriggerMode, args: Vec<Value>) -> Pending {
        settle(self.dispatch(name, mode, args))
    }

    /// Dispatches and waits for every pending listener result; yields `null`.
    pub fn resolve(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        settle(self.all(name, args).map(|all| {
            Outcome::pending(async move {
                all.resolve().await?;
                Ok(Value::Null)
            })
        }))
    }

    pub fn resolve_all(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::All, args)
    }

    pub fn resolve_concat(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::Concat, args)
    }

    pub fn resolve_merge(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::Merge, args)
    }

    pub fn resolve_last(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::Last, args)
    }

    pub fn resolve_first(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::First, args)
    }

    pub fn resolve_pipe(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::Pipe, args)
    }

    pub fn resolve_until_true(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::UntilTrue, args)
    }

    pub fn resolve_until_false(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::UntilFalse, args)
    }

    pub fn resolve_first_non_empty(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::FirstNonEmpty, args)
    }

    pub fn resolve_raw(&self, name: impl IntoEventName, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(name, TriggerMode::Raw, args)
    }

    // ---------------------------
    // Control
    // ---------------------------

    /// Installs the interceptor, replacing any previous one.
    pub fn intercept<F>(&self, interceptor: F)
    where
        F: Fn(&EventName, &[Value], Option<&[String]>, TriggerMode) -> bool + Send + Sync + 'static,
    {
        *self.inner.interceptor.lock() = Some(Arc::new(interceptor));
    }

    pub fn stop_intercepting(&self) {
        *self.inner.interceptor.lock() = None;
    }

    pub fn is_intercepting(&self) -> bool {
        self.inner.interceptor.lock().is_some()
    }

    /// Suspends every event created so far.
    pub fn suspend_all(&self, with_queue: bool) {
        for event in self.events() {
            event.suspend(with_queue);
        }
    }

    /// Resumes every event; the first replay failure is returned.
    pub fn resume_all(&self) -> Result<(), EventError> {
        let mut first_error = None;
        for event in self.events() {
            if let Err(e) = event.resume() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Runs `f` with an ambient tag scope over this bus and its events.
    ///
    /// Only dispatches issued by the calling thread while `f` runs are scoped.
    pub fn with_tags<I, T, F, R>(&self, tags: I, f: F) -> R
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: FnOnce() -> R,
    {
        let _restore = self.inner.scope.enter(tags);
        f()
    }

    /// Detaches sources, drops the interceptor, the calling thread's tag
    /// scope, wildcard observers, every event and the proxy cache.
    pub fn reset(&self) {
        let sources = std::mem::take(&mut *self.inner.sources.lock());
        for attached in sources {
            detach_source(attached);
        }
        *self.inner.interceptor.lock() = None;
        self.inner.scope.clear();
        self.inner.all_events.remove_all_listeners(None);
        self.inner.events.lock().clear();
        self.inner.proxies.lock().clear();
        debug!("bus reset");
    }

    /// Suspends the event named `name`, creating it if needed.
    pub fn suspend(&self, name: impl IntoEventName, with_queue: bool) -> Result<(), EventError> {
        self.get_or_add(name)?.suspend(with_queue);
        Ok(())
    }

    /// Resumes the event named `name`, replaying its queue; unknown names are a no-op.
    pub fn resume(&self, name: impl IntoEventName) -> Result<(), EventError> {
        self.get(name).map_or(Ok(()), |event| event.resume())
    }

    pub fn is_suspended(&self, name: impl IntoEventName) -> bool {
        self.get(name).is_some_and(|event| event.is_suspended())
    }

    pub fn is_queued(&self, name: impl IntoEventName) -> bool {
        self.get(name).is_some_and(|event| event.is_queued())
    }

    /// Resolves with the arguments of the next dispatch of `name`.
    pub fn promise(
        &self,
        name: impl IntoEventName,
        options: ListenerOptions,
    ) -> Result<impl Future<Output = Result<Vec<Value>, EventError>> + Send + 'static, EventError> {
        self.get_or_add(name)?.promise(options)
    }

    /// Replaces the config of `name`, creating the event if needed.
    pub fn set_options(&self, name: impl IntoEventName, config: EventConfig) -> Result<(), EventError> {
        self.add(name, Some(config)).map(drop)
    }

    pub fn options(&self, name: impl IntoEventName) -> Option<EventConfig> {
        self.get(name).map(|event| event.options())
    }

    pub fn dispatch_count(&self, name: impl IntoEventName) -> u64 {
        self.get(name).map_or(0, |event| event.dispatch_count())
    }

    /// Resets the event named `name`; returns whether it existed.
    pub fn reset_event(&self, name: impl IntoEventName) -> bool {
        let Some(event) = self.get(name) else {
            return false;
        };
        event.reset();
        true
    }

    fn events(&self) -> Vec<Event> {
        self.inner.events.lock().values().cloned().collect()
    }

    // ---------------------------
    // Sources and relays
    // ---------------------------

    /// Attaches an external producer and subscribes it to the names known so far.
    pub fn add_event_source(&self, source: Arc<dyn EventSource>) -> Result<(), EventError> {
        {
            let mut sources = self.inner.sources.lock();
            if sources.iter().any(|s| Arc::ptr_eq(&s.source, &source)) {
                return Ok(());
            }
            sources.push(AttachedSource {
                source,
                subscribed: HashMap::new(),
            });
        }
        debug!("event source attached");
        for name in self.event_names() {
            self.subscribe_sources(&name)?;
        }
        Ok(())
    }

    /// Detaches `source`, unsubscribing every name it was subscribed to.
    pub fn remove_event_source(&self, source: &Arc<dyn EventSource>) -> bool {
        let attached = {
            let mut sources = self.inner.sources.lock();
            let Some(pos) = sources.iter().position(|s| Arc::ptr_eq(&s.source, source)) else {
                return false;
            };
            sources.remove(pos)
        };
        detach_source(attached);
        debug!("event source detached");
        true
    }

    /// Subscribes every attached source not yet asked about `name`.
    fn subscribe_sources(&self, name: &EventName) -> Result<(), EventError> {
        let candidates: Vec<Arc<dyn EventSource>> = {
            let mut sources = self.inner.sources.lock();
            sources
                .iter_mut()
                .filter(|s| !s.subscribed.contains_key(name))
                .map(|s| {
                    s.subscribed.insert(name.clone(), None);
                    Arc::clone(&s.source)
                })
                .collect()
        };

        for source in candidates {
            if !source.accepts(name) {
                trace!(event = %name, "event source declined");
                continue;
            }
            let proxy = self.proxy_for(ProxyKey::inbound(name.clone(), source.default_mode()));
            let subscribed = source.on(name, proxy.clone());
            let mut sources = self.inner.sources.lock();
            if let Some(attached) = sources.iter_mut().find(|s| Arc::ptr_eq(&s.source, &source)) {
                match subscribed {
                    Ok(()) => {
                        attached.subscribed.insert(name.clone(), Some(proxy));
                    }
                    Err(_) => {
                        attached.subscribed.remove(name);
                    }
                }
            }
            subscribed?;
        }
        Ok(())
    }

    fn proxy_for(&self, key: ProxyKey) -> Handler {
        let mut proxies = self.inner.proxies.lock();
        proxies
            .entry(key.clone())
            .or_insert_with(|| relay::proxy(Arc::downgrade(&self.inner), key))
            .clone()
    }

    /// Forwards calls of `options.remote_name` on `options.source` into this bus.
    pub fn relay(&self, options: &RelayOptions) -> Result<(), EventError> {
        let key = options.key()?;
        let remote = key.remote.clone();
        let proxy = self.proxy_for(key);
        if remote.is_wildcard() {
            options.source.add_all_events_listener(proxy)?;
        } else {
            options.source.on(&remote, proxy)?;
        }
        debug!(remote = %remote, "relay attached");
        Ok(())
    }

    /// Detaches a relay created with equal options.
    pub fn unrelay(&self, options: &RelayOptions) -> bool {
        let Ok(key) = options.key() else {
            return false;
        };
        let Some(proxy) = self.inner.proxies.lock().get(&key).cloned() else {
            return false;
        };
        let removed = if key.remote.is_wildcard() {
            options.source.remove_all_events_listener(&proxy)
        } else {
            options.source.un(&key.remote, &proxy)
        };
        debug!(remote = %key.remote, removed, "relay detached");
        removed
    }
}

fn detach_source(attached: AttachedSource) {
    for (name, proxy) in attached.subscribed {
        if let Some(proxy) = proxy {
            attached.source.un(&name, &proxy);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.inner.events.lock().len())
            .field("intercepting", &self.is_intercepting())
            .field("sources", &self.inner.sources.lock().len())
            .field("tags", &self.inner.scope.current())
            .finish()
    }
}

impl EventSource for EventBus {
    fn on(&self, name: &EventName, handler: Handler) -> Result<(), EventError> {
        EventBus::on(self, name, handler)
    }

    fn un(&self, name: &EventName, handler: &Handler) -> bool {
        EventBus::un(self, name, handler)
    }

    fn add_all_events_listener(&self, handler: Handler) -> Result<(), EventError> {
        EventBus::add_all_events_listener(self, handler, ListenerOptions::default())
    }

    fn remove_all_events_listener(&self, handler: &Handler) -> bool {
        EventBus::remove_all_events_listener(self, handler, None, None)
    }
}
