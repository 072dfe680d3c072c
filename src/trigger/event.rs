//! # Event: one fan-out point and its dispatch algorithm.
//!
//! [`Event`] owns a [`ListenerRegistry`] plus the dispatch state around it
//! (suspend/queue flags, dispatch counter, auto-trigger snapshot, tag scope).
//! It is a cheap handle: clones share the same event.
//!
//! ## Dispatch pass
//! ```text
//! dispatch(mode, args)
//!   ├─► queued?     ──► push (args, mode, tags) to the queue, return
//!   ├─► suspended?  ──► drop
//!   ├─► limit hit?  ──► drop
//!   ├─► count += 1, snapshot args (auto-trigger)
//!   └─► for listener in snapshot(registry):
//!          filter ─► tags ─► start ─► [consequent: feed previous result]
//!          └─► invoke (inline, or via scheduler if async)
//!                ├─ limit reached ─► remove listener
//!                ├─ First         ─► return now
//!                └─ Until*/FirstNonEmpty sentinel ─► return now
//!       reduce(mode, results)   (pending if any result is pending)
//! ```
//!
//! ## Rules
//! - Listeners added during a pass do not take part in it.
//! - The state lock is never held while a listener runs, so listeners may
//!   add/remove listeners or dispatch the same event re-entrantly.
//! - Suspension without queueing drops dispatches; with queueing they are
//!   replayed in arrival order by [`Event::resume`].
//! - A listener failure goes to the error listeners; without any it is returned
//!   and the rest of the pass is skipped. Failures of async or pending results
//!   follow the same routing.
//!
//! ## Example
//! ```rust
//! use observable::{Event, Handler, Value};
//! use serde_json::json;
//!
//! let event = Event::new();
//! event.on(Handler::new(|args: &[Value]| json!(args[0].as_i64().unwrap_or(0) + 1))).unwrap();
//! event.on(Handler::new(|args: &[Value]| json!(args[0].as_i64().unwrap_or(0) * 10))).unwrap();
//!
//! let piped = event.pipe(vec![json!(1)]).unwrap();
//! assert_eq!(piped.into_ready(), Some(json!(20)));
//!
//! let all = event.all(vec![json!(1)]).unwrap();
//! assert_eq!(all.into_ready(), Some(json!([2, 10])));
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, trace, warn};

use super::mode::TriggerMode;
use super::reduce::reduce;
use super::scheduler::{self, detach};
use super::scope::TagScope;
use crate::bus::EventName;
use crate::config::EventConfig;
use crate::error::{ErrorHandler, ErrorOrigin, ErrorReport, EventError};
use crate::listeners::{tags_intersect, Context, Handler, Listener, ListenerOptions, ListenerRegistry};
use crate::outcome::{settle, Outcome, Pending};

/// Global dispatch filter: return `false` to skip a listener for this call.
pub type DispatchFilter = Arc<dyn Fn(&[Value], &Listener) -> bool + Send + Sync>;

/// A deferred `(args, mode)` pair recorded while the event is queued.
struct QueuedCall {
    mode: TriggerMode,
    args: Vec<Value>,
    tags: Option<Vec<String>>,
}

struct EventState {
    registry: ListenerRegistry,
    config: EventConfig,
    filter: Option<DispatchFilter>,
    suspended: bool,
    queued: bool,
    queue: VecDeque<QueuedCall>,
    dispatch_count: u64,
    last_args: Option<Vec<Value>>,
}

struct EventInner {
    name: Option<EventName>,
    state: Mutex<EventState>,
    scope: TagScope,
    error_listeners: Mutex<Vec<ErrorHandler>>,
}

enum PassResult {
    /// Queued, suspended or over the dispatch limit.
    Skipped,
    /// Results to reduce.
    Collected(Vec<Outcome>),
    /// Final value (short-circuit or consequent mode).
    Settled(Outcome),
}

/// Single named (or anonymous) event.
#[derive(Clone)]
pub struct Event {
    inner: Arc<EventInner>,
}

impl Event {
    /// Creates an anonymous event with the default config.
    pub fn new() -> Self {
        Self::with_config(EventConfig::default())
    }

    /// Creates an anonymous event.
    pub fn with_config(config: EventConfig) -> Self {
        Self::build(None, config, TagScope::new())
    }

    pub(crate) fn named(name: EventName, config: EventConfig, scope: TagScope) -> Self {
        Self::build(Some(name), config, scope)
    }

    fn build(name: Option<EventName>, config: EventConfig, scope: TagScope) -> Self {
        let state = EventState {
            registry: ListenerRegistry::new(config.listener_ceiling()),
            config,
            filter: None,
            suspended: false,
            queued: false,
            queue: VecDeque::new(),
            dispatch_count: 0,
            last_args: None,
        };
        Self {
            inner: Arc::new(EventInner {
                name,
                state: Mutex::new(state),
                scope,
                error_listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Name given by the owning bus, if any.
    pub fn name(&self) -> Option<&EventName> {
        self.inner.name.as_ref()
    }

    fn label(&self) -> &str {
        self.inner.name.as_ref().map_or("<anonymous>", EventName::as_str)
    }

    // ---------------------------
    // Listener registry
    // ---------------------------

    /// Registers `handler`.
    ///
    /// A duplicate (handler, context) pair is ignored. Fails with
    /// [`EventError::TooManyListeners`] at capacity. With auto-trigger enabled
    /// and a previous dispatch on record, the new listener is immediately
    /// called with that dispatch's arguments.
    pub fn add_listener(&self, handler: Handler, options: ListenerOptions) -> Result<(), EventError> {
        let (record, replay) = {
            let mut st = self.inner.state.lock();
            let Some(record) = st.registry.add(handler, options)? else {
                return Ok(());
            };
            let replay = if st.config.auto_trigger {
                st.last_args.clone()
            } else {
                None
            };
            (record, replay)
        };
        debug!(event = self.label(), index = record.index(), "listener added");

        if let Some(args) = replay {
            trace!(event = self.label(), "auto-trigger replay");
            if let PassResult::Collected(outcomes) =
                self.pass(TriggerMode::Default, args, None, Some(&record))?
            {
                outcomes.into_iter().for_each(detach);
            }
        }
        Ok(())
    }

    /// Registers `handler` with default options.
    pub fn on(&self, handler: Handler) -> Result<(), EventError> {
        self.add_listener(handler, ListenerOptions::default())
    }

    /// Registers `handler` for a single call.
    pub fn once(&self, handler: Handler) -> Result<(), EventError> {
        self.add_listener(handler, ListenerOptions::default().once())
    }

    /// Removes the first listener matching handler, context and tag.
    pub fn remove_listener(&self, handler: &Handler, context: Option<&Context>, tag: Option<&str>) -> bool {
        let removed = self.inner.state.lock().registry.remove(handler, context, tag);
        if removed {
            debug!(event = self.label(), "listener removed");
        }
        removed
    }

    /// Removes `handler` registered without a context.
    pub fn un(&self, handler: &Handler) -> bool {
        self.remove_listener(handler, None, None)
    }

    /// Existence query; see [`ListenerRegistry::has`].
    pub fn has_listener(&self, handler: Option<&Handler>, context: Option<&Context>, tag: Option<&str>) -> bool {
        self.inner.state.lock().registry.has(handler, context, tag)
    }

    /// True if any listener is registered.
    pub fn has_listeners(&self) -> bool {
        self.has_listener(None, None, None)
    }

    /// Removes every listener, or those carrying `tag`.
    pub fn remove_all_listeners(&self, tag: Option<&str>) {
        self.inner.state.lock().registry.remove_all(tag);
        debug!(event = self.label(), tag, "listeners removed");
    }

    pub fn listener_count(&self) -> usize {
        self.inner.state.lock().registry.len()
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

    /// Hands `error` to the error listeners, or gives it back if there are none.
    fn route_error(&self, error: EventError, args: &[Value]) -> Result<(), EventError> {
        let listeners = self.inner.error_listeners.lock().clone();
        if listeners.is_empty() || !error.is_routable() {
            warn!(event = self.label(), error = %error, label = error.as_label(), "listener error not handled");
            return Err(error);
        }
        let report = ErrorReport {
            origin: ErrorOrigin::Listener,
            event: self.inner.name.as_ref(),
            error: &error,
            args,
        };
        for listener in &listeners {
            listener.call(&report);
        }
        Ok(())
    }

    // ---------------------------
    // Dispatch accessors
    // ---------------------------

    /// Dispatches without collecting results.
    pub fn trigger(&self, args: Vec<Value>) -> Result<(), EventError> {
        self.dispatch(TriggerMode::Default, args).map(drop)
    }

    /// Same as [`Event::trigger`].
    pub fn emit(&self, args: Vec<Value>) -> Result<(), EventError> {
        self.trigger(args)
    }

    /// Dispatches under `mode`.
    ///
    /// Dropped dispatches (queued, suspended, over the limit) return `null`.
    pub fn dispatch(&self, mode: TriggerMode, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch_scoped(mode, args, None)
    }

    /// Dispatches under `mode`, reaching only listeners sharing one of `tags`.
    ///
    /// Applies on top of any ambient scope from [`Event::with_tags`].
    pub fn dispatch_with_tags<I, T>(
        &self,
        mode: TriggerMode,
        args: Vec<Value>,
        tags: I,
    ) -> Result<Outcome, EventError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        self.dispatch_scoped(mode, args, Some(&tags))
    }

    pub fn all(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::All, args)
    }

    pub fn concat(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::Concat, args)
    }

    pub fn merge(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::Merge, args)
    }

    pub fn last(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::Last, args)
    }

    pub fn first(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::First, args)
    }

    pub fn pipe(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::Pipe, args)
    }

    pub fn until_true(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::UntilTrue, args)
    }

    pub fn until_false(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::UntilFalse, args)
    }

    pub fn first_non_empty(&self, args: Vec<Value>) -> Result<Outcome, EventError> {
        self.dispatch(TriggerMode::FirstNonEmpty, args)
    }

    /// Per-listener results, pending ones left pending.
    pub fn raw(&self, args: Vec<Value>) -> Result<Vec<Outcome>, EventError> {
        self.raw_scoped(args, None)
    }

    // ---------------------------
    // Resolving accessors
    // ---------------------------

    /// Dispatches under `mode` and always returns a future.
    pub fn resolve_dispatch(&self, mode: TriggerMode, args: Vec<Value>) -> Pending {
        settle(self.dispatch(mode, args))
    }

    /// Dispatches and waits for every pending listener result; yields `null`.
    pub fn resolve(&self, args: Vec<Value>) -> Pending {
        settle(self.dispatch(TriggerMode::All, args).map(|all| {
            Outcome::pending(async move {
                all.resolve().await?;
                Ok(Value::Null)
            })
        }))
    }

    pub fn resolve_all(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::All, args)
    }

    pub fn resolve_concat(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::Concat, args)
    }

    pub fn resolve_merge(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::Merge, args)
    }

    pub fn resolve_last(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::Last, args)
    }

    pub fn resolve_first(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::First, args)
    }

    pub fn resolve_pipe(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::Pipe, args)
    }

    pub fn resolve_until_true(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::UntilTrue, args)
    }

    pub fn resolve_until_false(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::UntilFalse, args)
    }

    pub fn resolve_first_non_empty(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::FirstNonEmpty, args)
    }

    /// Per-listener results, each settled.
    pub fn resolve_raw(&self, args: Vec<Value>) -> Pending {
        self.resolve_dispatch(TriggerMode::Raw, args)
    }

    // ---------------------------
    // Control
    // ---------------------------

    /// Stops dispatching. With `with_queue`, dispatches are kept for [`Event::resume`].
    pub fn suspend(&self, with_queue: bool) {
        let mut st = self.inner.state.lock();
        st.suspended = true;
        if with_queue {
            st.queued = true;
        }
        debug!(event = self.label(), with_queue, "suspended");
    }

    /// Clears both flags and replays queued dispatches in arrival order.
    ///
    /// Every queued call is replayed even if one fails; the first failure is returned.
    pub fn resume(&self) -> Result<(), EventError> {
        let queued = {
            let mut st = self.inner.state.lock();
            st.suspended = false;
            st.queued = false;
            std::mem::take(&mut st.queue)
        };
        debug!(event = self.label(), replay = queued.len(), "resumed");

        let mut first_error = None;
        for call in queued {
            let tags = call.tags.as_deref();
            let replayed = if call.mode == TriggerMode::Raw {
                self.raw_scoped(call.args, tags)
                    .map(|outcomes| outcomes.into_iter().for_each(detach))
            } else {
                self.dispatch_scoped(call.mode, call.args, tags).map(detach)
            };
            if let Err(e) = replayed {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn is_suspended(&self) -> bool {
        self.inner.state.lock().suspended
    }

    pub fn is_queued(&self) -> bool {
        self.inner.state.lock().queued
    }

    /// Removes every listener and clears the queue, flags, counters and the
    /// auto-trigger snapshot. Config, filter and error listeners are kept.
    pub fn reset(&self) {
        let mut st = self.inner.state.lock();
        st.registry.clear();
        st.queue.clear();
        st.suspended = false;
        st.queued = false;
        st.dispatch_count = 0;
        st.last_args = None;
        debug!(event = self.label(), "reset");
    }

    /// Runs `f` with a tag scope: dispatches issued inside only reach
    /// listeners sharing at least one of `tags`.
    ///
    /// The scope covers the calling thread only. Events owned by a bus share
    /// the bus scope.
    pub fn with_tags<I, T, F, R>(&self, tags: I, f: F) -> R
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
        F: FnOnce() -> R,
    {
        let _restore = self.inner.scope.enter(tags);
        f()
    }

    /// Tag scope in effect for the calling thread.
    pub fn active_tags(&self) -> Option<Vec<String>> {
        self.inner.scope.current()
    }

    /// Resolves with the arguments of the next dispatch reaching a one-shot
    /// listener registered with `options`.
    pub fn promise(
        &self,
        options: ListenerOptions,
    ) -> Result<impl Future<Output = Result<Vec<Value>, EventError>> + Send + 'static, EventError> {
        let (tx, rx) = oneshot::channel();
        let tx = Mutex::new(Some(tx));
        let handler = Handler::new(move |args: &[Value]| {
            if let Some(tx) = tx.lock().take() {
                let _ = tx.send(args.to_vec());
            }
        });
        self.add_listener(handler, options.once())?;
        Ok(rx.map(|received| received.map_err(|_| EventError::Closed)))
    }

    /// Replaces the event config. The listener ceiling applies to later adds.
    pub fn set_options(&self, config: EventConfig) {
        let mut st = self.inner.state.lock();
        st.registry.set_ceiling(config.listener_ceiling());
        st.config = config;
    }

    pub fn options(&self) -> EventConfig {
        self.inner.state.lock().config.clone()
    }

    /// Installs (or clears) the dispatch filter.
    pub fn set_filter(&self, filter: Option<DispatchFilter>) {
        self.inner.state.lock().filter = filter;
    }

    /// Number of dispatches that went past queue, suspension and limit checks.
    pub fn dispatch_count(&self) -> u64 {
        self.inner.state.lock().dispatch_count
    }

    // ---------------------------
    // Pass internals
    // ---------------------------

    pub(crate) fn dispatch_scoped(
        &self,
        mode: TriggerMode,
        args: Vec<Value>,
        tags: Option<&[String]>,
    ) -> Result<Outcome, EventError> {
        Ok(match self.pass(mode, args, tags, None)? {
            PassResult::Skipped => Outcome::null(),
            PassResult::Settled(outcome) => outcome,
            PassResult::Collected(outcomes) => reduce(mode, outcomes),
        })
    }

    pub(crate) fn raw_scoped(&self, args: Vec<Value>, tags: Option<&[String]>) -> Result<Vec<Outcome>, EventError> {
        Ok(match self.pass(TriggerMode::Raw, args, tags, None)? {
            PassResult::Skipped => Vec::new(),
            PassResult::Settled(outcome) => vec![outcome],
            PassResult::Collected(outcomes) => outcomes,
        })
    }

    /// One dispatch pass. `only` restricts the pass to a single record and
    /// bypasses queueing and counting (auto-trigger replay).
    fn pass(
        &self,
        mode: TriggerMode,
        args: Vec<Value>,
        tags: Option<&[String]>,
        only: Option<&Arc<Listener>>,
    ) -> Result<PassResult, EventError> {
        let scope = self.inner.scope.current();
        let (snapshot, filter, event_async) = {
            let mut st = self.inner.state.lock();
            if only.is_none() {
                if st.queued {
                    trace!(event = self.label(), mode = mode.as_label(), "dispatch queued");
                    st.queue.push_back(QueuedCall {
                        mode,
                        args,
                        tags: tags.map(<[String]>::to_vec).or(scope),
                    });
                    return Ok(PassResult::Skipped);
                }
                if st.suspended {
                    trace!(event = self.label(), "dispatch dropped: suspended");
                    return Ok(PassResult::Skipped);
                }
                if st
                    .config
                    .dispatch_limit()
                    .is_some_and(|limit| st.dispatch_count >= limit)
                {
                    trace!(event = self.label(), "dispatch dropped: limit reached");
                    return Ok(PassResult::Skipped);
                }
                st.dispatch_count += 1;
                if st.config.auto_trigger {
                    st.last_args = Some(args.clone());
                }
            }
            (st.registry.snapshot(), st.filter.clone(), st.config.async_delay)
        };
        trace!(
            event = self.label(),
            mode = mode.as_label(),
            listeners = snapshot.len(),
            "dispatch"
        );

        let consequent = mode.is_consequent();
        let mut collected = Vec::new();
        let mut previous: Option<Outcome> = None;

        for listener in &snapshot {
            if only.is_some_and(|o| !Arc::ptr_eq(o, listener)) {
                continue;
            }
            if filter.as_ref().is_some_and(|f| !f(&args, listener)) {
                continue;
            }
            if tags.is_some_and(|t| !tags_intersect(listener.tags(), t)) {
                continue;
            }
            if scope.as_deref().is_some_and(|t| !tags_intersect(listener.tags(), t)) {
                continue;
            }
            if !listener.reached_start() {
                continue;
            }

            if consequent {
                let input = match previous.take() {
                    Some(Outcome::Pending(fut)) => {
                        previous = Some(self.chain(mode, fut, Arc::clone(listener), args.clone(), event_async));
                        continue;
                    }
                    Some(Outcome::Ready(value)) => Some(value),
                    None => None,
                };
                let call_args = mode.next_args(input.clone(), &args);
                previous = match self.call_listener(listener, call_args, event_async)? {
                    Some(Outcome::Ready(value)) if mode.stops_at(&value) => {
                        return Ok(PassResult::Settled(Outcome::Ready(value)));
                    }
                    Some(outcome) => Some(outcome),
                    // no result: keep threading the previous value
                    None => input.map(Outcome::Ready),
                };
                continue;
            }

            let Some(outcome) = self.call_listener(listener, args.clone(), event_async)? else {
                continue;
            };
            if mode == TriggerMode::First {
                return Ok(PassResult::Settled(outcome));
            }
            collected.push(outcome);
        }

        if consequent {
            let settled = previous.unwrap_or_else(|| Outcome::Ready(mode.empty_result(&args)));
            return Ok(PassResult::Settled(settled));
        }
        if mode == TriggerMode::First {
            return Ok(PassResult::Settled(Outcome::null()));
        }
        Ok(PassResult::Collected(collected))
    }

    /// Continues a consequent pass after a pending result.
    fn chain(
        &self,
        mode: TriggerMode,
        previous: Pending,
        listener: Arc<Listener>,
        args: Vec<Value>,
        event_async: Option<Duration>,
    ) -> Outcome {
        let this = self.clone();
        Outcome::pending(async move {
            let value = previous.await?;
            if mode.stops_at(&value) {
                return Ok(value);
            }
            let call_args = mode.next_args(Some(value.clone()), &args);
            match this.call_listener(&listener, call_args, event_async)? {
                Some(outcome) => outcome.resolve().await,
                None => Ok(value),
            }
        })
    }

    /// Invokes one listener, inline or through the scheduler.
    ///
    /// `Ok(None)` means there is no result: the listener's limit was already
    /// used up, or it failed and the failure went to the error listeners.
    fn call_listener(
        &self,
        listener: &Arc<Listener>,
        args: Vec<Value>,
        event_async: Option<Duration>,
    ) -> Result<Option<Outcome>, EventError> {
        let Some(exhausted) = listener.acquire_call() else {
            return Ok(None);
        };
        if exhausted {
            self.inner.state.lock().registry.remove_record(listener);
            debug!(event = self.label(), index = listener.index(), "listener reached its limit");
        }

        match listener.async_delay().or(event_async) {
            Some(delay) => {
                let this = self.clone();
                let record = Arc::clone(listener);
                let deferred_args = args.clone();
                let scheduled = scheduler::schedule(delay, move || {
                    this.invoke(&record, deferred_args)
                        .map(|outcome| outcome.unwrap_or_else(Outcome::null))
                });
                match scheduled {
                    Ok(pending) => Ok(Some(Outcome::Pending(pending))),
                    Err(e) => self.route_error(e, &args).map(|()| None),
                }
            }
            None => self.invoke(listener, args),
        }
    }

    fn invoke(&self, listener: &Listener, args: Vec<Value>) -> Result<Option<Outcome>, EventError> {
        match listener.handler().call(&args) {
            Ok(Outcome::Pending(fut)) => Ok(Some(Outcome::Pending(self.guard_pending(fut, args)))),
            Ok(ready) => Ok(Some(ready)),
            Err(e) => self.route_error(e, &args).map(|()| None),
        }
    }

    /// Routes a pending result's failure like a synchronous one.
    fn guard_pending(&self, fut: Pending, args: Vec<Value>) -> Pending {
        let this = self.clone();
        async move {
            match fut.await {
                Ok(value) => Ok(value),
                Err(e) => this.route_error(e, &args).map(|()| Value::Null),
            }
        }
        .boxed()
    }
}

impl Default for Event {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let st = self.inner.state.lock();
        f.debug_struct("Event")
            .field("name", &self.inner.name)
            .field("listeners", &st.registry.len())
            .field("suspended", &st.suspended)
            .field("queued", &st.queued)
            .field("dispatch_count", &st.dispatch_count)
            .finish()
    }
}
