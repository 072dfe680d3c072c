//! # Listener options and registry records.
//!
//! [`ListenerOptions`] describes how a handler wants to be called;
//! [`Listener`] is the record an event keeps for it, including the counters
//! that drive `limit` and `start`.
//!
//! ## Sentinel values
//! - `limit = 0` → unlimited calls
//! - `start = 0` or `1` → called from the first matching dispatch
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use observable::ListenerOptions;
//!
//! let opts = ListenerOptions::default()
//!     .once()
//!     .with_tags(["ui"])
//!     .with_async(Duration::from_millis(5));
//!
//! assert_eq!(opts.limit, 1);
//! assert_eq!(opts.tags, vec!["ui".to_string()]);
//! ```

use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::time::Duration;

use serde_json::Value;

use super::handler::{Context, Handler};

/// How a listener wants to be registered and called.
#[derive(Clone, Debug, Default)]
pub struct ListenerOptions {
    /// Owner used for dedupe and selective removal.
    pub context: Option<Context>,
    /// Number of calls after which the listener removes itself (`0` = unlimited).
    pub limit: u32,
    /// 1-based ordinal of the first matching dispatch that invokes the listener.
    pub start: u32,
    /// Insert at the front instead of the back.
    pub first: bool,
    /// Keep ahead of every listener without this flag.
    pub always_first: bool,
    /// Keep behind every listener without this flag.
    pub always_last: bool,
    /// Defer every call by this delay.
    pub async_delay: Option<Duration>,
    /// Tags used by tag-scoped dispatch and tag-filtered removal.
    pub tags: Vec<String>,
    /// Caller data visible to the event's dispatch filter.
    pub extra_data: Option<Value>,
}

impl ListenerOptions {
    #[inline]
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    #[inline]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Shorthand for `with_limit(1)`.
    #[inline]
    pub fn once(self) -> Self {
        self.with_limit(1)
    }

    #[inline]
    pub fn with_start(mut self, start: u32) -> Self {
        self.start = start;
        self
    }

    #[inline]
    pub fn first(mut self) -> Self {
        self.first = true;
        self
    }

    #[inline]
    pub fn always_first(mut self) -> Self {
        self.always_first = true;
        self
    }

    #[inline]
    pub fn always_last(mut self) -> Self {
        self.always_last = true;
        self
    }

    #[inline]
    pub fn with_async(mut self, delay: Duration) -> Self {
        self.async_delay = Some(delay);
        self
    }

    #[inline]
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn with_extra_data(mut self, data: Value) -> Self {
        self.extra_data = Some(data);
        self
    }
}

/// Placement group used by the ordering policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Placement {
    AlwaysFirst,
    Normal,
    AlwaysLast,
}

/// A registered listener.
///
/// Counters are atomic so a record can be shared between the registry and
/// in-flight dispatch snapshots.
#[derive(Debug)]
pub struct Listener {
    handler: Handler,
    context: Option<Context>,
    tags: Vec<String>,
    extra_data: Option<Value>,
    limit: u32,
    start: u32,
    placement: Placement,
    async_delay: Option<Duration>,
    index: i64,
    call_count: AtomicU32,
    called: AtomicU32,
}

impl Listener {
    pub(crate) fn new(handler: Handler, options: ListenerOptions, index: i64) -> Self {
        let placement = if options.always_first {
            Placement::AlwaysFirst
        } else if options.always_last {
            Placement::AlwaysLast
        } else {
            Placement::Normal
        };

        Self {
            handler,
            context: options.context,
            tags: options.tags,
            extra_data: options.extra_data,
            limit: options.limit,
            start: options.start,
            placement,
            async_delay: options.async_delay,
            index,
            call_count: AtomicU32::new(0),
            called: AtomicU32::new(0),
        }
    }

    pub fn handler(&self) -> &Handler {
        &self.handler
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn extra_data(&self) -> Option<&Value> {
        self.extra_data.as_ref()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn async_delay(&self) -> Option<Duration> {
        self.async_delay
    }

    /// Default sort key; lower runs earlier within a placement group.
    pub fn index(&self) -> i64 {
        self.index
    }

    /// Number of times the handler has actually been invoked.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(AtomicOrdering::SeqCst)
    }

    #[inline]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Identity check used by add/remove/has.
    ///
    /// Contexts compare as options: a listener registered without a context
    /// only matches queries without one, and vice versa.
    pub(crate) fn matches(
        &self,
        handler: &Handler,
        context: Option<&Context>,
        tag: Option<&str>,
    ) -> bool {
        if self.handler != *handler || self.context.as_ref() != context {
            return false;
        }
        tag.map_or(true, |t| self.has_tag(t))
    }

    /// Counts a matching dispatch and reports whether the start threshold is met.
    pub(crate) fn reached_start(&self) -> bool {
        let called = self.called.fetch_add(1, AtomicOrdering::SeqCst).saturating_add(1);
        called >= self.start
    }

    /// Reserves one call against the limit.
    ///
    /// Returns `None` when the limit is already used up, otherwise whether
    /// this call exhausts it.
    pub(crate) fn acquire_call(&self) -> Option<bool> {
        if self.limit == 0 {
            self.call_count.fetch_add(1, AtomicOrdering::SeqCst);
            return Some(false);
        }
        let limit = self.limit;
        self.call_count
            .fetch_update(AtomicOrdering::SeqCst, AtomicOrdering::SeqCst, |n| {
                (n < limit).then_some(n + 1)
            })
            .ok()
            .map(|prev| prev + 1 == limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(options: ListenerOptions) -> Listener {
        Listener::new(Handler::new(|_: &[Value]| ()), options, 0)
    }

    #[test]
    fn test_limit_is_reserved_atomically() {
        let l = record(ListenerOptions::default().with_limit(2));
        assert_eq!(l.acquire_call(), Some(false));
        assert_eq!(l.acquire_call(), Some(true));
        assert_eq!(l.acquire_call(), None);
        assert_eq!(l.call_count(), 2);
    }

    #[test]
    fn test_start_threshold() {
        let l = record(ListenerOptions::default().with_start(3));
        assert!(!l.reached_start());
        assert!(!l.reached_start());
        assert!(l.reached_start());
        assert!(l.reached_start());
    }

    #[test]
    fn test_always_first_wins_over_always_last() {
        let l = record(ListenerOptions::default().always_first().always_last());
        assert_eq!(l.placement(), Placement::AlwaysFirst);
    }

    #[test]
    fn test_context_must_match_presence() {
        let owner = Context::new(1u8);
        let l = record(ListenerOptions::default().with_context(owner.clone()));
        let h = l.handler().clone();
        assert!(l.matches(&h, Some(&owner), None));
        assert!(!l.matches(&h, None, None));
    }
}
