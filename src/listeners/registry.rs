//! # Listener registry: the ordered listener list of one event.
//!
//! ## Rules
//! - (handler, context) pairs are unique; adding a duplicate is a no-op.
//! - The ceiling is hard: adding at capacity fails with
//!   [`EventError::TooManyListeners`].
//! - `first` / `always_first` insert at the front, everything else at the back.
//! - Once any pinned (`always_first` / `always_last`) listener has been added
//!   the registry stays in sorted mode and re-sorts after every add.
//! - Dispatch iterates a [`ListenerRegistry::snapshot`], never the live list.

use std::sync::Arc;

use crate::error::EventError;

use super::handler::{Context, Handler};
use super::listener::{Listener, ListenerOptions};
use super::ordering::{compare_listeners, is_pinned};

#[derive(Debug)]
pub struct ListenerRegistry {
    listeners: Vec<Arc<Listener>>,
    /// Sticky: set by the first pinned listener, cleared only by `clear`.
    sorted: bool,
    next_index: i64,
    next_front_index: i64,
    ceiling: usize,
}

impl ListenerRegistry {
    pub fn new(ceiling: usize) -> Self {
        Self {
            listeners: Vec::new(),
            sorted: false,
            next_index: 0,
            next_front_index: -1,
            ceiling: ceiling.max(1),
        }
    }

    pub fn set_ceiling(&mut self, ceiling: usize) {
        self.ceiling = ceiling.max(1);
    }

    /// Adds a listener.
    ///
    /// Returns `Ok(None)` when an identical (handler, context) pair is already
    /// registered, otherwise the new record.
    pub fn add(
        &mut self,
        handler: Handler,
        options: ListenerOptions,
    ) -> Result<Option<Arc<Listener>>, EventError> {
        if self.position(&handler, options.context.as_ref(), None).is_some() {
            return Ok(None);
        }
        if self.listeners.len() >= self.ceiling {
            return Err(EventError::TooManyListeners {
                limit: self.ceiling,
            });
        }

        let at_front = options.first || options.always_first;
        let index = if at_front {
            let i = self.next_front_index;
            self.next_front_index -= 1;
            i
        } else {
            let i = self.next_index;
            self.next_index += 1;
            i
        };

        let record = Arc::new(Listener::new(handler, options, index));
        if at_front {
            self.listeners.insert(0, Arc::clone(&record));
        } else {
            self.listeners.push(Arc::clone(&record));
        }

        if is_pinned(&record) {
            self.sorted = true;
        }
        if self.sorted {
            self.listeners.sort_by(|a, b| compare_listeners(a, b));
        }
        Ok(Some(record))
    }

    /// Removes the first listener matching handler, context and tag.
    pub fn remove(&mut self, handler: &Handler, context: Option<&Context>, tag: Option<&str>) -> bool {
        match self.position(handler, context, tag) {
            Some(pos) => {
                self.listeners.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes exactly this record (used when a listener exhausts its limit).
    pub fn remove_record(&mut self, record: &Arc<Listener>) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| !Arc::ptr_eq(l, record));
        before != self.listeners.len()
    }

    /// Existence query.
    ///
    /// Without a handler: is there a listener carrying `tag`, or, without a
    /// tag, any listener at all.
    pub fn has(&self, handler: Option<&Handler>, context: Option<&Context>, tag: Option<&str>) -> bool {
        match (handler, tag) {
            (Some(h), _) => self.position(h, context, tag).is_some(),
            (None, Some(t)) => self.listeners.iter().any(|l| l.has_tag(t)),
            (None, None) => !self.listeners.is_empty(),
        }
    }

    /// Removes every listener, or only those carrying `tag`.
    pub fn remove_all(&mut self, tag: Option<&str>) {
        match tag {
            Some(t) => self.listeners.retain(|l| !l.has_tag(t)),
            None => self.listeners.clear(),
        }
    }

    /// Drops every listener and leaves sorted mode.
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.sorted = false;
        self.next_index = 0;
        self.next_front_index = -1;
    }

    pub fn snapshot(&self) -> Vec<Arc<Listener>> {
        self.listeners.clone()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn is_sorted_mode(&self) -> bool {
        self.sorted
    }

    fn position(&self, handler: &Handler, context: Option<&Context>, tag: Option<&str>) -> Option<usize> {
        self.listeners
            .iter()
            .position(|l| l.matches(handler, context, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn marker(n: i64) -> Handler {
        Handler::new(move |_: &[Value]| json!(n))
    }

    fn order(reg: &ListenerRegistry) -> Vec<Value> {
        reg.snapshot()
            .iter()
            .map(|l| l.handler().call(&[]).unwrap().into_ready().unwrap())
            .collect()
    }

    #[test]
    fn test_insertion_order_and_first() {
        let mut reg = ListenerRegistry::new(10);
        reg.add(marker(1), ListenerOptions::default()).unwrap();
        reg.add(marker(2), ListenerOptions::default()).unwrap();
        reg.add(marker(0), ListenerOptions::default().first()).unwrap();
        assert_eq!(order(&reg), vec![json!(0), json!(1), json!(2)]);
        assert!(!reg.is_sorted_mode());
    }

    #[test]
    fn test_pinned_listeners_enable_sticky_sort() {
        let mut reg = ListenerRegistry::new(10);
        reg.add(marker(9), ListenerOptions::default().always_last()).unwrap();
        reg.add(marker(1), ListenerOptions::default()).unwrap();
        reg.add(marker(0), ListenerOptions::default().always_first()).unwrap();
        reg.add(marker(2), ListenerOptions::default()).unwrap();
        reg.add(marker(-1), ListenerOptions::default().first()).unwrap();

        assert!(reg.is_sorted_mode());
        assert_eq!(
            order(&reg),
            vec![json!(0), json!(-1), json!(1), json!(2), json!(9)]
        );
    }

    #[test]
    fn test_duplicates_are_ignored() {
        let mut reg = ListenerRegistry::new(10);
        let h = marker(1);
        assert!(reg.add(h.clone(), ListenerOptions::default()).unwrap().is_some());
        assert!(reg.add(h.clone(), ListenerOptions::default()).unwrap().is_none());
        assert_eq!(reg.len(), 1);

        let owner = Context::new("owner");
        assert!(reg
            .add(h, ListenerOptions::default().with_context(owner))
            .unwrap()
            .is_some());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_ceiling_is_hard() {
        let mut reg = ListenerRegistry::new(2);
        reg.add(marker(1), ListenerOptions::default()).unwrap();
        reg.add(marker(2), ListenerOptions::default()).unwrap();
        let err = reg.add(marker(3), ListenerOptions::default()).unwrap_err();
        assert!(matches!(err, EventError::TooManyListeners { limit: 2 }));
    }

    #[test]
    fn test_remove_respects_context_and_tag() {
        let mut reg = ListenerRegistry::new(10);
        let h = marker(1);
        let owner = Context::new(());
        reg.add(
            h.clone(),
            ListenerOptions::default().with_context(owner.clone()).with_tags(["ui"]),
        )
        .unwrap();

        assert!(!reg.remove(&h, None, None));
        assert!(!reg.remove(&h, Some(&owner), Some("net")));
        assert!(reg.has(None, None, Some("ui")));
        assert!(reg.remove(&h, Some(&owner), Some("ui")));
        assert!(!reg.has(None, None, None));
    }

    #[test]
    fn test_remove_all_by_tag() {
        let mut reg = ListenerRegistry::new(10);
        reg.add(marker(1), ListenerOptions::default().with_tags(["a"])).unwrap();
        reg.add(marker(2), ListenerOptions::default().with_tags(["b"])).unwrap();
        reg.remove_all(Some("a"));
        assert_eq!(order(&reg), vec![json!(2)]);
        reg.remove_all(None);
        assert!(reg.is_empty());
    }
}
