//! # Ambient tag scopes.
//!
//! A [`TagScope`] is an identity shared by a bus and the events it owns. The
//! tags active for it live on a per-thread stack, so a `with_tags` callback
//! only affects dispatches issued by the thread running it.
//!
//! ## Rules
//! - Nested scopes push; leaving a scope pops (also on unwind).
//! - The innermost tag set wins.
//! - Work moved to another thread (async listeners) starts unscoped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCOPE: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static ACTIVE: RefCell<HashMap<u64, Vec<Vec<String>>>> = RefCell::new(HashMap::new());
}

/// Identity of a tag scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TagScope(u64);

impl TagScope {
    pub(crate) fn new() -> Self {
        Self(NEXT_SCOPE.fetch_add(1, Ordering::Relaxed))
    }

    /// Tags active for this scope on the calling thread.
    pub(crate) fn current(self) -> Option<Vec<String>> {
        ACTIVE.with(|active| active.borrow().get(&self.0).and_then(|stack| stack.last().cloned()))
    }

    /// Pushes `tags` for the calling thread until the guard drops.
    pub(crate) fn enter<I, T>(self, tags: I) -> TagScopeGuard
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        ACTIVE.with(|active| active.borrow_mut().entry(self.0).or_default().push(tags));
        TagScopeGuard { scope: self }
    }

    /// Drops every tag set of this scope on the calling thread.
    pub(crate) fn clear(self) {
        ACTIVE.with(|active| {
            active.borrow_mut().remove(&self.0);
        });
    }
}

/// Pops its tag set when dropped.
pub(crate) struct TagScopeGuard {
    scope: TagScope,
}

impl Drop for TagScopeGuard {
    fn drop(&mut self) {
        // try_with: the thread-local may already be gone during thread teardown
        let _ = ACTIVE.try_with(|active| {
            let mut active = active.borrow_mut();
            if let Some(stack) = active.get_mut(&self.scope.0) {
                stack.pop();
                if stack.is_empty() {
                    active.remove(&self.scope.0);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_scopes_restore() {
        let scope = TagScope::new();
        assert_eq!(scope.current(), None);
        {
            let _outer = scope.enter(["a"]);
            {
                let _inner = scope.enter(["b"]);
                assert_eq!(scope.current(), Some(vec!["b".to_string()]));
            }
            assert_eq!(scope.current(), Some(vec!["a".to_string()]));
        }
        assert_eq!(scope.current(), None);
    }

    #[test]
    fn test_scopes_are_independent() {
        let a = TagScope::new();
        let b = TagScope::new();
        let _guard = a.enter(["x"]);
        assert!(b.current().is_none());
    }

    #[test]
    fn test_other_threads_are_unscoped() {
        let scope = TagScope::new();
        let _guard = scope.enter(["x"]);
        let seen = std::thread::spawn(move || scope.current()).join().unwrap();
        assert!(seen.is_none());
        assert!(scope.current().is_some());
    }
}
