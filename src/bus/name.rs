//! # Event names.
//!
//! [`EventName`] is the key of the bus registry. Names are validated once, at
//! construction, and shared cheaply afterwards (`Arc<str>`).
//!
//! ## Rules
//! - A name is non-empty and has no leading or trailing whitespace.
//! - `"*"` is the wildcard: it can be listened to but never dispatched.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::error::EventError;

const WILDCARD: &str = "*";

/// Validated event identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventName(Arc<str>);

impl EventName {
    /// Validates and wraps `name`.
    ///
    /// # Example
    /// ```
    /// use observable::EventName;
    ///
    /// assert!(EventName::new("user.saved").is_ok());
    /// assert!(EventName::new("").is_err());
    /// assert!(EventName::new(" padded ").is_err());
    /// ```
    pub fn new(name: &str) -> Result<Self, EventError> {
        if name.is_empty() {
            return Err(EventError::InvalidName {
                name: name.to_owned(),
                reason: "empty",
            });
        }
        if name.trim() != name {
            return Err(EventError::InvalidName {
                name: name.to_owned(),
                reason: "surrounding whitespace",
            });
        }
        Ok(Self(Arc::from(name)))
    }

    /// The wildcard name.
    pub fn wildcard() -> Self {
        Self(Arc::from(WILDCARD))
    }

    pub fn is_wildcard(&self) -> bool {
        &*self.0 == WILDCARD
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `prefix` + `self`, validated.
    pub fn with_prefix(&self, prefix: &str) -> Result<Self, EventError> {
        Self::new(&format!("{prefix}{}", self.0))
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Anything a bus accepts as an event name.
pub trait IntoEventName {
    fn into_event_name(self) -> Result<EventName, EventError>;
}

impl IntoEventName for EventName {
    fn into_event_name(self) -> Result<EventName, EventError> {
        Ok(self)
    }
}

impl IntoEventName for &EventName {
    fn into_event_name(self) -> Result<EventName, EventError> {
        Ok(self.clone())
    }
}

impl IntoEventName for &str {
    fn into_event_name(self) -> Result<EventName, EventError> {
        EventName::new(self)
    }
}

impl IntoEventName for String {
    fn into_event_name(self) -> Result<EventName, EventError> {
        EventName::new(&self)
    }
}

impl IntoEventName for &String {
    fn into_event_name(self) -> Result<EventName, EventError> {
        EventName::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_malformed_names() {
        let err = EventName::new("\tsave").unwrap_err();
        assert_eq!(err.as_label(), "invalid_name");
        assert!(err.to_string().contains("save"));
    }

    #[test]
    fn test_wildcard() {
        assert!(EventName::wildcard().is_wildcard());
        assert!(EventName::new("*").unwrap().is_wildcard());
        assert!(!EventName::new("a*").unwrap().is_wildcard());
    }

    #[test]
    fn test_prefix() {
        let name = EventName::new("saved").unwrap();
        assert_eq!(name.with_prefix("remote.").unwrap().as_str(), "remote.saved");
    }
}
