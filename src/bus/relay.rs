//! # Relays: standing subscriptions that forward a source's calls into a bus.
//!
//! A relay registers a proxy [`Handler`] on an [`EventSource`]. When the source
//! fires, the proxy dispatches the same arguments on the local bus under the
//! remote name, an alias, or a prefixed name.
//!
//! ```text
//! source.trigger("saved", args)
//!   └─► proxy ──► bus.dispatch(local_name, mode, args)
//!                  └─► result handed back to the source (pending if `resolve`)
//! ```
//!
//! ## Rules
//! - Proxies are cached per [`ProxyKey`]; relaying twice with the same key
//!   reuses the same handler, so the source sees one subscription.
//! - A remote name of `"*"` subscribes through the source's all-events hook;
//!   the proxy then receives `[name, args, tags]` and unpacks it.
//! - Proxies hold a weak reference to the bus: once the bus is gone they
//!   answer `null`.

use std::fmt;
use std::sync::{Arc, Weak};

use serde_json::Value;

use super::event_bus::{BusInner, EventBus};
use super::name::EventName;
use super::source::EventSource;
use crate::error::EventError;
use crate::listeners::Handler;
use crate::outcome::Outcome;
use crate::trigger::TriggerMode;

/// Identity of a proxy subscription.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ProxyKey {
    pub(crate) remote: EventName,
    pub(crate) local: Option<EventName>,
    pub(crate) prefix: Option<String>,
    pub(crate) mode: TriggerMode,
    pub(crate) resolve: bool,
}

impl ProxyKey {
    /// Key used for event sources attached with `add_event_source`.
    pub(crate) fn inbound(name: EventName, mode: Option<TriggerMode>) -> Self {
        Self {
            remote: name,
            local: None,
            prefix: None,
            mode: mode.unwrap_or_default(),
            resolve: false,
        }
    }

    fn local_for(&self, remote: &EventName) -> Result<EventName, EventError> {
        match (&self.local, &self.prefix) {
            (Some(local), _) => Ok(local.clone()),
            (None, Some(prefix)) => remote.with_prefix(prefix),
            (None, None) => Ok(remote.clone()),
        }
    }
}

/// What to relay, from where, and how.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use observable::{EventBus, RelayOptions, TriggerMode};
///
/// let remote = EventBus::new();
/// let local = EventBus::new();
///
/// let relay = RelayOptions::new(Arc::new(remote.clone()), "saved")
///     .with_prefix("remote.")
///     .with_mode(TriggerMode::All);
/// local.relay(&relay).unwrap();
/// assert!(local.unrelay(&relay));
/// ```
#[derive(Clone)]
pub struct RelayOptions {
    /// Where calls come from.
    pub source: Arc<dyn EventSource>,
    /// Remote event name; `"*"` relays every event.
    pub remote_name: String,
    /// Local alias. Wins over `local_prefix`.
    pub local_name: Option<String>,
    /// Prefix prepended to the remote name.
    pub local_prefix: Option<String>,
    /// Local dispatch mode. Falls back to the source's default mode.
    pub mode: Option<TriggerMode>,
    /// Hand a future back to the source instead of the immediate result.
    pub resolve: bool,
}

impl RelayOptions {
    pub fn new(source: Arc<dyn EventSource>, remote_name: impl Into<String>) -> Self {
        Self {
            source,
            remote_name: remote_name.into(),
            local_name: None,
            local_prefix: None,
            mode: None,
            resolve: false,
        }
    }

    pub fn with_local_name(mut self, name: impl Into<String>) -> Self {
        self.local_name = Some(name.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.local_prefix = Some(prefix.into());
        self
    }

    pub fn with_mode(mut self, mode: TriggerMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn resolved(mut self) -> Self {
        self.resolve = true;
        self
    }

    pub(crate) fn key(&self) -> Result<ProxyKey, EventError> {
        Ok(ProxyKey {
            remote: EventName::new(&self.remote_name)?,
            local: self.local_name.as_deref().map(EventName::new).transpose()?,
            prefix: self.local_prefix.clone(),
            mode: self.mode.or_else(|| self.source.default_mode()).unwrap_or_default(),
            resolve: self.resolve,
        })
    }
}

impl fmt::Debug for RelayOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayOptions")
            .field("remote_name", &self.remote_name)
            .field("local_name", &self.local_name)
            .field("local_prefix", &self.local_prefix)
            .field("mode", &self.mode)
            .field("resolve", &self.resolve)
            .finish_non_exhaustive()
    }
}

/// Builds the proxy handler for `key`, dispatching into the bus behind `bus`.
pub(crate) fn proxy(bus: Weak<BusInner>, key: ProxyKey) -> Handler {
    Handler::new(move |args: &[Value]| -> Result<Outcome, EventError> {
        let Some(bus) = EventBus::upgrade(&bus) else {
            return Ok(Outcome::null());
        };
        let (remote, args) = if key.remote.is_wildcard() {
            match unpack_notice(args) {
                Some(unpacked) => unpacked,
                None => return Ok(Outcome::null()),
            }
        } else {
            (key.remote.clone(), args.to_vec())
        };
        let local = key.local_for(&remote)?;
        if key.resolve {
            Ok(Outcome::Pending(bus.resolve_dispatch(local, key.mode, args)))
        } else {
            bus.dispatch(local, key.mode, args)
        }
    })
}

/// Splits an all-events notice `[name, args, tags]` into name and arguments.
fn unpack_notice(notice: &[Value]) -> Option<(EventName, Vec<Value>)> {
    let name = EventName::new(notice.first()?.as_str()?).ok()?;
    let args = match notice.get(1) {
        Some(Value::Array(args)) => args.clone(),
        _ => Vec::new(),
    };
    Some((name, args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_local_name_resolution() {
        let remote = EventName::new("saved").unwrap();
        let mut key = ProxyKey::inbound(remote.clone(), None);
        assert_eq!(key.local_for(&remote).unwrap(), remote);

        key.prefix = Some("up.".into());
        assert_eq!(key.local_for(&remote).unwrap().as_str(), "up.saved");

        key.local = Some(EventName::new("alias").unwrap());
        assert_eq!(key.local_for(&remote).unwrap().as_str(), "alias");
    }

    #[test]
    fn test_unpack_notice() {
        let (name, args) = unpack_notice(&[json!("e"), json!([1, 2]), Value::Null]).unwrap();
        assert_eq!(name.as_str(), "e");
        assert_eq!(args, vec![json!(1), json!(2)]);
        assert!(unpack_notice(&[json!(3)]).is_none());
    }

    #[test]
    fn test_key_falls_back_to_source_mode() {
        struct Piping;
        impl EventSource for Piping {
            fn on(&self, _: &EventName, _: Handler) -> Result<(), EventError> {
                Ok(())
            }
            fn un(&self, _: &EventName, _: &Handler) -> bool {
                false
            }
            fn default_mode(&self) -> Option<TriggerMode> {
                Some(TriggerMode::Pipe)
            }
        }

        let opts = RelayOptions::new(Arc::new(Piping), "e");
        assert_eq!(opts.key().unwrap().mode, TriggerMode::Pipe);
        let opts = opts.with_mode(TriggerMode::All);
        assert_eq!(opts.key().unwrap().mode, TriggerMode::All);
        assert!(RelayOptions::new(Arc::new(Piping), "").key().is_err());
    }
}
