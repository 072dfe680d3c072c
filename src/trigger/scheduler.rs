//! # Async call scheduler.
//!
//! Defers a single listener call onto the current tokio runtime.
//!
//! ## Rules
//! - The call runs after `delay`; a zero delay still yields to the runtime once,
//!   so the dispatching caller always regains control first.
//! - The returned [`Pending`] only observes the call: dropping it does not cancel
//!   the call (fire-and-forget).
//! - Without a running tokio runtime nothing is spawned and
//!   [`EventError::NoRuntime`] is returned.

use std::time::Duration;

use futures::FutureExt;
use tokio::runtime::Handle;
use tracing::warn;

use crate::error::EventError;
use crate::outcome::{Outcome, Pending};

/// Runs `call` after `delay` and returns a handle to its eventual value.
pub fn schedule<F>(delay: Duration, call: F) -> Result<Pending, EventError>
where
    F: FnOnce() -> Result<Outcome, EventError> + Send + 'static,
{
    let runtime = Handle::try_current().map_err(|_| EventError::NoRuntime)?;
    let join = runtime.spawn(async move {
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
        call()?.resolve().await
    });

    Ok(async move {
        match join.await {
            Ok(result) => result,
            Err(e) => Err(EventError::Join {
                message: e.to_string(),
            }),
        }
    }
    .boxed())
}

/// Lets a result nobody will await finish on its own.
///
/// Ready values are dropped; pending ones are spawned when a runtime exists.
pub(crate) fn detach(outcome: Outcome) {
    let Outcome::Pending(fut) = outcome else {
        return;
    };
    match Handle::try_current() {
        Ok(runtime) => {
            runtime.spawn(async move {
                if let Err(e) = fut.await {
                    warn!(error = %e, label = e.as_label(), "detached listener result failed");
                }
            });
        }
        Err(_) => warn!("pending listener result dropped: no tokio runtime"),
    }
}
