//! Guard invocation adapter
//!
//! Binds a guard to `(to, from, instance)` and converts its
//! [`GuardOutcome`] into a [`NavigationResult`].

use super::{GuardOutcome, NavigationGuard};
use crate::error::{NavigationError, NavigationResult};
use crate::record::ComponentInstance;
use crate::types::RouteLocationNormalized;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Future produced by running a guard thunk.
pub type NavigationFuture = Pin<Box<dyn Future<Output = NavigationResult<()>> + Send>>;

/// Deferred, zero-argument guard invocation.
pub type GuardThunk = Box<dyn FnOnce() -> NavigationFuture + Send>;

/// Wrap `guard` into a thunk bound to `(to, from, instance)`.
///
/// The guard is only called when the thunk is invoked. Its outcome is
/// passed through without interpretation beyond mapping it to an error
/// kind: `Abort` becomes `ABORTED`, `Redirect` becomes `REDIRECTED` with
/// the target attached, `Error` becomes `GUARD_ERROR`.
pub fn guard_to_thunk(
    guard: NavigationGuard,
    to: Arc<RouteLocationNormalized>,
    from: Arc<RouteLocationNormalized>,
    instance: Option<ComponentInstance>,
) -> GuardThunk {
    Box::new(move || -> NavigationFuture {
        Box::pin(async move {
            let outcome = guard(Arc::clone(&to), Arc::clone(&from), instance).await;
            match outcome {
                GuardOutcome::Continue => Ok(()),
                GuardOutcome::Abort => Err(NavigationError::aborted(format!(
                    "Navigation aborted from '{}' to '{}' via a navigation guard",
                    from.full_path, to.full_path
                ))),
                GuardOutcome::Redirect(target) => {
                    tracing::debug!(
                        from = %from.full_path,
                        to = %to.full_path,
                        redirect = %target.full_path(),
                        "Guard redirected navigation"
                    );
                    Err(NavigationError::redirected(target))
                }
                GuardOutcome::Error(message) => Err(NavigationError::guard(message)),
            }
        })
    })
}
