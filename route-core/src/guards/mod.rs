//! Navigation guards
//!
//! This module turns matched route records into an ordered list of guard
//! thunks and provides the helpers to run them.
//!
//! # Pipeline
//!
//! ```text
//!  matched records ──► extract_components_guards ──► Vec<GuardThunk>
//!                        │  lazy slot: loader invoked now,        │
//!                        │  awaited inside the thunk              ▼
//!                        │                               run_guard_queue
//!                        └─ resolved slot: guard looked   (in order, stops
//!                           up now                         at first error)
//! ```
//!
//! # Example
//! ```rust,ignore
//! use route_core::prelude::*;
//!
//! let component = Component::new("Admin").with_guard(
//!     GuardKind::BeforeRouteEnter,
//!     guard_fn(|to, _from, _instance| async move {
//!         if to.path.starts_with("/admin") {
//!             GuardOutcome::Redirect("/login".into())
//!         } else {
//!             GuardOutcome::Continue
//!         }
//!     }),
//! );
//!
//! let guards = extract_components_guards(&matched, GuardKind::BeforeRouteEnter, &to, &from);
//! run_guard_queue(guards).await?;
//! ```

mod adapter;
mod changes;
mod extract;
mod queue;

pub use adapter::{GuardThunk, NavigationFuture, guard_to_thunk};
pub use changes::{ChangingRecords, extract_changing_records};
pub use extract::{extract_components_guards, load_route_location};
pub use queue::{chain_guards, run_guard_queue};

use crate::history::RawLocation;
use crate::record::ComponentInstance;
use crate::types::RouteLocationNormalized;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Lifecycle guard a component can declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardKind {
    /// Called before the component's route is entered
    #[serde(rename = "beforeRouteEnter")]
    BeforeRouteEnter,
    /// Called when the route changes but the component is reused
    #[serde(rename = "beforeRouteUpdate")]
    BeforeRouteUpdate,
    /// Called before the component's route is left
    #[serde(rename = "beforeRouteLeave")]
    BeforeRouteLeave,
}

impl GuardKind {
    /// Key under which the guard is declared.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeRouteEnter => "beforeRouteEnter",
            Self::BeforeRouteUpdate => "beforeRouteUpdate",
            Self::BeforeRouteLeave => "beforeRouteLeave",
        }
    }
}

impl std::fmt::Display for GuardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decision returned by a guard.
#[derive(Clone, Debug, PartialEq)]
pub enum GuardOutcome {
    /// Let the navigation proceed
    Continue,
    /// Cancel the navigation
    Abort,
    /// Cancel the navigation and go elsewhere
    Redirect(RawLocation),
    /// Fail the navigation with an error
    Error(String),
}

impl From<bool> for GuardOutcome {
    fn from(allow: bool) -> Self {
        if allow { Self::Continue } else { Self::Abort }
    }
}

/// Future returned by a guard.
pub type GuardFuture = Pin<Box<dyn Future<Output = GuardOutcome> + Send>>;

/// Guard function, called with `(to, from, instance)`.
pub type NavigationGuard = Arc<
    dyn Fn(
            Arc<RouteLocationNormalized>,
            Arc<RouteLocationNormalized>,
            Option<ComponentInstance>,
        ) -> GuardFuture
        + Send
        + Sync,
>;

/// Create a guard from an async function.
pub fn guard_fn<F, Fut>(f: F) -> NavigationGuard
where
    F: Fn(Arc<RouteLocationNormalized>, Arc<RouteLocationNormalized>, Option<ComponentInstance>) -> Fut
        + Send
        + Sync
        + 'static,
    Fut: Future<Output = GuardOutcome> + Send + 'static,
{
    Arc::new(move |to, from, instance| -> GuardFuture { Box::pin(f(to, from, instance)) })
}

/// Create a guard from a synchronous function.
///
/// # Example
/// ```rust,ignore
/// let guard = sync_guard(|to, _from, _instance| !to.path.starts_with("/private"));
/// ```
pub fn sync_guard<F, O>(f: F) -> NavigationGuard
where
    F: Fn(&RouteLocationNormalized, &RouteLocationNormalized, Option<&ComponentInstance>) -> O
        + Send
        + Sync
        + 'static,
    O: Into<GuardOutcome>,
{
    Arc::new(move |to, from, instance| -> GuardFuture {
        let outcome = f(to.as_ref(), from.as_ref(), instance.as_ref()).into();
        Box::pin(std::future::ready(outcome))
    })
}
