//! Error types for navigation
//!
//! This module provides typed failures for the guard pipeline.
//!
//! # Failure Kinds
//!
//! Failures are categorized by [`NavigationFailureKind`]. When serialized,
//! kinds are converted to SCREAMING_SNAKE_CASE strings.
//!
//! A component that fails to load is reported as
//! [`NavigationFailureKind::ComponentFetch`], which is never confused with a
//! guard declining the navigation (`Aborted`, `Redirected`, `GuardError`).
//!
//! # Example
//! ```rust,ignore
//! use route_core::{NavigationError, NavigationFailureKind};
//!
//! let error = NavigationError::new(NavigationFailureKind::Aborted, "Navigation aborted");
//! let error = NavigationError::aborted("Navigation aborted"); // Convenience method
//! ```

use crate::history::RawLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Type-safe failure kinds for a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavigationFailureKind {
    /// A lazily loaded component could not be fetched
    ComponentFetch,
    /// A guard declined the navigation
    Aborted,
    /// A guard redirected to another location
    Redirected,
    /// A newer navigation superseded this one.
    ///
    /// Never produced by this crate, which has no cancellation signal. The
    /// navigation controller raises it when it discards a stale result.
    Cancelled,
    /// A guard failed with its own error
    GuardError,
}

impl NavigationFailureKind {
    /// Returns the string representation of the failure kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ComponentFetch => "COMPONENT_FETCH",
            Self::Aborted => "ABORTED",
            Self::Redirected => "REDIRECTED",
            Self::Cancelled => "CANCELLED",
            Self::GuardError => "GUARD_ERROR",
        }
    }

    /// Returns true if the failure was produced by a guard's own decision.
    pub fn is_guard_outcome(&self) -> bool {
        matches!(self, Self::Aborted | Self::Redirected | Self::GuardError)
    }
}

impl fmt::Display for NavigationFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Navigation failure with a typed kind and message.
///
/// Returned by guard thunks and propagated verbatim by
/// [`run_guard_queue`](crate::guards::run_guard_queue).
///
/// # Example
/// ```rust,ignore
/// use route_core::{NavigationError, RawLocation};
///
/// let error = NavigationError::redirected(RawLocation::from("/login"));
/// assert!(error.redirect.is_some());
///
/// let error = NavigationError::component_fetch("Home", "default")
///     .with_cause("chunk request returned 404");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("[{kind}] {message}")]
pub struct NavigationError {
    /// Failure kind
    pub kind: NavigationFailureKind,
    /// Human-readable message
    pub message: String,
    /// Target location when a guard redirected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RawLocation>,
    /// Optional cause for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl NavigationError {
    /// Create a new error with kind and message.
    pub fn new(kind: NavigationFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            redirect: None,
            cause: None,
        }
    }

    /// Add a cause string for debugging.
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns true if a guard declined, redirected or failed.
    pub fn is_guard_outcome(&self) -> bool {
        self.kind.is_guard_outcome()
    }

    // Convenience constructors

    /// Create a COMPONENT_FETCH error for the given record and view slot.
    pub fn component_fetch(record: &str, slot: &str) -> Self {
        Self::new(
            NavigationFailureKind::ComponentFetch,
            format!(
                "Failed to fetch component '{}' of route record '{}'",
                slot, record
            ),
        )
    }

    /// Create an ABORTED error.
    pub fn aborted(message: impl Into<String>) -> Self {
        Self::new(NavigationFailureKind::Aborted, message)
    }

    /// Create a REDIRECTED error pointing at `to`.
    pub fn redirected(to: RawLocation) -> Self {
        let mut error = Self::new(
            NavigationFailureKind::Redirected,
            format!("Redirected to '{}'", to.full_path()),
        );
        error.redirect = Some(to);
        error
    }

    /// Create a CANCELLED error.
    ///
    /// For the navigation controller; guard thunks never return this kind.
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(NavigationFailureKind::Cancelled, message)
    }

    /// Create a GUARD_ERROR error.
    pub fn guard(message: impl Into<String>) -> Self {
        Self::new(NavigationFailureKind::GuardError, message)
    }
}

/// Error returned by a component loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("component load failed: {message}")]
pub struct ComponentLoadError {
    /// Reason reported by the loader
    pub message: String,
}

impl ComponentLoadError {
    /// Create a load error with the given reason.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type alias for navigation operations.
pub type NavigationResult<T> = Result<T, NavigationError>;
