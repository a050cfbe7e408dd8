//! Configuration for location handling.
//!
//! This module provides the [`LocationConfig`] struct consumed by
//! [`LocationCodec`](crate::location::LocationCodec).
//!
//! # Example
//! ```rust,ignore
//! use route_core::{LocationConfig, normalize_base};
//!
//! let config = LocationConfig::new()
//!     .with_base(normalize_base("https://example.com/app/"))
//!     .with_debug_logging(true);
//! assert_eq!(config.base, "/app");
//! config.validate().expect("Config should be valid");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigValidationError {
    /// base must be empty or start with '/'
    BaseMissingLeadingSlash(String),
    /// base must not end with '/'
    BaseTrailingSlash(String),
    /// base must not contain a query string
    BaseContainsQuery(String),
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseMissingLeadingSlash(base) => {
                write!(f, "base '{}' must be empty or start with '/'", base)
            }
            Self::BaseTrailingSlash(base) => {
                write!(f, "base '{}' must not end with '/'", base)
            }
            Self::BaseContainsQuery(base) => {
                write!(f, "base '{}' must not contain '?'", base)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Location handling configuration.
///
/// # Fields
///
/// * `base` - Path prefix stripped from every incoming history location
///   before parsing. Empty means no prefix. Use [`normalize_base`] to turn
///   user input into a valid value. Default: empty.
///
/// * `debug_logging` - Emit a trace event for every parsed location.
///   Default: false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Path prefix stripped from incoming locations (default: empty)
    pub base: String,
    /// Enable debug logging (default: false)
    pub debug_logging: bool,
}

impl LocationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return an error if invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is non-empty and:
    /// - does not start with `/`
    /// - ends with `/`
    /// - contains `?`
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let base = &self.base;
        if base.is_empty() {
            return Ok(());
        }
        if !base.starts_with('/') {
            return Err(ConfigValidationError::BaseMissingLeadingSlash(base.clone()));
        }
        if base.ends_with('/') {
            return Err(ConfigValidationError::BaseTrailingSlash(base.clone()));
        }
        if base.contains('?') {
            return Err(ConfigValidationError::BaseContainsQuery(base.clone()));
        }
        Ok(())
    }

    /// Set the base path prefix.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Enable or disable debug logging.
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }
}

/// Turn a user-supplied base into the form [`LocationConfig::validate`]
/// accepts.
///
/// A leading `scheme://host` is dropped, a missing leading `/` is added and
/// trailing slashes are removed, so `/` and the empty string both map to an
/// empty base.
pub fn normalize_base(raw: &str) -> String {
    let without_origin = match raw.split_once("://") {
        Some((scheme, rest))
            if !scheme.is_empty() && scheme.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            rest.find('/').map_or("", |index| &rest[index..])
        }
        _ => raw,
    };

    let trimmed = without_origin.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
