//! Common types for navigation
//!
//! [`RouteLocationNormalized`] is the resolved shape of a navigation's
//! target or origin, as handed to guards.

use crate::location::{ParsedLocation, parse_url};
use crate::params::RouteParams;
use crate::query::{LocationQuery, parse_query};
use crate::record::RouteRecord;
use std::sync::Arc;

/// A location resolved against the matcher.
#[derive(Debug, Clone, Default)]
pub struct RouteLocationNormalized {
    /// Path, query and hash as one string
    pub full_path: String,
    /// Decoded path
    pub path: String,
    /// Parsed query
    pub query: LocationQuery,
    /// Empty or starting with `#`
    pub hash: String,
    /// Name of the deepest matched record
    pub name: Option<String>,
    /// Params extracted by the matcher
    pub params: RouteParams,
    /// Matched records, root first
    pub matched: Vec<Arc<RouteRecord>>,
}

impl RouteLocationNormalized {
    /// Build from a parsed location with no matched records.
    pub fn from_parsed(parsed: ParsedLocation) -> Self {
        Self {
            full_path: parsed.full_path,
            path: parsed.path,
            query: parsed.query,
            hash: parsed.hash,
            ..Self::default()
        }
    }

    /// Parse `location` with the default query dialect.
    pub fn from_path(location: &str) -> Self {
        Self::from_parsed(parse_url(parse_query, location, None))
    }

    /// Attach matched records; the name is taken from the last one.
    pub fn with_matched(mut self, matched: Vec<Arc<RouteRecord>>) -> Self {
        self.name = matched
            .last()
            .and_then(|record| record.name())
            .map(str::to_string);
        self.matched = matched;
        self
    }

    /// Attach params.
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }
}
