//! History location normalization
//!
//! History backends and callers hand locations to the router either as raw
//! strings or as partially structured objects. [`normalize_location`] turns
//! both into a [`PartialLocation`] that always carries a `full_path`.

use crate::query::LocationQuery;
use serde::{Deserialize, Serialize};

/// A location supplied by a caller or history backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLocation {
    /// A raw location string (`/path?query#hash`)
    Path(String),
    /// A partially structured location
    Object(PartialLocation),
}

impl RawLocation {
    /// The full path carried by this location.
    pub fn full_path(&self) -> &str {
        match self {
            Self::Path(path) => path,
            Self::Object(location) => &location.full_path,
        }
    }
}

impl From<&str> for RawLocation {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<String> for RawLocation {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<PartialLocation> for RawLocation {
    fn from(location: PartialLocation) -> Self {
        Self::Object(location)
    }
}

/// Location with a guaranteed `full_path`.
///
/// Every other field is optional and passed through untouched by
/// [`normalize_location`]. Deriving `full_path` from `path`, `query` and
/// `hash` is the router's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialLocation {
    /// Path, query and hash as one string
    pub full_path: String,
    /// Path without query and hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Parsed query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<LocationQuery>,
    /// Hash including its leading `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// History state attached to the entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<serde_json::Value>,
}

impl PartialLocation {
    /// Create a location carrying only `full_path`.
    pub fn new(full_path: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            ..Self::default()
        }
    }

    /// Attach history state.
    pub fn with_state(mut self, state: serde_json::Value) -> Self {
        self.state = Some(state);
        self
    }
}

/// Normalize a string or partial object into a [`PartialLocation`].
///
/// Strings become `{ full_path }`. Objects are moved through as-is, so any
/// extra fields (query, state, ...) keep their values without being cloned.
///
/// # Example
/// ```rust,ignore
/// use route_core::history::{normalize_location, PartialLocation};
///
/// assert_eq!(normalize_location("/foo"), PartialLocation::new("/foo"));
/// ```
pub fn normalize_location(raw: impl Into<RawLocation>) -> PartialLocation {
    match raw.into() {
        RawLocation::Path(full_path) => PartialLocation::new(full_path),
        RawLocation::Object(location) => location,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryValue;

    #[test]
    fn test_normalize_string() {
        assert_eq!(normalize_location("/foo"), PartialLocation::new("/foo"));
    }

    #[test]
    fn test_normalize_object() {
        assert_eq!(
            normalize_location(PartialLocation::new("/foo")),
            PartialLocation::new("/foo")
        );
    }

    #[test]
    fn test_normalize_object_passes_fields_through() {
        let mut query = LocationQuery::new();
        query.insert("a", "1");
        let location = PartialLocation {
            full_path: "/foo?a=1".into(),
            query: Some(query),
            ..PartialLocation::default()
        }
        .with_state(serde_json::json!({ "scroll": 120 }));

        let normalized = normalize_location(location);

        assert_eq!(normalized.full_path, "/foo?a=1");
        assert_eq!(
            normalized.query.as_ref().and_then(|q| q.get("a")),
            Some(&QueryValue::from("1"))
        );
        assert_eq!(normalized.state, Some(serde_json::json!({ "scroll": 120 })));
    }

    #[test]
    fn test_raw_location_serde_shapes() {
        let raw: RawLocation = serde_json::from_str("\"/foo\"").unwrap();
        assert_eq!(raw, RawLocation::from("/foo"));

        let raw: RawLocation = serde_json::from_str(r##"{"fullPath":"/bar","hash":"#x"}"##).unwrap();
        assert_eq!(raw.full_path(), "/bar");
        assert_eq!(
            serde_json::to_value(&raw).unwrap(),
            serde_json::json!({ "fullPath": "/bar", "hash": "#x" })
        );
    }
}
