//! Query string codec
//!
//! Bidirectional mapping between a query string and a [`LocationQuery`].
//!
//! # Conventions
//!
//! - [`parse_query`] accepts input with or without a single leading `?`.
//! - [`stringify_query`] never emits a leading `?`.
//! - `+` decodes to a space and spaces encode as `+`; a literal `+` is
//!   encoded as `%2B`.
//! - Decoding never fails: a component whose percent-decoding is not valid
//!   UTF-8 is kept as the raw substring.
//!
//! # Example
//! ```rust,ignore
//! use route_core::query::{parse_query, stringify_query, QueryValue};
//!
//! let query = parse_query("a=one&a=two&flag");
//! assert_eq!(query.get("a"), Some(&QueryValue::list(["one", "two"])));
//! assert_eq!(query.get("flag"), Some(&QueryValue::Null));
//! assert_eq!(stringify_query(&query), "a=one&a=two&flag");
//! ```

use indexmap::IndexMap;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Bytes escaped in query keys and values.
const QUERY_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Value stored under one query key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// Key present without `=`
    Null,
    /// Key present once with a value (possibly empty)
    Value(String),
    /// Key repeated; `None` elements are occurrences without `=`
    List(Vec<Option<String>>),
}

impl QueryValue {
    /// Build a list value from plain strings.
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|item| Some(item.into())).collect())
    }

    /// Returns true for [`QueryValue::List`].
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the first value, if any occurrence carried one.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Null => None,
            Self::Value(value) => Some(value),
            Self::List(items) => items.first().and_then(|item| item.as_deref()),
        }
    }

    /// Accumulate another occurrence of the same key.
    fn push(self, next: Option<String>) -> Self {
        match self {
            Self::Null => Self::List(vec![None, next]),
            Self::Value(value) => Self::List(vec![Some(value), next]),
            Self::List(mut items) => {
                items.push(next);
                Self::List(items)
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<Option<String>> for QueryValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

/// Ordered query mapping.
///
/// Iteration follows first-seen key order, which is the order used when
/// serializing. Equality (`==`) ignores key order; use
/// [`is_same_location_object`](crate::equality::is_same_location_object)
/// for the positional comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationQuery(IndexMap<String, QueryValue>);

impl LocationQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, keeping the key's original position if present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Record one more occurrence of `key`.
    ///
    /// The first occurrence stores a scalar; later ones turn it into a list.
    pub fn append(&mut self, key: impl Into<String>, value: Option<String>) -> &mut Self {
        let key = key.into();
        match self.0.get_mut(&key) {
            Some(current) => {
                let previous = std::mem::replace(current, QueryValue::Null);
                *current = previous.push(value);
            }
            None => {
                self.0.insert(key, QueryValue::from(value));
            }
        }
        self
    }

    /// Borrow the underlying ordered map.
    pub fn as_map(&self) -> &IndexMap<String, QueryValue> {
        &self.0
    }
}

impl Deref for LocationQuery {
    type Target = IndexMap<String, QueryValue>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Into<String>> FromIterator<(K, QueryValue)> for LocationQuery {
    fn from_iter<I: IntoIterator<Item = (K, QueryValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Entries whose value is `None` are dropped, so an "undefined" value never
/// reaches the serialized output.
impl<K: Into<String>> FromIterator<(K, Option<QueryValue>)> for LocationQuery {
    fn from_iter<I: IntoIterator<Item = (K, Option<QueryValue>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter_map(|(k, v)| v.map(|v| (k.into(), v)))
                .collect(),
        )
    }
}

/// Pluggable query dialect.
///
/// Implementations must round-trip: `parse(&stringify(q))` equals `q` for
/// queries without single-element or empty lists.
pub trait QueryCodec: Send + Sync {
    /// Parse a query string (with or without a leading `?`).
    fn parse(&self, search: &str) -> LocationQuery;

    /// Serialize a query without a leading `?`.
    fn stringify(&self, query: &LocationQuery) -> String;
}

/// The default `key=value&key=value` dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultQueryCodec;

impl QueryCodec for DefaultQueryCodec {
    fn parse(&self, search: &str) -> LocationQuery {
        parse_query(search)
    }

    fn stringify(&self, query: &LocationQuery) -> String {
        stringify_query(query)
    }
}

/// Parse a query string into a [`LocationQuery`].
///
/// Each `&`-separated segment is split on its first `=`. A segment without
/// `=` yields a null value, `key=` yields an empty string. Empty segments
/// are skipped.
pub fn parse_query(search: &str) -> LocationQuery {
    let mut query = LocationQuery::new();
    let search = search.strip_prefix('?').unwrap_or(search);

    for segment in search.split('&').filter(|segment| !segment.is_empty()) {
        let (raw_key, raw_value) = match segment.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (segment, None),
        };
        query.append(decode(raw_key), raw_value.map(decode));
    }

    query
}

/// Serialize a [`LocationQuery`] without a leading `?`.
///
/// Lists emit one pair per element; empty lists emit nothing.
pub fn stringify_query(query: &LocationQuery) -> String {
    let mut pairs = Vec::with_capacity(query.len());

    for (key, value) in query.iter() {
        let key = encode(key);
        match value {
            QueryValue::Null => pairs.push(key),
            QueryValue::Value(value) => pairs.push(format!("{}={}", key, encode(value))),
            QueryValue::List(items) => {
                for item in items {
                    match item {
                        Some(value) => pairs.push(format!("{}={}", key, encode(value))),
                        None => pairs.push(key.clone()),
                    }
                }
            }
        }
    }

    pairs.join("&")
}

/// Percent-encode a query key or value.
pub fn encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

/// Decode a query key or value, falling back to the raw text.
pub fn decode(text: &str) -> String {
    let spaced = text.replace('+', " ");
    match percent_decode_str(&spaced).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(err) => {
            tracing::trace!(text = %text, error = %err, "Keeping undecodable query component");
            text.to_string()
        }
    }
}
