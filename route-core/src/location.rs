//! Location string codec
//!
//! Parses location strings into [`ParsedLocation`] and serializes them back.
//!
//! # Parsing
//!
//! ```text
//!   /users/a%20b?tab=posts&tab=likes#top
//!   └────┬─────┘ └─────────┬──────┘ └┬─┘
//!      path           query        hash
//! ```
//!
//! - The hash starts at the first `#` and keeps it; a `?` after `#` belongs
//!   to the hash.
//! - The query is everything between the first `?` and the hash, handed
//!   to the query parser without the `?`.
//! - The path is percent-decoded per segment. `%2F` and `%25` stay encoded.
//!
//! # Example
//! ```rust,ignore
//! use route_core::location::{parse_url, stringify_url};
//! use route_core::query::{parse_query, stringify_query};
//!
//! let parsed = parse_url(parse_query, "/foo?a=one#bar", None);
//! assert_eq!(parsed.path, "/foo");
//! assert_eq!(parsed.hash, "#bar");
//! assert_eq!(stringify_url(stringify_query, parsed.parts()), "/foo?a=one#bar");
//! ```

use crate::config::{ConfigValidationError, LocationConfig};
use crate::query::{DefaultQueryCodec, LocationQuery, QueryCodec};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A fully parsed location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLocation {
    /// The input string as given.
    ///
    /// Exception: when [`parse_url`] resolves a relative path against a
    /// current location, this is rebuilt as resolved path + `?query` + hash.
    pub full_path: String,
    /// Decoded path without query and hash
    pub path: String,
    /// Parsed query
    pub query: LocationQuery,
    /// Empty or starting with `#`
    pub hash: String,
}

impl ParsedLocation {
    /// Borrow the parts needed to serialize this location again.
    pub fn parts(&self) -> LocationParts<'_> {
        LocationParts {
            path: &self.path,
            query: Some(&self.query),
            hash: Some(&self.hash),
        }
    }
}

/// Borrowed input for [`stringify_url`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationParts<'a> {
    /// Path, emitted verbatim
    pub path: &'a str,
    /// Optional query
    pub query: Option<&'a LocationQuery>,
    /// Optional hash, including its `#`
    pub hash: Option<&'a str>,
}

impl<'a> LocationParts<'a> {
    /// Parts with only a path.
    pub fn path(path: &'a str) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Attach a query.
    pub fn with_query(mut self, query: &'a LocationQuery) -> Self {
        self.query = Some(query);
        self
    }

    /// Attach a hash.
    pub fn with_hash(mut self, hash: &'a str) -> Self {
        self.hash = Some(hash);
        self
    }
}

/// Parse a location string.
///
/// `parse_query` receives the exact text between `?` and `#` and is only
/// called when a `?` is present. When `current_location` is given, a
/// relative path is resolved against it first and `full_path` is rebuilt
/// from the resolved path; otherwise `full_path` is the input string.
pub fn parse_url<F>(parse_query: F, location: &str, current_location: Option<&str>) -> ParsedLocation
where
    F: FnOnce(&str) -> LocationQuery,
{
    let (before_hash, hash) = match location.find('#') {
        Some(index) => location.split_at(index),
        None => (location, ""),
    };
    let (raw_path, search) = match before_hash.split_once('?') {
        Some((path, search)) => (path, Some(search)),
        None => (before_hash, None),
    };

    let query = search.map(parse_query).unwrap_or_default();

    let resolved: Cow<'_, str> = match current_location {
        Some(from) => Cow::Owned(resolve_relative_path(raw_path, from)),
        None => Cow::Borrowed(raw_path),
    };

    let full_path = if resolved == raw_path {
        location.to_string()
    } else {
        let mut full_path = resolved.to_string();
        if let Some(search) = search {
            full_path.push('?');
            full_path.push_str(search);
        }
        full_path.push_str(hash);
        full_path
    };

    ParsedLocation {
        full_path,
        path: decode_path(&resolved),
        query,
        hash: hash.to_string(),
    }
}

/// Serialize a location.
///
/// `stringify_query` is only called when a query is present; an empty
/// result adds no `?`. The hash is appended verbatim.
pub fn stringify_url<F>(stringify_query: F, location: LocationParts<'_>) -> String
where
    F: FnOnce(&LocationQuery) -> String,
{
    let query = location.query.map(stringify_query).unwrap_or_default();
    let hash = location.hash.unwrap_or_default();

    let mut url = String::with_capacity(location.path.len() + query.len() + hash.len() + 1);
    url.push_str(location.path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url.push_str(hash);
    url
}

/// Remove `base` from the start of `pathname`.
///
/// The prefix comparison ignores ASCII case. A pathname equal to the base
/// (with or without one trailing `/`) becomes `/`; repeated slashes right
/// after the base collapse into one. A pathname that does not start with
/// the base is returned unchanged.
pub fn strip_base<'a>(pathname: &'a str, base: &str) -> &'a str {
    if base.is_empty() {
        return pathname;
    }
    let Some(prefix) = pathname.get(..base.len()) else {
        return pathname;
    };
    if !prefix.eq_ignore_ascii_case(base) {
        return pathname;
    }

    let rest = &pathname[base.len()..];
    if rest.is_empty() {
        return "/";
    }
    let trimmed = rest.trim_start_matches('/');
    if trimmed.len() == rest.len() {
        rest
    } else {
        &rest[rest.len() - trimmed.len() - 1..]
    }
}

/// Resolve `to` against the absolute path `from`.
///
/// `.` and `..` segments are applied to the directory of `from` and never
/// climb above the root.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(resolve_relative_path("alice", "/users/bob"), "/users/alice");
/// assert_eq!(resolve_relative_path("../about", "/users/bob"), "/about");
/// ```
pub fn resolve_relative_path(to: &str, from: &str) -> String {
    if to.starts_with('/') {
        return to.to_string();
    }
    if !from.starts_with('/') {
        tracing::warn!(
            to = %to,
            from = %from,
            "Cannot resolve a relative location without an absolute location"
        );
        return to.to_string();
    }
    if to.is_empty() {
        return from.to_string();
    }

    let from_segments: Vec<&str> = from.split('/').collect();
    let mut to_segments: Vec<&str> = to.split('/').collect();

    // "." and ".." behave like "./" and "../"
    if matches!(to_segments.last(), Some(&".") | Some(&"..")) {
        to_segments.push("");
    }

    let mut position = from_segments.len() - 1;
    let mut to_position = 0;
    while to_position < to_segments.len() {
        match to_segments[to_position] {
            "." => {}
            ".." => {
                if position > 1 {
                    position -= 1;
                }
            }
            _ => break,
        }
        to_position += 1;
    }

    format!(
        "{}/{}",
        from_segments[..position].join("/"),
        to_segments[to_position..].join("/")
    )
}

/// Percent-decode a path segment by segment.
///
/// `%2F` and `%25` are kept as written, so an encoded slash never collides
/// with an encoded literal `%2F` (`%252F`).
pub fn decode_path(path: &str) -> String {
    path.split('/')
        .map(decode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn decode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') {
        return Cow::Borrowed(segment);
    }

    let mut decoded = String::with_capacity(segment.len());
    let mut rest = segment;
    loop {
        let (piece, kept) = match find_kept_escape(rest) {
            Some(index) => (&rest[..index], Some(&rest[index..index + 3])),
            None => (rest, None),
        };
        match percent_decode_str(piece).decode_utf8() {
            Ok(text) => decoded.push_str(&text),
            Err(err) => {
                tracing::trace!(segment = %segment, error = %err, "Keeping undecodable path segment");
                return Cow::Borrowed(segment);
            }
        }
        match kept {
            Some(escape) => {
                decoded.push_str(escape);
                rest = &rest[piece.len() + 3..];
            }
            None => return Cow::Owned(decoded),
        }
    }
}

/// Byte index of the first `%2F` or `%25` escape, in either case.
fn find_kept_escape(text: &str) -> Option<usize> {
    text.as_bytes().windows(3).position(|window| {
        window[0] == b'%'
            && (window[1..].eq_ignore_ascii_case(b"2F") || window[1..].eq_ignore_ascii_case(b"25"))
    })
}

/// Location codec bound to a configuration and a query dialect.
///
/// # Example
/// ```rust,ignore
/// use route_core::{LocationCodec, LocationConfig};
///
/// let codec = LocationCodec::new(LocationConfig::new().with_base("/app"))?;
/// let location = codec.parse_history("/app/users?page=2");
/// assert_eq!(location.path, "/users");
/// ```
#[derive(Debug, Clone)]
pub struct LocationCodec<Q: QueryCodec = DefaultQueryCodec> {
    config: LocationConfig,
    query_codec: Q,
}

impl LocationCodec<DefaultQueryCodec> {
    /// Create a codec using the default query dialect.
    pub fn new(config: LocationConfig) -> Result<Self, ConfigValidationError> {
        Self::with_query_codec(config, DefaultQueryCodec)
    }
}

impl<Q: QueryCodec> LocationCodec<Q> {
    /// Create a codec with a custom query dialect.
    pub fn with_query_codec(
        config: LocationConfig,
        query_codec: Q,
    ) -> Result<Self, ConfigValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            query_codec,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &LocationConfig {
        &self.config
    }

    /// The active query dialect.
    pub fn query_codec(&self) -> &Q {
        &self.query_codec
    }

    /// Parse a location string.
    pub fn parse(&self, location: &str) -> ParsedLocation {
        self.parse_relative(location, None)
    }

    /// Parse a location string, resolving a relative path against `current`.
    pub fn parse_relative(&self, location: &str, current: Option<&str>) -> ParsedLocation {
        let parsed = parse_url(|search| self.query_codec.parse(search), location, current);
        if self.config.debug_logging {
            tracing::trace!(
                input = %location,
                path = %parsed.path,
                query_keys = parsed.query.len(),
                hash = %parsed.hash,
                "Parsed location"
            );
        }
        parsed
    }

    /// Serialize a location.
    pub fn stringify(&self, location: LocationParts<'_>) -> String {
        stringify_url(|query| self.query_codec.stringify(query), location)
    }

    /// Remove the configured base from `pathname`.
    pub fn strip_base<'a>(&self, pathname: &'a str) -> &'a str {
        strip_base(pathname, &self.config.base)
    }

    /// Parse a raw history location, removing the configured base from its
    /// path first.
    ///
    /// A base containing `#` (such as `/app/#`) selects hash mode: whatever
    /// follows the base is the location, so `/app/#/users?x=1` parses as
    /// `/users?x=1`. A raw location that only carries the part of the base
    /// before `#` resolves against that part as in the default mode.
    pub fn parse_history(&self, raw: &str) -> ParsedLocation {
        let base = self.config.base.as_str();
        match base.find('#') {
            Some(index) => self.parse_hash_history(raw, base, &base[..index]),
            None => self.parse_path_history(raw, base),
        }
    }

    fn parse_path_history(&self, raw: &str, base: &str) -> ParsedLocation {
        let split = raw.find(['?', '#']).unwrap_or(raw.len());
        let (pathname, rest) = raw.split_at(split);
        let stripped = strip_base(pathname, base);
        if stripped.len() == pathname.len() {
            return self.parse(raw);
        }
        self.parse(&format!("{}{}", stripped, rest))
    }

    fn parse_hash_history(&self, raw: &str, base: &str, path_base: &str) -> ParsedLocation {
        let matches_base = raw
            .get(..base.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(base));
        if !matches_base {
            return self.parse_path_history(raw, path_base.trim_end_matches('/'));
        }

        let location = &raw[base.len()..];
        if location.starts_with('/') {
            self.parse(location)
        } else {
            self.parse(&format!("/{}", location))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryValue, parse_query, stringify_query};

    #[test]
    fn test_parse_without_query_or_hash() {
        let parsed = parse_url(parse_query, "/foo", None);
        assert_eq!(
            parsed,
            ParsedLocation {
                full_path: "/foo".into(),
                path: "/foo".into(),
                query: LocationQuery::new(),
                hash: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_query_only_called_with_search() {
        let mut calls = Vec::new();
        parse_url(
            |search| {
                calls.push(search.to_string());
                LocationQuery::new()
            },
            "/?é=é&é=a",
            None,
        );
        assert_eq!(calls, vec!["é=é&é=a".to_string()]);

        let mut called = false;
        parse_url(
            |_| {
                called = true;
                LocationQuery::new()
            },
            "/no-query#hash",
            None,
        );
        assert!(!called);
    }

    #[test]
    fn test_question_mark_after_hash_belongs_to_hash() {
        let parsed = parse_url(parse_query, "/foo#bar?baz=1", None);
        assert_eq!(parsed.path, "/foo");
        assert_eq!(parsed.hash, "#bar?baz=1");
        assert!(parsed.query.is_empty());
    }

    #[test]
    fn test_path_decoding_keeps_encoded_slash() {
        let parsed = parse_url(parse_query, "/a%20b/c%2Fd/%E2%82%AC", None);
        assert_eq!(parsed.path, "/a b/c%2Fd/€");
        assert_eq!(parsed.full_path, "/a%20b/c%2Fd/%E2%82%AC");
    }

    #[test]
    fn test_path_decoding_keeps_encoded_percent() {
        let slash = parse_url(parse_query, "/a%2Fb", None);
        let literal = parse_url(parse_query, "/a%252Fb", None);
        assert_eq!(slash.path, "/a%2Fb");
        assert_eq!(literal.path, "/a%252Fb");
        assert_ne!(slash.path, literal.path);

        assert_eq!(parse_url(parse_query, "/100%25/x%2fy%C3%A9", None).path, "/100%25/x%2fyé");
    }

    #[test]
    fn test_path_decoding_invalid_utf8_stays_raw() {
        let parsed = parse_url(parse_query, "/bad/%FF", None);
        assert_eq!(parsed.path, "/bad/%FF");
    }

    #[test]
    fn test_parse_relative_rebuilds_full_path() {
        let parsed = parse_url(parse_query, "../b?x=1#h", Some("/a/c/d"));
        assert_eq!(parsed.path, "/a/b");
        assert_eq!(parsed.full_path, "/a/b?x=1#h");
        assert_eq!(parsed.query.get("x"), Some(&QueryValue::from("1")));

        let absolute = parse_url(parse_query, "/z", Some("/a/c"));
        assert_eq!(absolute.full_path, "/z");
    }

    #[test]
    fn test_stringify_calls_query_only_when_present() {
        let mut query = LocationQuery::new();
        query.insert("é", "é").insert("b", "a");
        let mut seen = None;
        stringify_url(
            |q| {
                seen = Some(q.clone());
                String::new()
            },
            LocationParts::path("/").with_query(&query),
        );
        assert_eq!(seen, Some(query));

        assert_eq!(
            stringify_url(|_| unreachable!(), LocationParts::path("/some-path")),
            "/some-path"
        );
    }

    #[test]
    fn test_stringify_empty_query_adds_no_question_mark() {
        let query = LocationQuery::new();
        assert_eq!(
            stringify_url(stringify_query, LocationParts::path("/p").with_query(&query)),
            "/p"
        );
    }

    #[test]
    fn test_strip_base_edge_cases() {
        assert_eq!(strip_base("/base//foo", "/base"), "/foo");
        assert_eq!(strip_base("/BASE/foo", "/base"), "/foo");
        assert_eq!(strip_base("/basefoo", "/base"), "foo");
        assert_eq!(strip_base("/other", "/base"), "/other");
        assert_eq!(strip_base("/ba", "/base"), "/ba");
        assert_eq!(strip_base("/é", "/a"), "/é");
    }

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(resolve_relative_path("/abs", "/a/b"), "/abs");
        assert_eq!(resolve_relative_path("", "/a/b"), "/a/b");
        assert_eq!(resolve_relative_path("c", "/a/b"), "/a/c");
        assert_eq!(resolve_relative_path("./c", "/a/b"), "/a/c");
        assert_eq!(resolve_relative_path(".", "/a/b"), "/a/");
        assert_eq!(resolve_relative_path("..", "/a/b"), "/");
        assert_eq!(resolve_relative_path("../c", "/a/b/d"), "/a/c");
        assert_eq!(resolve_relative_path("../../../../c", "/a/b"), "/c");
        assert_eq!(resolve_relative_path("c", "relative"), "c");
    }

    #[test]
    fn test_codec_parse_history_strips_base() {
        let codec = LocationCodec::new(LocationConfig::new().with_base("/app")).unwrap();
        let parsed = codec.parse_history("/app/users?page=2#top");
        assert_eq!(parsed.path, "/users");
        assert_eq!(parsed.full_path, "/users?page=2#top");
        assert_eq!(parsed.hash, "#top");

        let root = codec.parse_history("/app?x");
        assert_eq!(root.path, "/");
        assert_eq!(root.query.get("x"), Some(&QueryValue::Null));

        let outside = codec.parse_history("/elsewhere");
        assert_eq!(outside.full_path, "/elsewhere");
    }

    #[test]
    fn test_codec_parse_history_hash_base() {
        let codec = LocationCodec::new(LocationConfig::new().with_base("/app/#")).unwrap();

        let parsed = codec.parse_history("/app/#/users?x=1#section");
        assert_eq!(parsed.path, "/users");
        assert_eq!(parsed.full_path, "/users?x=1#section");
        assert_eq!(parsed.query.get("x"), Some(&QueryValue::from("1")));
        assert_eq!(parsed.hash, "#section");

        assert_eq!(codec.parse_history("/app/#").path, "/");
        assert_eq!(codec.parse_history("/app/#users").path, "/users");
        assert_eq!(codec.parse_history("/app/").path, "/");
        assert_eq!(codec.parse_history("/APP").path, "/");
        assert_eq!(codec.parse_history("/other?y").full_path, "/other?y");
    }

    #[test]
    fn test_codec_rejects_invalid_config() {
        let result = LocationCodec::new(LocationConfig::new().with_base("app/"));
        assert!(result.is_err());
    }

    #[test]
    fn test_codec_round_trip() {
        let codec = LocationCodec::new(LocationConfig::new().with_debug_logging(true)).unwrap();
        let parsed = codec.parse("/path?foo=a1&foo=a2&bar=b#hey");
        assert_eq!(codec.stringify(parsed.parts()), parsed.full_path);
    }
}
