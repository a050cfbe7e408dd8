//! Tests for the location codec
//!
//! - Property 4: Parsing splits path, query and hash
//! - Property 5: Base stripping

use crate::config::LocationConfig;
use crate::history::{PartialLocation, normalize_location};
use crate::location::{
    LocationCodec, LocationParts, ParsedLocation, parse_url, strip_base, stringify_url,
};
use crate::query::{LocationQuery, QueryValue, parse_query, stringify_query};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_\\-]{1,8}"
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 0..4).prop_map(|segments| {
        format!("/{}", segments.join("/"))
    })
}

#[test]
fn test_parse_plain_path() {
    assert_eq!(
        parse_url(parse_query, "/foo", None),
        ParsedLocation {
            full_path: "/foo".into(),
            path: "/foo".into(),
            query: LocationQuery::new(),
            hash: String::new(),
        }
    );
}

#[test]
fn test_parse_query_values() {
    let parsed = parse_url(parse_query, "/foo?a=one&b=two", None);
    assert_eq!(parsed.path, "/foo");
    assert_eq!(parsed.query.get("a"), Some(&QueryValue::from("one")));
    assert_eq!(parsed.query.get("b"), Some(&QueryValue::from("two")));
}

#[test]
fn test_parse_repeated_query_key() {
    let parsed = parse_url(parse_query, "/foo?a=one&a=two&a=three", None);
    assert_eq!(
        parsed.query.get("a"),
        Some(&QueryValue::list(["one", "two", "three"]))
    );
}

#[test]
fn test_parse_query_and_hash() {
    let parsed = parse_url(parse_query, "/foo?a=one#bar", None);
    assert_eq!(parsed.path, "/foo");
    assert_eq!(parsed.hash, "#bar");
    assert_eq!(parsed.query.get("a"), Some(&QueryValue::from("one")));
    assert_eq!(parsed.full_path, "/foo?a=one#bar");
}

#[test]
fn test_stringify_list_query() {
    let mut query = LocationQuery::new();
    query
        .insert("foo", QueryValue::list(["a1", "a2"]))
        .insert("bar", "b");

    assert_eq!(
        stringify_url(stringify_query, LocationParts::path("/path").with_query(&query)),
        "/path?foo=a1&foo=a2&bar=b"
    );
}

#[test]
fn test_stringify_hash_only() {
    assert_eq!(
        stringify_url(stringify_query, LocationParts::path("/path").with_hash("#hey")),
        "/path#hey"
    );
}

#[test]
fn test_strip_base_examples() {
    assert_eq!(strip_base("", ""), "");
    assert_eq!(strip_base("/", ""), "/");
    assert_eq!(strip_base("/base", "/base"), "/");
    assert_eq!(strip_base("/base/foo", "/base"), "/foo");
}

#[test]
fn test_normalize_location_examples() {
    assert_eq!(normalize_location("/foo"), PartialLocation::new("/foo"));
    assert_eq!(
        normalize_location(PartialLocation::new("/foo")),
        PartialLocation::new("/foo")
    );
}

#[test]
fn test_codec_parse_history_with_base() {
    let codec = LocationCodec::new(LocationConfig::new().with_base("/app")).unwrap();
    let parsed = codec.parse_history("/APP/users?tab=a#top");
    assert_eq!(parsed.path, "/users");
    assert_eq!(parsed.full_path, "/users?tab=a#top");
    assert_eq!(parsed.hash, "#top");

    let untouched = codec.parse_history("/other?x=1");
    assert_eq!(untouched.full_path, "/other?x=1");
}

// =============================================================================
// Property 4: Parsing splits path, query and hash
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Path, query and hash come back exactly as composed
    #[test]
    fn prop_parse_splits_parts(
        path in path_strategy(),
        key in "[a-z]{1,5}",
        value in "[a-z0-9]{0,5}",
        hash in prop::option::of("[a-z0-9]{0,6}")
    ) {
        let hash = hash.map(|hash| format!("#{}", hash)).unwrap_or_default();
        let location = format!("{}?{}={}{}", path, key, value, hash);
        let parsed = parse_url(parse_query, &location, None);

        prop_assert_eq!(&parsed.full_path, &location);
        prop_assert_eq!(&parsed.path, &path);
        prop_assert_eq!(&parsed.hash, &hash);
        prop_assert_eq!(parsed.query.get(&key), Some(&QueryValue::from(value.as_str())));
    }

    /// Serializing the parts of a parsed location reproduces it
    #[test]
    fn prop_stringify_parsed_parts(
        path in path_strategy(),
        pairs in prop::collection::btree_map("[a-z]{1,5}", "[a-z0-9]{0,5}", 0..4),
        hash in prop::option::of("#[a-z0-9]{0,6}")
    ) {
        let mut query = LocationQuery::new();
        for (key, value) in &pairs {
            query.insert(key.as_str(), value.as_str());
        }
        let hash = hash.unwrap_or_default();
        let url = stringify_url(
            stringify_query,
            LocationParts::path(&path).with_query(&query).with_hash(&hash),
        );

        let parsed = parse_url(parse_query, &url, None);
        prop_assert_eq!(&parsed.path, &path);
        prop_assert_eq!(&parsed.query, &query);
        prop_assert_eq!(&parsed.hash, &hash);
    }
}

// =============================================================================
// Property 5: Base stripping
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A base prefix is removed and the rest keeps its leading slash
    #[test]
    fn prop_strip_base_removes_prefix(
        base in path_strategy().prop_filter("non-root base", |base| base != "/"),
        rest in path_strategy()
    ) {
        let pathname = format!("{}{}", base, rest);
        prop_assert_eq!(strip_base(&pathname, &base), rest.as_str());
    }

    /// Paths outside the base are returned unchanged
    #[test]
    fn prop_strip_base_mismatch_unchanged(
        base in "/[a-m]{1,6}",
        pathname in "/[n-z]{1,6}(/[a-z]{1,4})?"
    ) {
        prop_assert_eq!(strip_base(&pathname, &base), pathname.as_str());
    }

    /// An empty base never changes the path
    #[test]
    fn prop_empty_base_identity(pathname in path_strategy()) {
        prop_assert_eq!(strip_base(&pathname, ""), pathname.as_str());
    }
}
