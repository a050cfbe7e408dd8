//! Equality helpers
//!
//! Structural comparisons used to detect navigations that would not change
//! anything.
//!
//! [`is_same_location_object`] is positional: two mappings with the same
//! entries in a different key order compare unequal. Callers that need an
//! order-independent comparison must canonicalize key order first.

use crate::params::{ParamValue, RouteParams};
use crate::query::{LocationQuery, QueryValue};
use crate::record::RouteRecord;
use crate::types::RouteLocationNormalized;
use indexmap::IndexMap;
use std::sync::Arc;

/// Value type of a query or param mapping.
pub trait LocationObjectValue {
    /// Compare two values: lists element-wise and in order, scalars
    /// directly. A list never equals a scalar.
    fn is_same_value(&self, other: &Self) -> bool;
}

impl LocationObjectValue for QueryValue {
    fn is_same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            (Self::List(_), _) | (_, Self::List(_)) => false,
            (a, b) => a == b,
        }
    }
}

impl LocationObjectValue for ParamValue {
    fn is_same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Repeated(a), Self::Repeated(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
            }
            (Self::Single(a), Self::Single(b)) => a == b,
            _ => false,
        }
    }
}

/// A query or param mapping.
pub trait LocationObject {
    /// Value type stored under each key
    type Value: LocationObjectValue;

    /// Entries in key order.
    fn entries(&self) -> &IndexMap<String, Self::Value>;
}

impl LocationObject for LocationQuery {
    type Value = QueryValue;

    fn entries(&self) -> &IndexMap<String, QueryValue> {
        self.as_map()
    }
}

impl LocationObject for RouteParams {
    type Value = ParamValue;

    fn entries(&self) -> &IndexMap<String, ParamValue> {
        self.as_map()
    }
}

/// Compare two query mappings or two param mappings.
///
/// False if the key counts differ, if the keys at any position differ, or
/// if any pair of values differs per [`LocationObjectValue::is_same_value`].
pub fn is_same_location_object<T: LocationObject>(a: &T, b: &T) -> bool {
    let (a, b) = (a.entries(), b.entries());
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .all(|((key_a, value_a), (key_b, value_b))| {
            key_a == key_b && value_a.is_same_value(value_b)
        })
}

/// True if both records resolve to the same original record.
///
/// An alias is always compared through the record it aliases.
pub fn is_same_route_record(a: &Arc<RouteRecord>, b: &Arc<RouteRecord>) -> bool {
    Arc::ptr_eq(canonical_record(a), canonical_record(b))
}

fn canonical_record(record: &Arc<RouteRecord>) -> &Arc<RouteRecord> {
    record.original().unwrap_or(record)
}

/// True if navigating from `a` to `b` would land on the same location.
///
/// Requires a non-empty and equally long matched list with the same last
/// record, the same params, the same serialized query and the same hash.
pub fn is_same_route_location<F>(
    stringify_query: F,
    a: &RouteLocationNormalized,
    b: &RouteLocationNormalized,
) -> bool
where
    F: Fn(&LocationQuery) -> String,
{
    let (Some(last_a), Some(last_b)) = (a.matched.last(), b.matched.last()) else {
        return false;
    };

    a.matched.len() == b.matched.len()
        && is_same_route_record(last_a, last_b)
        && is_same_location_object(&a.params, &b.params)
        && stringify_query(&a.query) == stringify_query(&b.query)
        && a.hash == b.hash
}
