//! Route params
//!
//! Params are produced by the external matcher. This module only provides
//! the typed mapping and value transforms used for encoding and decoding.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Value of one route param.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Single segment param (`/:id`)
    Single(String),
    /// Repeatable param (`/:chapters+`)
    Repeated(Vec<String>),
}

impl ParamValue {
    /// Apply `transform` to the value, element-wise for repeated params.
    pub fn map<F>(&self, transform: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        match self {
            Self::Single(value) => Self::Single(transform(value.as_str())),
            Self::Repeated(values) => {
                Self::Repeated(values.iter().map(|value| transform(value.as_str())).collect())
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Repeated(values)
    }
}

/// Ordered param mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams(IndexMap<String, ParamValue>);

impl RouteParams {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Borrow the underlying ordered map.
    pub fn as_map(&self) -> &IndexMap<String, ParamValue> {
        &self.0
    }
}

impl Deref for RouteParams {
    type Target = IndexMap<String, ParamValue>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Produce a new mapping with `transform` applied to every value.
///
/// Repeated params are mapped element-wise. `None` yields an empty mapping.
/// The input is never mutated.
///
/// # Example
/// ```rust,ignore
/// use route_core::params::{apply_to_params, RouteParams};
///
/// let params: RouteParams = [("id", "a b")].into_iter().collect();
/// let encoded = apply_to_params(|v| v.replace(' ', "%20"), Some(&params));
/// assert_eq!(encoded.get("id"), Some(&"a%20b".into()));
/// ```
pub fn apply_to_params<F>(transform: F, params: Option<&RouteParams>) -> RouteParams
where
    F: Fn(&str) -> String,
{
    let Some(params) = params else {
        return RouteParams::new();
    };

    params
        .iter()
        .map(|(key, value)| (key.clone(), value.map(&transform)))
        .collect()
}
