//! Normalized value tree produced by canonicalization.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

use crate::error::ClientResult;

/// A canonicalized JSON value.
///
/// There is no numeric variant: every number becomes its decimal string.
/// Object entries are kept sorted by [`key_order`], so serialization is
/// independent of the order in which the source mapping was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Str(String),
    Array(Vec<CanonicalValue>),
    Object(Vec<(String, CanonicalValue)>),
}

/// Case-insensitive ascending order; keys equal ignoring case fall back to byte order.
pub fn key_order(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

impl CanonicalValue {
    /// Build an object, sorting entries into canonical key order.
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, CanonicalValue)>,
        K: Into<String>,
    {
        let mut entries: Vec<(String, CanonicalValue)> =
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        entries.sort_by(|(a, _), (b, _)| key_order(a, b));
        CanonicalValue::Object(entries)
    }

    pub fn str(s: impl Into<String>) -> Self {
        CanonicalValue::Str(s.into())
    }

    /// Look up a key in an object value.
    pub fn get(&self, key: &str) -> Option<&CanonicalValue> {
        match self {
            CanonicalValue::Object(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CanonicalValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Compact JSON bytes (no insignificant whitespace).
    pub fn to_json_bytes(&self) -> ClientResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn to_json_string(&self) -> ClientResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for CanonicalValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CanonicalValue::Null => serializer.serialize_unit(),
            CanonicalValue::Bool(b) => serializer.serialize_bool(*b),
            CanonicalValue::Str(s) => serializer.serialize_str(s),
            CanonicalValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            CanonicalValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
