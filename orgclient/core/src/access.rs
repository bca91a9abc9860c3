//! Nested Map Access
//!
//! Walks a [`serde_json::Value`] one object level per key. A key path of
//! length *n* succeeds only after *n* successful single-key lookups; hitting
//! a scalar, array or null while keys remain is the same failure as a
//! missing key.
//!
//! # Usage
//!
//! ```ignore
//! use orgclient_core::access::access_nested_map;
//! use serde_json::json;
//!
//! let map = json!({"a": {"b": 2}});
//! assert_eq!(access_nested_map(&map, &["a", "b"])?, &json!(2));
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Errors produced while traversing a nested map
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// The current value is not an object or does not contain the key
    #[error("key not found: {key:?}")]
    KeyNotFound {
        /// The key that could not be resolved
        key: String,
        /// Zero-based position of the key in the path
        depth: usize,
    },

    /// The path resolved, but not to a string
    #[error("value at key {key:?} is not a string")]
    NotAString {
        /// Last key of the path (empty for the identity path)
        key: String,
    },
}

impl AccessError {
    /// The key named by this error
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::KeyNotFound { key, .. } | Self::NotAString { key } => key,
        }
    }
}

/// Ordered sequence of keys describing a route into a nested map
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    keys: Vec<String>,
}

impl KeyPath {
    /// Create a path from any sequence of keys
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a dotted path such as `"license.key"`
    ///
    /// An empty string is the empty path. Empty segments are kept, so
    /// `"a..b"` has three keys.
    #[must_use]
    pub fn parse_dotted(path: &str) -> Self {
        if path.is_empty() {
            return Self::default();
        }
        Self::new(path.split('.'))
    }

    /// Append a key
    #[must_use]
    pub fn child(mut self, key: impl Into<String>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Keys in traversal order
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether this is the identity path
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolve this path against `value`
    ///
    /// # Errors
    ///
    /// See [`access_nested_map`].
    pub fn resolve<'a>(&self, value: &'a Value) -> Result<&'a Value, AccessError> {
        access_nested_map(value, &self.keys)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keys.join("."))
    }
}

impl<K: Into<String>> FromIterator<K> for KeyPath {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<&[&str]> for KeyPath {
    fn from(keys: &[&str]) -> Self {
        Self::new(keys.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(keys: [&str; N]) -> Self {
        Self::new(keys)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

/// Look up the value reached by applying each key of `path` in order
///
/// The empty path returns `nested_map` itself.
///
/// # Errors
///
/// Returns [`AccessError::KeyNotFound`] naming the first key that cannot be
/// applied, either because the current value is not an object or because
/// the object lacks that key. Traversal never continues past that key.
pub fn access_nested_map<'a, K: AsRef<str>>(
    nested_map: &'a Value,
    path: &[K],
) -> Result<&'a Value, AccessError> {
    let mut current = nested_map;

    for (depth, key) in path.iter().enumerate() {
        let key = key.as_ref();
        current = match current {
            Value::Object(map) => map.get(key),
            _ => None,
        }
        .ok_or_else(|| {
            tracing::debug!(key, depth, "Nested map traversal stopped");
            AccessError::KeyNotFound {
                key: key.to_string(),
                depth,
            }
        })?;
    }

    Ok(current)
}

/// Like [`access_nested_map`], but the terminal value must be a string
///
/// # Errors
///
/// Returns [`AccessError::KeyNotFound`] as for [`access_nested_map`], or
/// [`AccessError::NotAString`] if the path resolves to a non-string value.
pub fn access_nested_str<'a, K: AsRef<str>>(
    nested_map: &'a Value,
    path: &[K],
) -> Result<&'a str, AccessError> {
    access_nested_map(nested_map, path)?
        .as_str()
        .ok_or_else(|| AccessError::NotAString {
            key: path
                .last()
                .map(|k| k.as_ref().to_string())
                .unwrap_or_default(),
        })
}
