//! Keys addressing entries in a [`Container`](super::Container).

use std::fmt;

/// A container key: either a name or an integer index.
///
/// Names come from `set` calls and dynamic dispatch; indices come from `push`
/// or from explicit integer keys. The two never compare equal, so `"0"` and
/// `0` address different entries.
///
/// Keys serialize untagged, as a plain JSON integer or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Key {
    /// Integer index
    Index(i64),
    /// Named key
    Name(String),
}

impl Key {
    /// Returns the index if this is an integer key
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }

    /// Returns the name if this is a named key
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    /// Returns true if this is an integer key
    pub fn is_index(&self) -> bool {
        matches!(self, Key::Index(_))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(index) => write!(f, "{index}"),
            Key::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Name(value.clone())
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Index(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Index(value as i64)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        // Clamp indices that do not fit into i64
        Key::Index(i64::try_from(value).unwrap_or(i64::MAX))
    }
}
