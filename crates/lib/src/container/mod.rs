//! Ordered, nestable key/value containers.
//!
//! The [`Container`] type is the data structure at the heart of the library: an
//! insertion-ordered map from [`Key`] to [`Value`], where a value may itself be
//! a child container. Typed primitives (`has`, `get`, `set`, `push`, `unset`,
//! `clean`, `pluck`, `each`, `map`, `filter`) live here; the name-driven
//! interface lives in [`dispatch`](crate::dispatch).
//!
//! # Usage
//!
//! ```
//! use fluentarray::{Container, Value};
//!
//! let mut container = Container::new();
//! container
//!     .set("name", "Alice")
//!     .set("tags", vec!["admin", "ops"])
//!     .push(42);
//!
//! assert_eq!(container.get("name"), Some(&Value::from("Alice")));
//! assert_eq!(container.get(0), Some(&Value::Int(42)));
//! assert!(container.get("tags").unwrap().is_container());
//! ```

use std::{collections::HashMap, fmt, ops::ControlFlow, slice, vec};

use tracing::warn;

use crate::{
    config::{ConfigTiers, Configurable, SharedConfig},
    dispatch::Condition,
};

// Submodules
pub mod codec;
pub mod errors;
pub mod key;
pub mod structured;
pub mod value;

// Convenience re-exports for core container types
pub use errors::ContainerError;
pub use key::Key;
pub use value::Value;

static CONTAINER_CONFIG: ConfigTiers = ConfigTiers::new(crate::Config::builtin);

/// An insertion-ordered key/value store whose values may be child containers.
///
/// # Ordering and keys
///
/// - Setting an existing key overwrites its value in place; the entry keeps
///   its position.
/// - `push` appends at the next integer index: one past the largest integer
///   key the container has held, regardless of any named keys. Once
///   `i64::MAX` has been used there is no next index and `push` is skipped.
/// - An empty container remembers whether it was a list or a map, which
///   decides how it exports; see [`Container::to_structured`].
///
/// # Configuration
///
/// A container optionally carries its own [`SharedConfig`]. Without one, the
/// first call to [`Configurable::config`] clones the global tier into the
/// container. Cloning a container copies its data deeply but shares the same
/// configuration reference.
///
/// # Examples
///
/// ```
/// # use fluentarray::Container;
/// let mut container = Container::new();
/// container.set("key", "value").push("foo").push("bar");
///
/// let keys: Vec<String> = container.keys().map(ToString::to_string).collect();
/// assert_eq!(keys, ["key", "0", "1"]);
/// ```
#[derive(Debug, Clone)]
pub struct Container {
    /// Entries in insertion order
    entries: Vec<(Key, Value)>,
    /// Position of each key in `entries`
    index: HashMap<Key, usize>,
    /// Index assigned by the next `push`; `None` once `i64::MAX` is taken
    next_index: Option<i64>,
    /// Export shape while the container is empty
    shape: Shape,
    /// Instance configuration tier, cloned lazily from the global tier
    config: Option<SharedConfig>,
}

/// Whether a container was built as a list or as a map.
///
/// Set by the first entry, and by structured import. It only matters once
/// the container is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Shape {
    #[default]
    List,
    Map,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next_index: Some(0),
            shape: Shape::default(),
            config: None,
        }
    }
}

impl Container {
    /// Creates a new empty container without an instance configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty container that uses the given configuration.
    ///
    /// The configuration is stored as-is, not cloned.
    pub fn with_config(config: impl Into<SharedConfig>) -> Self {
        Self {
            config: Some(config.into()),
            ..Self::default()
        }
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the container has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &Key) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns true if the container holds an entry under `key`
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.position(&key.into()).is_some()
    }

    /// Gets a value by key; absent keys yield `None`
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        let position = self.position(&key.into())?;
        self.entries.get(position).map(|(_, v)| v)
    }

    /// Gets a mutable reference to a value by key
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
        let position = self.position(&key.into())?;
        self.entries.get_mut(position).map(|(_, v)| v)
    }

    /// Gets a child container by key
    pub fn get_container(&self, key: impl Into<Key>) -> Option<&Container> {
        self.get(key)?.as_container()
    }

    /// Gets a mutable child container by key
    pub fn get_container_mut(&mut self, key: impl Into<Key>) -> Option<&mut Container> {
        self.get_mut(key)?.as_container_mut()
    }

    /// Sets a value under `key`.
    ///
    /// Literal structures (`Vec`s, `serde_json` arrays and objects) are
    /// converted into child containers on the way in.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Sets a value when `condition` holds for this container
    pub fn set_when(
        &mut self,
        condition: impl Into<Condition>,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> &mut Self {
        if condition.into().holds(self) {
            self.set(key, value);
        }
        self
    }

    /// Appends a value at the next integer index.
    ///
    /// When `i64::MAX` has already been used as a key there is no next index;
    /// the value is dropped with a warning and no entry is overwritten.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        match self.next_index {
            Some(index) => self.insert(Key::Index(index), value.into()),
            None => warn!("push skipped: the next integer index is out of range"),
        }
        self
    }

    /// Appends a value when `condition` holds for this container
    pub fn push_when(
        &mut self,
        condition: impl Into<Condition>,
        value: impl Into<Value>,
    ) -> &mut Self {
        if condition.into().holds(self) {
            self.push(value);
        }
        self
    }

    /// Removes the entry under `key`, if any
    pub fn unset(&mut self, key: impl Into<Key>) -> &mut Self {
        self.remove(key);
        self
    }

    /// Removes the entry under `key` and returns its value
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        let removed = self.index.remove(&key.into())?;
        let (_, value) = self.entries.remove(removed);
        for (position, (key, _)) in self.entries.iter().enumerate().skip(removed) {
            if let Some(slot) = self.index.get_mut(key) {
                *slot = position;
            }
        }
        Some(value)
    }

    /// Removes every entry and restarts integer indexing at zero
    pub fn clean(&mut self) -> &mut Self {
        self.entries.clear();
        self.index.clear();
        self.next_index = Some(0);
        self
    }

    /// Collects `key` from every child container that has it.
    ///
    /// The result is a new container sharing this container's configuration,
    /// holding the plucked values in order under indices `0..n`. Scalar entries
    /// and children without `key` are skipped.
    pub fn pluck(&self, key: impl Into<Key>) -> Container {
        let key = key.into();
        let mut plucked = self.sibling();
        for value in self.values() {
            if let Some(found) = value.as_container().and_then(|child| child.get(&key)) {
                plucked.push(found.clone());
            }
        }
        plucked
    }

    /// Visits entries in insertion order until the callback breaks
    pub fn each<F>(&self, mut callback: F) -> &Self
    where
        F: FnMut(&Value, &Key) -> ControlFlow<()>,
    {
        for (key, value) in &self.entries {
            if callback(value, key).is_break() {
                break;
            }
        }
        self
    }

    /// Builds a new container from `callback(value, key)`, preserving keys
    pub fn map<F, V>(&self, mut callback: F) -> Container
    where
        F: FnMut(&Value, &Key) -> V,
        V: Into<Value>,
    {
        let mut mapped = self.sibling();
        mapped.shape = self.shape;
        for (key, value) in &self.entries {
            mapped.insert(key.clone(), callback(value, key).into());
        }
        mapped
    }

    /// Keeps the entries whose values are not empty.
    ///
    /// See [`Value::is_empty`] for the emptiness rule.
    pub fn filter(&self) -> Container {
        self.filter_by(|value, _| value.is_truthy())
    }

    /// Keeps the entries for which `predicate(value, key)` returns true
    pub fn filter_by<F>(&self, mut predicate: F) -> Container
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        let mut filtered = self.sibling();
        filtered.shape = self.shape;
        for (key, value) in &self.entries {
            if predicate(value, key) {
                filtered.insert(key.clone(), value.clone());
            }
        }
        filtered
    }

    /// Returns an iterator over all key-value pairs in insertion order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over all keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Returns an iterator over all values in insertion order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns the first value in insertion order
    pub fn first(&self) -> Option<&Value> {
        self.entries.first().map(|(_, v)| v)
    }

    /// Returns the last value in insertion order
    pub fn last(&self) -> Option<&Value> {
        self.entries.last().map(|(_, v)| v)
    }

    /// An empty container sharing this container's configuration reference
    pub(crate) fn sibling(&self) -> Container {
        Container {
            config: self.config.clone(),
            ..Container::default()
        }
    }

    pub(crate) fn shape(&self) -> Shape {
        self.shape
    }

    pub(crate) fn insert(&mut self, key: Key, value: Value) {
        if let Key::Index(index) = key {
            if self.next_index.is_some_and(|next| index >= next) {
                self.next_index = index.checked_add(1);
            }
        }
        if let Some(position) = self.position(&key) {
            self.entries[position].1 = value;
            return;
        }
        if self.entries.is_empty() {
            self.shape = if key.is_index() { Shape::List } else { Shape::Map };
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
    }
}

// Builder pattern methods
impl Container {
    /// Builder method to set a value and return self
    pub fn with(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder method to push a value and return self
    pub fn with_pushed(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }
}

impl Configurable for Container {
    fn config_tiers() -> &'static ConfigTiers {
        &CONTAINER_CONFIG
    }

    fn instance_config(&self) -> Option<&SharedConfig> {
        self.config.as_ref()
    }

    fn instance_config_mut(&mut self) -> &mut Option<SharedConfig> {
        &mut self.config
    }
}

/// Containers compare by visible data: keys, order and values.
/// Configuration references are not compared.
impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl FromIterator<(Key, Value)> for Container {
    fn from_iter<T: IntoIterator<Item = (Key, Value)>>(iter: T) -> Self {
        let mut container = Container::new();
        for (key, value) in iter {
            container.insert(key, value);
        }
        container
    }
}

impl FromIterator<Value> for Container {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut container = Container::new();
        for value in iter {
            container.push(value);
        }
        container
    }
}

/// Borrowing iterator over a container's entries, in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (Key, Value)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Container {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Container {
    type Item = (Key, Value);
    type IntoIter = vec::IntoIter<(Key, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
