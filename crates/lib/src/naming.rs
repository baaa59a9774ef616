//! Key-naming strategies.
//!
//! Every key reached through dynamic dispatch is passed through a
//! [`NamingStrategy`] first, so `fooBar`, `FooBar` and `foo_bar` can all land on
//! the same stored entry. Strategies are pure and total: any string input
//! produces a key.
//!
//! The built-in strategies work on ASCII only. Case changes, whitespace and
//! word characters follow ASCII rules, so any non-ASCII character counts as a
//! non-word character and is never re-cased.
//!
//! # Built-in strategies
//!
//! - [`Identity`] - returns the name unchanged
//! - [`SnakeCase`] - `_fooBar_` becomes `_foo_bar_` (the built-in default)
//! - [`PascalCase`] - `foo_bar` becomes `FooBar`
//!
//! ```
//! use fluentarray::naming::{NamingStrategy, PascalCase, SnakeCase};
//!
//! assert_eq!(SnakeCase.transform("_fooBar_"), "_foo_bar_");
//! assert_eq!(PascalCase.transform("foo_bar"), "FooBar");
//! ```

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use regex::Regex;

/// Shared handle to a naming strategy, as stored in a [`Config`](crate::Config).
pub type Strategy = Arc<dyn NamingStrategy>;

/// A pure transformation from a raw method name to a canonical key.
///
/// Implement this trait to plug a custom naming convention into a
/// [`Config`](crate::Config).
pub trait NamingStrategy: fmt::Debug + Send + Sync {
    /// Transforms a raw name into the key it addresses.
    fn transform(&self, name: &str) -> String;
}

/// Leaves names untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl NamingStrategy for Identity {
    fn transform(&self, name: &str) -> String {
        name.to_string()
    }
}

// An uppercase run, together with any underscores directly in front of it.
static UPPERCASE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(_+)?[A-Z]+").expect("valid uppercase-run pattern"));

// ASCII whitespace or underscores
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\n\x0B\x0C\r _]+").expect("valid separator pattern"));

// Anything but ASCII letters and digits
static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z]+").expect("valid non-word pattern"));

/// Whitespace stripped from both ends before snake-casing.
fn is_trimmed(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B')
}

/// Lower-cases names and separates words with single underscores.
///
/// Leading and trailing underscores in the input are kept, so private-looking
/// keys such as `_fooBar_` map to `_foo_bar_`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnakeCase;

impl NamingStrategy for SnakeCase {
    fn transform(&self, name: &str) -> String {
        let spaced = UPPERCASE_RUN.replace_all(name, " $0");
        SEPARATOR_RUN
            .replace_all(spaced.trim_matches(is_trimmed), "_")
            .to_ascii_lowercase()
    }
}

/// Capitalizes every word and joins them without separators.
///
/// Any run of non-word characters or underscores splits words; only the first
/// character of each word is changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PascalCase;

impl NamingStrategy for PascalCase {
    fn transform(&self, name: &str) -> String {
        NON_WORD_RUN
            .split(name)
            .filter(|word| !word.is_empty())
            .map(capitalize)
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-cases the first character of a name, leaving the rest untouched.
pub(crate) fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
