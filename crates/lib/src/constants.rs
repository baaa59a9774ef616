//! Constants used throughout the fluentarray library.
//!
//! This module provides central definitions for reserved configuration keys and
//! the method-name grammar understood by the dispatch engine.

/// Reserved configuration key holding the naming strategy.
pub const NAMING_STRATEGY: &str = "naming_strategy";

/// Reserved configuration key holding the macro registry.
pub const MACROS: &str = "macros";

/// Name of the macro that closes a child builder and returns its parent.
pub const END_MACRO: &str = "end";

/// Method-name prefix dispatching to [`Container::has`](crate::Container::has).
pub const HAS_PREFIX: &str = "has";

/// Method-name prefix dispatching to [`Container::pluck`](crate::Container::pluck).
pub const PLUCK_PREFIX: &str = "pluck";

/// Method-name prefix dispatching to [`Container::unset`](crate::Container::unset).
pub const UNSET_PREFIX: &str = "unset";

/// Method-name suffix marking a conditional setter.
pub const WHEN_SUFFIX: &str = "When";

/// Leading marker that forces setter interpretation of a method name.
pub const ESCAPE_MARKER: char = '\\';

/// Current version of the serialized container envelope.
pub const FORMAT_VERSION: u8 = 1;
