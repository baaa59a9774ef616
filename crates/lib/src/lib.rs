//!
//! fluentarray: ordered, nestable containers with a fluent, name-driven interface.
//!
//! ## Core Concepts
//!
//! * **Containers (`container::Container`)**: Insertion-ordered maps from keys to values, where a value may itself be a child container. Typed primitives (`set`, `push`, `pluck`, `filter`, ...) are always available.
//! * **Dispatch (`dispatch`)**: `Container::call` turns a method name and its arguments into a read, a write, a `has`/`pluck`/`unset` query, a macro invocation or the opening of a child builder.
//! * **Naming strategies (`naming`)**: Pure functions from method names to keys, so `fooBar` and `foo_bar` address the same entry.
//! * **Configuration (`config`)**: Built-in, default, global and instance tiers holding the naming strategy, macros and free-form settings.
//! * **Codec (`container::codec`)**: A versioned text encoding that round-trips containers, including nested children.
//!
//! ```
//! use fluentarray::{Container, Value, args};
//!
//! let mut users = Container::new();
//! users
//!     .push(Container::new().with("id", 1).with("name", "Ann"))
//!     .push(Container::new().with("id", 2).with("name", "Bob"));
//!
//! let ids = users.call("pluckId", args![])?.into_container()?;
//! assert_eq!(ids.to_structured(), serde_json::json!([1, 2]));
//! # Ok::<(), fluentarray::Error>(())
//! ```

pub mod config;
pub mod constants;
pub mod container;
pub mod dispatch;
pub mod naming;

pub use config::{Config, ConfigTiers, Configurable, MacroRegistry, SharedConfig, register_macro};
pub use container::{Container, Key, Value};
pub use dispatch::{Condition, Outcome};

/// Result type used throughout the fluentarray library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the fluentarray library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured container errors from the container module
    #[error(transparent)]
    Container(container::ContainerError),

    /// Structured dispatch errors from the dispatch module
    #[error(transparent)]
    Dispatch(dispatch::DispatchError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Container(_) => "container",
            Error::Dispatch(_) => "dispatch",
        }
    }

    /// Check if this error comes from encoding or decoding.
    pub fn is_serialization_error(&self) -> bool {
        match self {
            Error::Serialize(_) => true,
            Error::Container(container_err) => container_err.is_serialization_error(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Container(container_err) => container_err.is_type_error(),
            Error::Dispatch(dispatch_err) => dispatch_err.is_unexpected_outcome(),
            _ => false,
        }
    }

    /// Check if this error is dispatch-related.
    pub fn is_dispatch_error(&self) -> bool {
        matches!(self, Error::Dispatch(_))
    }

    /// Check if this error comes from a macro lookup or body.
    pub fn is_macro_error(&self) -> bool {
        match self {
            Error::Dispatch(dispatch_err) => dispatch_err.is_macro_error(),
            _ => false,
        }
    }
}
