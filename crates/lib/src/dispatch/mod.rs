//! Name-driven dispatch on containers.
//!
//! [`Container::call`] interprets a method name and its arguments as one of
//! the container primitives, a registered macro, or the opening of a child
//! builder. See [`intent`] for the classification rules.
//!
//! ```
//! use fluentarray::{Container, Value, args};
//!
//! let container = Container::new()
//!     .call("name", args!["Alice"])?
//!     .into_container()?
//!     .call("address", args![])?
//!     .into_container()?
//!     .call("city", args!["Paris"])?
//!     .into_container()?
//!     .call("end", args![])?
//!     .into_container()?;
//!
//! let address = container.get_container("address").unwrap();
//! assert_eq!(address.get("city"), Some(&Value::from("Paris")));
//! # Ok::<(), fluentarray::Error>(())
//! ```
//!
//! Every dispatch consumes its receiver and hands it back inside the
//! [`Outcome`], which keeps chains linear while a child builder owns its
//! parent until `end`. Reads return the receiver next to their answer, so a
//! builder can be inspected and still closed:
//!
//! ```
//! use fluentarray::{Container, Value, args};
//!
//! let outcome = Container::new()
//!     .call("address", args![])?
//!     .into_container()?
//!     .call("city", args!["Paris"])?
//!     .into_container()?
//!     .call("city", args![])?;
//! assert_eq!(outcome.value(), Some(&Value::from("Paris")));
//!
//! let container = outcome.into_receiver().call("end", args![])?.into_container()?;
//! assert!(container.has("address"));
//! # Ok::<(), fluentarray::Error>(())
//! ```

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use tracing::{debug, trace};

use crate::{
    Container, Key, Result, Value,
    config::{Configurable, SharedConfig},
    constants::END_MACRO,
};

pub mod errors;
pub mod intent;

pub use errors::DispatchError;
pub use intent::Intent;

/// The result of a dispatched call.
///
/// Every variant gives the receiver back, see [`Outcome::into_receiver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A container: the receiver after a write, a new child builder or a
    /// parent after `end`
    Container(Container),
    /// The result of a `pluck*` call
    Plucked {
        receiver: Container,
        plucked: Container,
    },
    /// A stored value returned by a getter
    Value { receiver: Container, value: Value },
    /// The answer to a `has*` check
    Bool { receiver: Container, answer: bool },
}

impl Outcome {
    /// Returns the kind of outcome as a string
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Container(_) | Outcome::Plucked { .. } => "container",
            Outcome::Value { .. } => "value",
            Outcome::Bool { .. } => "bool",
        }
    }

    /// Extracts the resulting container, failing on any other outcome.
    ///
    /// For a pluck this is the plucked collection, not the receiver.
    pub fn into_container(self) -> Result<Container> {
        match self {
            Outcome::Container(container) | Outcome::Plucked { plucked: container, .. } => {
                Ok(container)
            }
            other => Err(other.unexpected("container")),
        }
    }

    /// Extracts a getter's value, failing on any other outcome
    pub fn into_value(self) -> Result<Value> {
        match self {
            Outcome::Value { value, .. } => Ok(value),
            other => Err(other.unexpected("value")),
        }
    }

    /// Extracts a `has*` answer, failing on any other outcome
    pub fn into_bool(self) -> Result<bool> {
        match self {
            Outcome::Bool { answer, .. } => Ok(answer),
            other => Err(other.unexpected("bool")),
        }
    }

    /// Returns the container to keep chaining on.
    ///
    /// This is the container itself for [`Outcome::Container`] and the
    /// receiver of the read for every other outcome.
    pub fn into_receiver(self) -> Container {
        match self {
            Outcome::Container(container) => container,
            Outcome::Plucked { receiver, .. }
            | Outcome::Value { receiver, .. }
            | Outcome::Bool { receiver, .. } => receiver,
        }
    }

    /// The getter's value, if this is a read
    pub fn value(&self) -> Option<&Value> {
        match self {
            Outcome::Value { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The `has*` answer, if this is a check
    pub fn answer(&self) -> Option<bool> {
        match self {
            Outcome::Bool { answer, .. } => Some(*answer),
            _ => None,
        }
    }

    fn unexpected(&self, expected: &'static str) -> crate::Error {
        DispatchError::UnexpectedOutcome {
            expected,
            actual: self.kind(),
        }
        .into()
    }
}

impl From<Container> for Outcome {
    fn from(container: Container) -> Self {
        Outcome::Container(container)
    }
}

/// A condition gating a conditional write.
///
/// Conditions are evaluated against the container being written to.
#[derive(Clone)]
pub enum Condition {
    /// Always holds
    Always,
    /// A fixed answer
    Flag(bool),
    /// Computed from the target container at evaluation time
    Predicate(Arc<dyn Fn(&Container) -> bool + Send + Sync>),
}

impl Condition {
    /// Creates a predicate condition
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&Container) -> bool + Send + Sync + 'static,
    {
        Condition::Predicate(Arc::new(predicate))
    }

    /// Evaluates the condition against `target`
    pub fn holds(&self, target: &Container) -> bool {
        match self {
            Condition::Always => true,
            Condition::Flag(flag) => *flag,
            Condition::Predicate(predicate) => predicate(target),
        }
    }
}

impl From<bool> for Condition {
    fn from(flag: bool) -> Self {
        Condition::Flag(flag)
    }
}

/// Values act as conditions through their truthiness.
impl From<Value> for Condition {
    fn from(value: Value) -> Self {
        Condition::Flag(value.is_truthy())
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Always => write!(f, "Always"),
            Condition::Flag(flag) => f.debug_tuple("Flag").field(flag).finish(),
            Condition::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// Builds an argument list for [`Container::call`].
///
/// ```
/// use fluentarray::{Value, args};
///
/// assert!(args![].is_empty());
/// assert_eq!(args![1, "two"], vec![Value::Int(1), Value::from("two")]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

impl Container {
    /// Interprets `name` with `args` and performs the resulting operation.
    ///
    /// The receiver is consumed and comes back inside the [`Outcome`].
    /// The first call initializes the receiver's instance configuration.
    ///
    /// # Errors
    ///
    /// Only macros can fail: their errors propagate unchanged, and a child
    /// builder's `end` fails with [`DispatchError::BuilderClosed`] once its
    /// parent has been handed back.
    pub fn call<I>(self, name: &str, args: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = Value>,
    {
        self.dispatch(name, args.into_iter().collect(), None)
    }

    /// Like [`Container::call`] on a `...When` name, with `condition` in place
    /// of the leading condition argument.
    ///
    /// Unlike a condition argument, `condition` may be a
    /// [`Condition::Predicate`] over the container being written to.
    ///
    /// ```
    /// use fluentarray::{Condition, Container, args};
    ///
    /// let ready = Condition::predicate(|target| target.has("id"));
    /// let container = Container::new()
    ///     .call_when("nameWhen", ready.clone(), args!["skipped"])?
    ///     .into_container()?
    ///     .call("id", args![1])?
    ///     .into_container()?
    ///     .call_when("nameWhen", ready, args!["Ann"])?
    ///     .into_container()?;
    /// assert_eq!(container.get("name").unwrap(), "Ann");
    /// # Ok::<(), fluentarray::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NotConditional`] if `name` with the condition
    /// counted as an argument is not a conditional write or child.
    pub fn call_when<I>(
        self,
        name: &str,
        condition: impl Into<Condition>,
        args: I,
    ) -> Result<Outcome>
    where
        I: IntoIterator<Item = Value>,
    {
        self.dispatch(name, args.into_iter().collect(), Some(condition.into()))
    }

    fn dispatch(
        mut self,
        name: &str,
        mut args: Vec<Value>,
        condition: Option<Condition>,
    ) -> Result<Outcome> {
        let arity = args.len() + usize::from(condition.is_some());
        let config = self.config();
        let strategy = self.naming_strategy();
        let intent = Intent::classify(name, arity, &config.read(), strategy.as_ref(), &self);
        trace!(method = name, arity, ?intent, "classified dispatch");

        let conditional = matches!(
            intent,
            Intent::ConditionalSetter(_) | Intent::ChildOpen { conditional: true, .. }
        );
        if condition.is_some() && !conditional {
            return Err(DispatchError::NotConditional {
                name: name.to_string(),
            }
            .into());
        }

        match intent {
            Intent::MacroCall(name) => {
                // Clone the body out so the lock is free while it runs
                let body = config.read().find_macro(&name);
                let body = body.ok_or(DispatchError::MacroNotFound { name: name.clone() })?;
                trace!(macro_name = %name, "invoking macro");
                body(self, args)
            }
            Intent::HasCheck(key) => {
                let answer = self.has(key);
                Ok(Outcome::Bool {
                    receiver: self,
                    answer,
                })
            }
            Intent::Pluck(key) => {
                let plucked = self.pluck(key);
                Ok(Outcome::Plucked {
                    receiver: self,
                    plucked,
                })
            }
            Intent::Unset(key) => {
                self.unset(key);
                Ok(Outcome::Container(self))
            }
            Intent::Getter(key) => {
                let value = self.get(key).cloned().unwrap_or_default();
                Ok(Outcome::Value {
                    receiver: self,
                    value,
                })
            }
            Intent::Setter(key) => {
                let value = collapse(args);
                self.set(key, value);
                Ok(Outcome::Container(self))
            }
            Intent::ConditionalSetter(key) => {
                let condition = condition.unwrap_or_else(|| take_condition(&mut args));
                let value = collapse(args);
                self.set_when(condition, key, value);
                Ok(Outcome::Container(self))
            }
            Intent::ChildOpen { key, conditional } => {
                let condition = match condition {
                    Some(condition) => condition,
                    None if conditional => take_condition(&mut args),
                    None => Condition::Always,
                };
                Ok(Outcome::Container(self.open_child(&config, key, condition)))
            }
        }
    }

    /// Reads the entry `name` addresses through the naming strategy, without
    /// consuming the container or initializing its configuration
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let key = self.naming_strategy().transform(name);
        self.get(key)
    }

    /// Opens a child builder owning this container until `end`.
    ///
    /// The child gets a deep copy of `config` with an `end` macro that sets
    /// the child under `key` in the parent, when `condition` holds, and
    /// returns the parent.
    fn open_child(self, config: &SharedConfig, key: Key, condition: Condition) -> Container {
        debug!(%key, "opening child builder");
        let parent = Mutex::new(Some(self));
        let mut child_config = config.snapshot();
        child_config.register_macro(END_MACRO, move |child, _args| {
            let mut parent = parent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take()
                .ok_or_else(|| DispatchError::BuilderClosed {
                    key: key.to_string(),
                })?;
            debug!(%key, "closing child builder");
            parent.set_when(condition.clone(), key.clone(), child);
            Ok(Outcome::Container(parent))
        });
        Container::with_config(child_config)
    }
}

/// A single argument is stored as-is; several become an indexed container.
fn collapse(mut args: Vec<Value>) -> Value {
    if args.len() == 1 {
        args.pop().unwrap_or_default()
    } else {
        Value::from(args)
    }
}

/// Removes the leading condition argument; a missing condition is false.
fn take_condition(args: &mut Vec<Value>) -> Condition {
    if args.is_empty() {
        Condition::Flag(false)
    } else {
        Condition::from(args.remove(0))
    }
}
