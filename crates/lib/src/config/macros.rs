//! Named macros: user-supplied functions reachable through dispatch.
//!
//! A macro receives the container it was invoked on, by value, together with
//! the call arguments, and returns whatever [`Outcome`] it likes. Macros are
//! consulted before every built-in interpretation of a name.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::{
    Container, Result, SharedConfig, Value,
    dispatch::{DispatchError, Outcome},
};

/// Signature shared by every macro body.
pub type MacroFn = dyn Fn(Container, Vec<Value>) -> Result<Outcome> + Send + Sync;

/// A set of macros keyed by method name.
///
/// Cloning a registry is cheap and shares the macro bodies.
#[derive(Clone, Default)]
pub struct MacroRegistry {
    macros: HashMap<String, Arc<MacroFn>>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` under `name`, replacing any macro already there
    pub fn register<F>(&mut self, name: impl Into<String>, body: F) -> &mut Self
    where
        F: Fn(Container, Vec<Value>) -> Result<Outcome> + Send + Sync + 'static,
    {
        self.macros.insert(name.into(), Arc::new(body));
        self
    }

    /// Removes the macro registered under `name`, returning whether one existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.macros.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    /// Returns a handle to the macro registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<MacroFn>> {
        self.macros.get(name).cloned()
    }

    /// Registered macro names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.macros.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Runs the macro registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::MacroNotFound`] if no macro has that name, and
    /// otherwise whatever the macro body returns.
    pub fn invoke(&self, name: &str, target: Container, args: Vec<Value>) -> Result<Outcome> {
        let body = self.get(name).ok_or_else(|| DispatchError::MacroNotFound {
            name: name.to_string(),
        })?;
        body(target, args)
    }
}

impl fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_set().entries(names).finish()
    }
}

/// Registers a macro in `config`.
///
/// Every container whose effective configuration is `config` sees the macro
/// from its next dispatch on.
pub fn register_macro<F>(config: &SharedConfig, name: impl Into<String>, body: F)
where
    F: Fn(Container, Vec<Value>) -> Result<Outcome> + Send + Sync + 'static,
{
    config.write().register_macro(name, body);
}
