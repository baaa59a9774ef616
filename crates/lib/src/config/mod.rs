//! Layered configuration for containers.
//!
//! Configuration is resolved through four tiers:
//!
//! 1. **Built-in**: produced by a plain function, fixed per configurable type.
//! 2. **Default**: the built-in configuration, computed once and never mutated.
//! 3. **Global**: one shared, replaceable configuration per type, lazily
//!    initialized as a copy of the default.
//! 4. **Instance**: per-container configuration, lazily initialized as a deep
//!    copy of the global configuration at the time of first access.
//!
//! Containers sharing one [`SharedConfig`] observe each other's configuration
//! changes. The instance tier is deep-copied exactly once, so later changes to
//! the global configuration do not reach containers that already hold their own.
//!
//! # Reserved keys
//!
//! A [`Config`] is a container of free-form settings plus two reserved entries
//! with typed slots: [`NAMING_STRATEGY`] and [`MACROS`]. They are reported by
//! [`Config::has`] and cleared by [`Config::unset`], but read and written
//! through their typed accessors.

use std::{
    fmt,
    sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use tracing::debug;

use crate::{
    Container, Key, Result, Value,
    constants::{MACROS, NAMING_STRATEGY},
    dispatch::Outcome,
    naming::{Identity, NamingStrategy, SnakeCase, Strategy},
};

pub mod macros;

pub use macros::{MacroFn, MacroRegistry, register_macro};

/// Configuration for a container: a naming strategy, macros and settings.
#[derive(Clone, Default)]
pub struct Config {
    naming_strategy: Option<Strategy>,
    macros: Option<MacroRegistry>,
    settings: Container,
}

impl Config {
    /// Creates an empty configuration with no reserved entries
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in configuration: snake_case naming and an empty macro set
    pub fn builtin() -> Self {
        Self::new()
            .with_naming_strategy(SnakeCase)
            .with_macros(MacroRegistry::new())
    }

    pub fn naming_strategy(&self) -> Option<&Strategy> {
        self.naming_strategy.as_ref()
    }

    /// Sets the naming strategy
    pub fn set_naming_strategy(&mut self, strategy: impl NamingStrategy + 'static) -> &mut Self {
        self.naming_strategy = Some(Arc::new(strategy));
        self
    }

    /// Builder method to set the naming strategy
    pub fn with_naming_strategy(mut self, strategy: impl NamingStrategy + 'static) -> Self {
        self.set_naming_strategy(strategy);
        self
    }

    pub fn macros(&self) -> Option<&MacroRegistry> {
        self.macros.as_ref()
    }

    /// Mutable access to the macro set, creating an empty one if needed
    pub fn macros_mut(&mut self) -> &mut MacroRegistry {
        self.macros.get_or_insert_with(MacroRegistry::new)
    }

    /// Replaces the macro set
    pub fn set_macros(&mut self, macros: MacroRegistry) -> &mut Self {
        self.macros = Some(macros);
        self
    }

    /// Builder method to replace the macro set
    pub fn with_macros(mut self, macros: MacroRegistry) -> Self {
        self.set_macros(macros);
        self
    }

    /// Registers a macro, replacing any macro with the same name
    pub fn register_macro<F>(&mut self, name: impl Into<String>, body: F) -> &mut Self
    where
        F: Fn(Container, Vec<Value>) -> Result<Outcome> + Send + Sync + 'static,
    {
        self.macros_mut().register(name, body);
        self
    }

    /// Builder method to register a macro
    pub fn with_macro<F>(mut self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Container, Vec<Value>) -> Result<Outcome> + Send + Sync + 'static,
    {
        self.register_macro(name, body);
        self
    }

    pub fn has_macro(&self, name: &str) -> bool {
        self.macros.as_ref().is_some_and(|macros| macros.contains(name))
    }

    /// Returns a handle to the macro registered under `name`
    pub fn find_macro(&self, name: &str) -> Option<Arc<MacroFn>> {
        self.macros.as_ref()?.get(name)
    }

    /// Returns true if the configuration holds an entry under `key`.
    ///
    /// The reserved keys report whether their typed slot is filled.
    pub fn has(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        match key.as_name() {
            Some(NAMING_STRATEGY) => self.naming_strategy.is_some(),
            Some(MACROS) => self.macros.is_some(),
            _ => self.settings.has(&key),
        }
    }

    /// Gets a free-form setting
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Sets a free-form setting.
    ///
    /// Reserved entries are not affected; use their typed setters.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.settings.set(key, value);
        self
    }

    /// Removes an entry; the reserved keys clear their typed slot
    pub fn unset(&mut self, key: impl Into<Key>) -> &mut Self {
        let key = key.into();
        match key.as_name() {
            Some(NAMING_STRATEGY) => self.naming_strategy = None,
            Some(MACROS) => self.macros = None,
            _ => {
                self.settings.unset(&key);
            }
        }
        self
    }

    /// The free-form settings
    pub fn settings(&self) -> &Container {
        &self.settings
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("naming_strategy", &self.naming_strategy)
            .field("macros", &self.macros)
            .field("settings", &self.settings.to_string())
            .finish()
    }
}

/// A reference-counted, lockable configuration shared by several owners.
///
/// Cloning a `SharedConfig` shares the configuration; use
/// [`SharedConfig::deep_clone`] for an independent copy.
#[derive(Clone)]
pub struct SharedConfig(Arc<RwLock<Config>>);

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self(Arc::new(RwLock::new(config)))
    }

    /// Locks the configuration for reading.
    ///
    /// A lock poisoned by a panicking writer is recovered; configuration
    /// updates are single assignments and cannot be observed half-done.
    pub fn read(&self) -> RwLockReadGuard<'_, Config> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the configuration for writing
    pub fn write(&self) -> RwLockWriteGuard<'_, Config> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true if both handles point to the same configuration
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Copies the configuration into a new, independent handle
    pub fn deep_clone(&self) -> Self {
        Self::new(self.snapshot())
    }

    /// Copies the current configuration out of the lock
    pub fn snapshot(&self) -> Config {
        self.read().clone()
    }
}

impl From<Config> for SharedConfig {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for SharedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedConfig").field(&*self.read()).finish()
    }
}

/// The default and global configuration tiers of one configurable type.
///
/// Declare one as a `static` per type and return it from
/// [`Configurable::config_tiers`]:
///
/// ```
/// use fluentarray::{Config, ConfigTiers};
///
/// static TIERS: ConfigTiers = ConfigTiers::new(Config::builtin);
/// assert!(TIERS.default_config().naming_strategy().is_some());
/// ```
pub struct ConfigTiers {
    builtin: fn() -> Config,
    default: OnceLock<Arc<Config>>,
    global: RwLock<Option<SharedConfig>>,
}

impl ConfigTiers {
    /// Creates the tiers, using `builtin` to produce the default configuration
    pub const fn new(builtin: fn() -> Config) -> Self {
        Self {
            builtin,
            default: OnceLock::new(),
            global: RwLock::new(None),
        }
    }

    /// Produces a fresh copy of the built-in configuration
    pub fn builtin_config(&self) -> Config {
        (self.builtin)()
    }

    /// The default configuration, computed from the built-in on first use
    pub fn default_config(&self) -> Arc<Config> {
        self.default
            .get_or_init(|| Arc::new(self.builtin_config()))
            .clone()
    }

    /// The global configuration, initialized from the default on first use
    pub fn global_config(&self) -> SharedConfig {
        let existing = self
            .global
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(config) = existing {
            return config;
        }

        let mut slot = self.global.write().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert_with(|| {
            debug!("initializing global config from default");
            SharedConfig::new(self.default_config().as_ref().clone())
        })
        .clone()
    }

    /// Replaces the global configuration.
    ///
    /// Instances that already hold their own configuration are unaffected.
    pub fn set_global_config(&self, config: impl Into<SharedConfig>) {
        debug!("replacing global config");
        *self.global.write().unwrap_or_else(PoisonError::into_inner) = Some(config.into());
    }

    /// Drops the global configuration; the next access re-copies the default
    pub fn reset_global_config(&self) {
        debug!("resetting global config");
        *self.global.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl fmt::Debug for ConfigTiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigTiers")
            .field("default", &self.default.get())
            .field(
                "global",
                &*self.global.read().unwrap_or_else(PoisonError::into_inner),
            )
            .finish()
    }
}

/// Types that resolve their configuration through [`ConfigTiers`].
///
/// Implementors supply their static tiers and access to an optional instance
/// configuration; every other method has a default implementation.
pub trait Configurable {
    /// The default and global tiers for this type
    fn config_tiers() -> &'static ConfigTiers;

    /// The instance configuration, if one has been set or initialized
    fn instance_config(&self) -> Option<&SharedConfig>;

    /// Mutable access to the instance configuration slot
    fn instance_config_mut(&mut self) -> &mut Option<SharedConfig>;

    fn builtin_config() -> Config {
        Self::config_tiers().builtin_config()
    }

    fn default_config() -> Arc<Config> {
        Self::config_tiers().default_config()
    }

    fn global_config() -> SharedConfig {
        Self::config_tiers().global_config()
    }

    fn set_global_config(config: impl Into<SharedConfig>) {
        Self::config_tiers().set_global_config(config)
    }

    fn reset_global_config() {
        Self::config_tiers().reset_global_config()
    }

    /// The instance configuration, deep-copied from the global tier on first
    /// access
    fn config(&mut self) -> SharedConfig {
        self.instance_config_mut()
            .get_or_insert_with(|| Self::global_config().deep_clone())
            .clone()
    }

    /// Replaces the instance configuration
    fn set_config(&mut self, config: impl Into<SharedConfig>) -> &mut Self
    where
        Self: Sized,
    {
        *self.instance_config_mut() = Some(config.into());
        self
    }

    /// The configuration in effect without initializing the instance tier:
    /// the instance configuration if present, otherwise the global one
    fn effective_config(&self) -> SharedConfig {
        self.instance_config()
            .cloned()
            .unwrap_or_else(Self::global_config)
    }

    /// The naming strategy of the effective configuration, falling back to
    /// the default configuration's strategy and finally to [`Identity`]
    fn naming_strategy(&self) -> Strategy {
        let configured = self.effective_config().read().naming_strategy().cloned();
        configured
            .or_else(|| Self::default_config().naming_strategy().cloned())
            .unwrap_or_else(|| Arc::new(Identity))
    }
}
