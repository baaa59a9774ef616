//! Classification of method names into dispatch intents.
//!
//! Classification is a pure function of the name, the argument count, the
//! effective configuration and the target's current keys. The rules are
//! applied in this order:
//!
//! 1. A registered macro with the exact name wins.
//! 2. `has*`, `pluck*` and `unset*` followed by a non-empty rest address the
//!    rest, with its first character lower-cased, through the naming strategy.
//! 3. With no arguments, a name whose key already exists reads that key.
//!    A leading `\` skips this rule, so existing keys can be reopened or
//!    overwritten.
//! 4. Anything else writes. A `When` suffix on a non-empty base makes the
//!    first argument the condition; no remaining arguments opens a child.

use crate::{
    Config, Container, Key,
    constants::{ESCAPE_MARKER, HAS_PREFIX, PLUCK_PREFIX, UNSET_PREFIX, WHEN_SUFFIX},
    naming::{NamingStrategy, lower_first},
};

/// What a dispatched method name means for a given target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Invoke the macro registered under this name
    MacroCall(String),
    /// Report whether the key exists
    HasCheck(Key),
    /// Pluck the key from every child container
    Pluck(Key),
    /// Remove the key
    Unset(Key),
    /// Return the value stored under the key
    Getter(Key),
    /// Store the arguments under the key
    Setter(Key),
    /// Store the arguments under the key when the leading condition holds
    ConditionalSetter(Key),
    /// Open a child builder that attaches itself under the key on `end`
    ChildOpen { key: Key, conditional: bool },
}

impl Intent {
    /// Classifies a call of `name` with `arity` arguments on `target`.
    pub fn classify(
        name: &str,
        arity: usize,
        config: &Config,
        strategy: &dyn NamingStrategy,
        target: &Container,
    ) -> Intent {
        if config.has_macro(name) {
            return Intent::MacroCall(name.to_string());
        }

        let prefixed: [(&str, fn(Key) -> Intent); 3] = [
            (HAS_PREFIX, Intent::HasCheck),
            (PLUCK_PREFIX, Intent::Pluck),
            (UNSET_PREFIX, Intent::Unset),
        ];
        for (prefix, intent) in prefixed {
            if let Some(rest) = name.strip_prefix(prefix).filter(|rest| !rest.is_empty()) {
                return intent(Key::Name(strategy.transform(&lower_first(rest))));
            }
        }

        let raw = name.trim_start_matches(ESCAPE_MARKER);
        let escaped = raw.len() != name.len();

        if arity == 0 && !escaped {
            let key = Key::Name(strategy.transform(raw));
            if target.has(&key) {
                return Intent::Getter(key);
            }
        }

        let (base, conditional) = match raw.strip_suffix(WHEN_SUFFIX) {
            Some(base) if !base.is_empty() => (base, true),
            _ => (raw, false),
        };
        let key = Key::Name(strategy.transform(base));
        let values = if conditional {
            arity.saturating_sub(1)
        } else {
            arity
        };

        match (values, conditional) {
            (0, _) => Intent::ChildOpen { key, conditional },
            (_, false) => Intent::Setter(key),
            (_, true) => Intent::ConditionalSetter(key),
        }
    }
}
