use fluentarray::{Config, naming::PascalCase};

/// Declares a test-local configurable type with its own static tiers
///
/// Every test that touches the global tier gets a fresh type, so parallel
/// tests never observe each other's global configuration.
macro_rules! tiered_type {
    ($name:ident) => {
        tiered_type!($name, fluentarray::Config::builtin);
    };
    ($name:ident, $builtin:path) => {
        #[derive(Default)]
        struct $name {
            config: Option<fluentarray::SharedConfig>,
        }

        impl fluentarray::Configurable for $name {
            fn config_tiers() -> &'static fluentarray::ConfigTiers {
                static TIERS: fluentarray::ConfigTiers = fluentarray::ConfigTiers::new($builtin);
                &TIERS
            }

            fn instance_config(&self) -> Option<&fluentarray::SharedConfig> {
                self.config.as_ref()
            }

            fn instance_config_mut(&mut self) -> &mut Option<fluentarray::SharedConfig> {
                &mut self.config
            }
        }
    };
}

pub(crate) use tiered_type;

/// A built-in configuration with PascalCase naming and a marker setting
pub fn pascal_builtin() -> Config {
    let mut config = Config::builtin().with_naming_strategy(PascalCase);
    config.set("marker", "pascal");
    config
}
