//! Rule-set configuration and the built-in presets.

pub mod config;
pub mod presets;

pub use config::{
    CombatRules, ConfigError, Fortification, GameConfig, MovementRules, RosterEntry, Upset,
};
pub use presets::{UnknownVariant, Variant, ALL_VARIANTS};
