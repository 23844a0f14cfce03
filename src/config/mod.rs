/*!
Configuration of a context.

All configuration for a context is contained within a [Config].
Some structures clone parts of the configuration, e.g. the [arena](crate::db::arena) keeps a copy of the [ArenaConfig](dbs::ArenaConfig).
*/

mod config_option;
pub use config_option::ConfigOption;

pub mod dbs;

use dbs::{ArenaConfig, CompactConfig, WatchConfig};

/// A fraction, used for thresholds.
pub type Fraction = f64;

/// The primary configuration structure.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Configuration of the clause arena.
    pub arena: ArenaConfig,

    /// Configuration of the watch lists and watch pool.
    pub watches: WatchConfig,

    /// Configuration of variable compaction.
    pub compact: CompactConfig,
}
