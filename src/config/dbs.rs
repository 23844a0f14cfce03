//! Configuration of databases, typically derived from the configuration of a context.

use super::{ConfigOption, Fraction};

/// Configuration for the clause arena.
#[derive(Clone, Debug)]
pub struct ArenaConfig {
    /// A collection is due once the garbage bytes of the arena exceed this fraction of all bytes.
    pub garbage_fraction: ConfigOption<Fraction>,

    /// No collection is due while the arena holds fewer bytes than this.
    pub minimum_bytes: ConfigOption<usize>,

    /// After a collection, the capacity of the arena is shrunk if it exceeds its length by this factor.
    pub shrink_factor: ConfigOption<usize>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            garbage_fraction: ConfigOption {
                name: "garbage_fraction",
                min: 0.0,
                max: 1.0,
                value: 0.5,
            },

            minimum_bytes: ConfigOption {
                name: "collect_minimum_bytes",
                min: 0,
                max: usize::MAX,
                value: 1 << 16,
            },

            shrink_factor: ConfigOption {
                name: "arena_shrink_factor",
                min: 1,
                max: 64,
                value: 2,
            },
        }
    }
}

/// Configuration for watch lists and the watch pool.
#[derive(Clone, Debug)]
pub struct WatchConfig {
    /// A defragmentation is due once tombstoned slots exceed this fraction of the pool.
    pub tombstone_fraction: ConfigOption<Fraction>,

    /// No defragmentation is due while the pool holds fewer slots than this.
    pub minimum_slots: ConfigOption<usize>,

    /// The largest offset the pool may address.
    pub offset_limit: ConfigOption<usize>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        WatchConfig {
            tombstone_fraction: ConfigOption {
                name: "tombstone_fraction",
                min: 0.0,
                max: 1.0,
                value: 0.5,
            },

            minimum_slots: ConfigOption {
                name: "defragment_minimum_slots",
                min: 0,
                max: usize::MAX,
                value: 1 << 10,
            },

            offset_limit: ConfigOption {
                name: "pool_offset_limit",
                min: 1,
                max: u32::MAX as usize,
                value: u32::MAX as usize,
            },
        }
    }
}

/// Configuration for variable compaction.
#[derive(Clone, Debug)]
pub struct CompactConfig {
    /// Permit compaction.
    pub enabled: ConfigOption<bool>,

    /// A compaction is due once inactive variables exceed this fraction of all variables.
    pub inactive_fraction: ConfigOption<Fraction>,

    /// No compaction is due while fewer than this many variables are inactive.
    pub minimum_inactive: ConfigOption<usize>,
}

impl Default for CompactConfig {
    fn default() -> Self {
        CompactConfig {
            enabled: ConfigOption {
                name: "compact",
                min: false,
                max: true,
                value: true,
            },

            inactive_fraction: ConfigOption {
                name: "compact_inactive_fraction",
                min: 0.0,
                max: 1.0,
                value: 0.1,
            },

            minimum_inactive: ConfigOption {
                name: "compact_minimum_inactive",
                min: 0,
                max: usize::MAX,
                value: 100,
            },
        }
    }
}
