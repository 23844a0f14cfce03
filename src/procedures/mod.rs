//! Procedures which move clauses or renumber variables.
//!
//! For the most part these are methods accessed via a context, and are placed here for documentation.
//!
//! - [Collection](collect) of garbage in the arena, in sparse or dense mode.
//! - [Compaction](compact) of variables.
//! - [Resizing](resize) of every variable and literal indexed structure.
//! - [Scheduling](schedule) of the above, by thresholds set in the configuration.

pub mod collect;
pub mod compact;
pub mod resize;
pub mod schedule;
