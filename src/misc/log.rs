/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [arena](crate::db::arena)
    pub const ARENA: &str = "arena";

    /// Logs related to [watch lists](crate::db::watches) and the watch pool
    pub const WATCHES: &str = "watches";

    /// Logs related to [garbage collection](crate::procedures::collect)
    pub const COLLECT: &str = "collect";

    /// Logs related to [variable compaction](crate::procedures::compact)
    pub const COMPACT: &str = "compact";

    /// Logs related to [resizing](crate::procedures::resize) indexed structures
    pub const RESIZE: &str = "resize";

    /// Logs related to the [clause database](crate::db::clause)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to a valuation
    pub const VALUATION: &str = "valuation";

    /// Logs related to reading a formula
    pub const BUILDER: &str = "builder";
}
