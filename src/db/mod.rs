//! Databases for holding the clauses and valuation of a context.
//!
//!   - [The arena](crate::db::arena)
//!     + A single vector of words holding every clause of three or more literals, each as a record addressed by a [ClauseRef](keys::ClauseRef).
//!   - [The watch lists](crate::db::watches)
//!     + For each literal, a vector of watches held within a shared pool. \
//!       A binary clause exists only as a pair of watches, and so has no record in the arena.
//!   - [The clause database](crate::db::clause)
//!     + Methods to store, retire, shrink, and promote clauses, on a context.
//!   - [The atom database](crate::db::atom)
//!     + Properties of variables.
//!       * Valuation
//!       * Flags, the score heap, and the decision queue
//!       * External names
//!   - [The literal database](crate::db::literal)
//!     + The trail, the decision frames, and pending units.

pub mod arena;
pub mod atom;
pub mod clause;
pub mod keys;
pub mod literal;
pub mod watches;
