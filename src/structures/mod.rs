//! Abstract structures and their representation.
//!
//! - [Variables](variable), and their state flags.
//! - [Literals](literal), packed variable and polarity pairs.
//!
//! Clauses have no free-standing representation.
//! A clause of length two exists only as a pair of binary watches, and any longer clause as a record in the [arena](crate::db::arena).

pub mod literal;
pub mod variable;
