//! Clause storage and memory reclamation for conflict-driven clause-learning satisfiability solvers.
//!
//! otter_arena is the part of a solver which owns clauses: where clauses live, how clauses are found from literals, and how the memory of retired clauses and retired variables is recovered during a solve.
//! Search itself (propagation, analysis, decisions) is left to the caller, which drives the library through a [context].
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context].
//!
//! Contexts are built with a [configuration](crate::config).
//! Clauses may be added through the [DIMACS](crate::builder) representation of a formula or [programatically](crate::context::Context::new_original_clause).
//!
//! Internally, a handful of databases hold the state of a solve:
//! - Clauses of three or more literals are records in an [arena](crate::db::arena), a single vector of words.
//! - Every literal has a [watch list](crate::db::watches), held within a shared pool, and binary clauses exist only as pairs of watches.
//! - The valuation and details of each variable are held in an [atom database](crate::db::atom).
//! - The trail and decision frames are held in a [literal database](crate::db::literal).
//!
//! Memory is recovered by [procedures]:
//! - [Sparse collection](crate::procedures::collect::sparse) sweeps the arena from some offset while large clauses remain watched.
//! - [Dense collection](crate::procedures::collect::dense) sweeps the whole arena once large clauses are disconnected.
//! - [Compaction](crate::procedures::compact) renumbers variables so that fixed and eliminated variables stop taking space.
//!
//! # Example
//!
//! ```rust
//! # use otter_arena::config::Config;
//! # use otter_arena::context::Context;
//! # use std::io::Write;
//! let mut context = Context::from_config(Config::default());
//!
//! let mut dimacs = vec![];
//! let _ = dimacs.write(b"
//! p cnf 4 3
//!  1  2  3 0
//! -1  2 -4 0
//!  2  4    0
//! ");
//!
//! assert!(context.read_dimacs(dimacs.as_slice()).is_ok());
//! assert_eq!(context.counters.large_clauses(), 2);
//!
//! let garbage = context.arena.iter().next().unwrap();
//! context.mark_as_garbage(garbage);
//! assert!(context.run_sparse_collection(0).is_ok());
//! assert_eq!(context.counters.large_clauses(), 1);
//! assert_eq!(context.arena.garbage_bytes(), 0);
//! ```
//!
//! # Logs
//!
//! To help diagnose issues calls to [log!](log) are made, and a variety of targets are defined in order to help narrow output to relevant parts of the library.
//!
//! The targets are listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - Logs related to [the watch pool](crate::db::watches) can be filtered with `RUST_LOG=watches …` or,
//! - A line for each collection, without details of the sweep, can be found with `RUST_LOG=collect=info …`

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod misc;
