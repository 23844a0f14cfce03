//! Sparse collection, with large clauses watched.
//!
//! The sweep of the arena is bracketed by a flush of every watch list and a rebuild of the watches of swept records:
//!
//! 1. The lists of literals fixed at the root are cleared, binary watches satisfied at the root are dropped, and every large watch of a record at or after the start of the sweep (or of a garbage record) is dropped.
//!    Large watches of live records before the start are kept, as those records do not move.
//! 2. The arena is [swept](crate::procedures::collect) from the start.
//! 3. Every surviving record at or after the start is watched on its first two literals.
//!
//! If the partition of the arena is violated before the start, the sweep starts from the first redundant record instead.

use crate::{
    context::Context,
    db::watches::pool::Watch,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self, ErrorKind},
};

use super::SweepReport;

impl Context {
    /// Collects garbage of the arena at or after the offset `start`.
    ///
    /// `start` must be the offset of some record, or the end of the arena.
    pub fn run_sparse_collection(&mut self, start: usize) -> Result<SweepReport, ErrorKind> {
        self.require_propagated()?;
        if !self.watching {
            return Err(err::StateError::WatchesDisconnected.into());
        }

        let mut start = start.min(self.arena.end());
        if self.arena.partition_violated() {
            if let Some(first) = self.arena.first_reducible() {
                start = start.min(first.offset());
            }
        }
        let before = self.arena.bytes();

        self.mark_reasons(true);
        self.flush_watches(start);
        let report = self.sweep(start, None)?;
        self.mark_reasons(false);
        self.watch_from(start)?;

        self.defragment_if_due();
        self.counters.sparse_collections += 1;

        log::info!(
            target: targets::COLLECT,
            "Sparse collection {} from {start}: {before} to {} bytes, {} garbage, {} satisfied, {} demoted, {} flushed",
            self.counters.sparse_collections,
            self.arena.bytes(),
            report.garbage,
            report.satisfied,
            report.demoted,
            report.flushed
        );
        debug_assert!(self.watches.binaries_symmetric());
        Ok(report)
    }

    /// Drops every watch which a sweep from `start` would invalidate, and every watch satisfied at the root.
    pub(crate) fn flush_watches(&mut self, start: usize) {
        for index in 0..self.watches.literal_count() {
            let literal = Literal::from_index(index);

            if self.atom_db.root_value_of(literal).is_some() {
                for watch in self.watches.list(literal) {
                    if let Watch::Binary { other, redundant } = *watch {
                        // A binary clause over two fixed literals is counted from the smaller literal.
                        if literal < other && self.atom_db.root_value_of(other).is_some() {
                            *self.counters.count_binary(redundant) -= 1;
                        }
                    }
                }
                self.watches.clear(literal);
                continue;
            }

            let atom_db = &self.atom_db;
            let arena = &self.arena;
            let counters = &mut self.counters;
            self.watches.retain(literal, |watch| match *watch {
                Watch::Binary { other, redundant } => match atom_db.root_value_of(other) {
                    Some(true) => {
                        *counters.count_binary(redundant) -= 1;
                        false
                    }
                    _ => true,
                },
                Watch::Large { clause, .. } => clause.offset() < start && !arena.record(clause).is_garbage(),
            });
        }
        log::debug!(target: targets::COLLECT, "Flushed watches from {start}");
    }

    /// Watches every live record at or after `start` on its first two literals.
    pub(crate) fn watch_from(&mut self, start: usize) -> Result<(), ErrorKind> {
        for clause in self.arena.iter_from(start) {
            self.watches.watch_large(self.arena.clause(clause).literals(), clause)?;
        }
        Ok(())
    }
}
