//! Dense collection, at the root and with no large clause watched.
//!
//! A single sweep over the whole arena, used after passes which invalidate the watches of large clauses in bulk.
//! As every assignment at the root is a unit, no reason refers to the arena and so no reason is rewritten.

use crate::{
    context::Context,
    db::atom::Remapping,
    misc::log::targets::{self},
    types::err::{self, ErrorKind},
};

use super::SweepReport;

impl Context {
    /// Drops every large watch, leaving binary watches in place.
    pub fn enter_dense_mode(&mut self) {
        if self.watching {
            self.watches.disconnect_large();
            self.watching = false;
        }
    }

    /// Watches every large clause on its first two literals.
    pub fn resume_sparse_mode(&mut self) -> Result<(), ErrorKind> {
        if !self.watching {
            self.watch_from(0)?;
            self.watching = true;
            log::debug!(target: targets::WATCHES, "Large watches connected");
        }
        Ok(())
    }

    /// Collects garbage of the whole arena.
    pub fn run_dense_collection(&mut self) -> Result<SweepReport, ErrorKind> {
        self.require_dense()?;
        self.dense_collection(None)
    }

    /// Checks the context is at the root, at a propagation fixpoint, and in dense mode.
    pub(crate) fn require_dense(&self) -> Result<(), err::StateError> {
        self.require_root()?;
        self.require_propagated()?;
        match self.watching {
            true => Err(err::StateError::WatchesConnected),
            false => Ok(()),
        }
    }

    /// Sweeps the whole arena, rewriting every literal by `remapping` if given.
    pub(crate) fn dense_collection(&mut self, remapping: Option<&Remapping>) -> Result<SweepReport, ErrorKind> {
        let before = self.arena.bytes();
        let report = self.sweep(0, remapping)?;

        self.defragment_if_due();
        self.counters.dense_collections += 1;

        log::info!(
            target: targets::COLLECT,
            "Dense collection {}: {before} to {} bytes, {} garbage, {} satisfied, {} demoted, {} flushed",
            self.counters.dense_collections,
            self.arena.bytes(),
            report.garbage,
            report.satisfied,
            report.demoted,
            report.flushed
        );
        Ok(report)
    }
}
