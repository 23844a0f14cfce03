//! Scheduling of collection and compaction.
//!
//! A pass is due once enough of the relevant structure is wasted, as a fraction set in the [configuration](crate::config::dbs).
//! Before a due pass is run the terminate callback is consulted, and if the callback requests termination no pass is run.

use crate::{context::Context, misc::log::targets::{self}, types::err::ErrorKind};

/// The pass run by [collect_if_due](Context::collect_if_due).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scheduled {
    /// No pass was due, or termination was requested.
    Nothing,

    /// A sparse collection from the start of the arena.
    Sparse,

    /// A dense collection.
    Dense,

    /// A compaction of variables, which includes a dense collection.
    Compaction,
}

impl Context {
    /// True if the garbage of the arena is a large enough fraction of the arena.
    pub fn collection_due(&self) -> bool {
        let bytes = self.arena.bytes();
        let config = &self.arena.config;
        bytes >= config.minimum_bytes.value
            && self.arena.garbage_bytes() as f64 > config.garbage_fraction.value * bytes as f64
    }

    /// True if compaction is permitted, at the root, and would drop a large enough fraction of variables.
    pub fn compaction_due(&self) -> bool {
        let config = &self.config.compact;
        let reclaimable = self.atom_db.reclaimable_count();
        config.enabled.value
            && self.literal_db.level() == 0
            && reclaimable > 0
            && reclaimable >= config.minimum_inactive.value
            && reclaimable as f64 > config.inactive_fraction.value * self.atom_db.count() as f64
    }

    /// Runs whichever pass is due, if any, and returns the pass run.
    ///
    /// Requires a propagation fixpoint.
    /// Compaction is only considered at the root, and the mode of the context is restored after compaction.
    pub fn collect_if_due(&mut self) -> Result<Scheduled, ErrorKind> {
        let compact = self.compaction_due();
        if !compact && !self.collection_due() {
            return Ok(Scheduled::Nothing);
        }
        if self.check_callback_terminate() {
            log::info!(target: targets::COLLECT, "Termination requested, no pass scheduled");
            return Ok(Scheduled::Nothing);
        }

        if compact {
            let watching = self.watching;
            self.enter_dense_mode();
            self.compact_variables()?;
            if watching {
                self.resume_sparse_mode()?;
            }
            return Ok(Scheduled::Compaction);
        }

        match self.watching {
            true => {
                self.run_sparse_collection(0)?;
                Ok(Scheduled::Sparse)
            }
            false => {
                self.run_dense_collection()?;
                Ok(Scheduled::Dense)
            }
        }
    }
}
