//! A database of literal sequences: the trail, the decision frames over the trail, and a queue of learnt units.
//!
//! # Components
//!
//! ## The trail
//!
//! Every assigned literal, in order of assignment.
//! Literals before the *propagated* mark have been propagated, and collection or compaction is only permitted when every literal has been propagated.
//!
//! ## Frames
//!
//! A stack of [Frame]s, one for each decision made, recording the decision and where on the trail the consequences of the decision begin.
//! So, the current decision level is the count of frames, and the root level is the level with no frames.
//!
//! ## Units
//!
//! Clauses of a single literal are never stored, and instead are queued as units until assigned at the root.

use crate::{db::keys::LevelIndex, structures::literal::Literal};

/// A decision, and where on the trail the consequences of the decision begin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub decision: Literal,
    pub trail_start: usize,
}

#[derive(Default)]
pub struct LiteralDB {
    trail: Vec<Literal>,
    frames: Vec<Frame>,

    /// The count of literals on the trail which have been propagated.
    propagated: usize,

    /// Units awaiting assignment.
    units: Vec<Literal>,
}

impl LiteralDB {
    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.frames.len() as LevelIndex
    }

    pub fn trail(&self) -> &[Literal] {
        &self.trail
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn units(&self) -> &[Literal] {
        &self.units
    }

    /// The count of literals on the trail which have been propagated.
    pub fn propagated(&self) -> usize {
        self.propagated
    }

    /// True if every literal on the trail has been propagated.
    pub fn is_propagated(&self) -> bool {
        self.propagated == self.trail.len()
    }

    pub(crate) fn push_trail(&mut self, literal: Literal) {
        self.trail.push(literal);
    }

    pub(crate) fn push_frame(&mut self, decision: Literal) {
        self.frames.push(Frame {
            decision,
            trail_start: self.trail.len(),
        });
    }

    pub(crate) fn push_unit(&mut self, literal: Literal) {
        self.units.push(literal);
    }

    pub(crate) fn take_units(&mut self) -> Vec<Literal> {
        std::mem::take(&mut self.units)
    }

    pub(crate) fn mark_propagated(&mut self) {
        self.propagated = self.trail.len();
    }

    /// Removes every frame above `level`, and returns the literals assigned above `level` (most recent last).
    pub(crate) fn backtrack(&mut self, level: LevelIndex) -> Vec<Literal> {
        let Some(frame) = self.frames.get(level as usize) else {
            return Vec::default();
        };
        let unassigned = self.trail.split_off(frame.trail_start);
        self.frames.truncate(level as usize);
        self.propagated = self.propagated.min(self.trail.len());
        unassigned
    }

    /// Rewrites every literal of the trail and frames by `map`.
    ///
    /// Trail literals mapped to an already present literal are dropped, as are unmapped literals.
    /// Frames are rewritten to the rewritten trail.
    pub(crate) fn remap(&mut self, map: impl Fn(Literal) -> Option<Literal>) {
        let mut seen = std::collections::HashSet::new();
        let mut position = Vec::with_capacity(self.trail.len() + 1);
        let mut trail = Vec::with_capacity(self.trail.len());
        for literal in &self.trail {
            position.push(trail.len());
            if let Some(mapped) = map(*literal) {
                if seen.insert(mapped.variable()) {
                    trail.push(mapped);
                }
            }
        }
        position.push(trail.len());

        let propagated = position[self.propagated];
        for frame in self.frames.iter_mut() {
            frame.trail_start = position[frame.trail_start];
            frame.decision = map(frame.decision).unwrap_or(Literal::INVALID);
        }

        self.trail = trail;
        self.propagated = propagated;
    }

    /// Rewrites every pending unit by `map`, dropping unmapped units.
    pub(crate) fn remap_units(&mut self, map: impl Fn(Literal) -> Option<Literal>) {
        self.units.retain_mut(|unit| match map(*unit) {
            Some(mapped) => {
                *unit = mapped;
                true
            }
            None => false,
        });
    }
}
