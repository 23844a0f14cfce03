/*!
Collection of garbage in the arena.

# Overview

A collection sweeps the arena from some offset, and:
- Drops every garbage record, and any padding left by [shrinking](crate::db::arena::Arena::shrink_clause).
- Removes literals false at the root from each record.
- Drops every record satisfied at the root, unless the record is the reason for some assignment.
- Turns every record left with two literals into a binary clause, i.e. a pair of watches.
- Writes every surviving record back over the swept region, keeping the order of the records.

If the partition of the arena was violated, survivors are written so that every irredundant record precedes every redundant record.

After a sweep, every copy of a reference held by the context is rewritten:
- The reason of each assignment to a moved (or demoted) record.
- Watches, which are rebuilt by [sparse](sparse) collection, and absent during [dense](dense) collection.

# Variations

- [Sparse](sparse) collection may be run at any decision level, with large clauses watched.
  The watches of large clauses are flushed and rebuilt around the sweep.
- [Dense](dense) collection is run at the root with no large clause watched, and the sweep covers the whole arena.
  Dense collection is also used by [compaction](crate::procedures::compact) to rewrite every literal of the arena.

Either collection may only be run when every assignment has been propagated, and neither is re-entrant.
*/

pub mod dense;
mod partition;
pub mod sparse;

use partition::{Placement, Relocator};

use crate::{
    context::Context,
    db::{
        arena::{
            self,
            header::{self, flags, HEADER_WORDS, INITIAL_SEARCHED, META_WORD, SEARCHED_WORD, SIZE_WORD, WORD_BYTES},
        },
        atom::Remapping,
        keys::{ClauseRef, Reason},
        watches::pool::Watch,
    },
    misc::log::targets::{self},
    structures::{literal::Literal, variable::Variable},
    types::err::{self, ErrorKind},
};

/// A summary of a sweep.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepReport {
    /// Bytes by which the arena shrank.
    pub reclaimed_bytes: usize,

    /// Records which survived the sweep.
    pub survivors: usize,

    /// Records dropped as garbage.
    pub garbage: usize,

    /// Records dropped as satisfied.
    pub satisfied: usize,

    /// Records turned into binary clauses.
    pub demoted: usize,

    /// Literals removed from surviving records.
    pub flushed: usize,
}

impl Context {
    /// Checks the context is at a propagation fixpoint.
    pub(crate) fn require_propagated(&self) -> Result<(), err::StateError> {
        match self.literal_db.is_propagated() {
            true => Ok(()),
            false => Err(err::StateError::PropagationPending),
        }
    }

    /// Checks the context is at the root.
    pub(crate) fn require_root(&self) -> Result<(), err::StateError> {
        match self.literal_db.level() {
            0 => Ok(()),
            _ => Err(err::StateError::DecisionMade),
        }
    }

    /// Flags every record which is the reason of some assignment.
    fn mark_reasons(&mut self, value: bool) {
        for literal in self.literal_db.trail() {
            if let Reason::Large(clause) = self.atom_db.assignment(literal.variable()).reason {
                self.arena.clause_mut(clause).set_reason(value);
            }
        }
    }

    /// Sweeps the arena from `start`, rewriting every literal by `remapping` if given.
    ///
    /// `start` must be the offset of some record, or the end of the arena.
    /// Records flagged as reasons must be flagged before the sweep.
    pub(crate) fn sweep(&mut self, start: usize, remapping: Option<&Remapping>) -> Result<SweepReport, ErrorKind> {
        let mut report = SweepReport::default();
        let old_end = self.arena.end();
        let split = self.arena.partition_violated();

        let first_before = self.arena.first_reducible().filter(|first| first.offset() < start);
        let last_before = self.arena.last_irredundant().filter(|last| last.offset() < start);

        let mut relocator = Relocator::new(start, split);
        let mut literals: Vec<Literal> = Vec::default();

        // Reasons of moved records, resolved once every survivor has a place.
        let mut moved: Vec<(ClauseRef, Placement)> = Vec::default();
        let mut rewrites: Vec<(Variable, Reason)> = Vec::default();

        let mut swept_garbage = 0;
        let mut position = start;

        loop {
            let words = self.arena.words_mut();
            let Some(record) = arena::next_record(words, position) else {
                swept_garbage += (words.len() - position) * WORD_BYTES;
                break;
            };
            swept_garbage += (record - position) * WORD_BYTES;

            let size = words[record + SIZE_WORD] as usize;
            let meta = words[record + META_WORD];
            let searched = words[record + SEARCHED_WORD];
            position = record + HEADER_WORDS + size;

            if meta & flags::GARBAGE != 0 {
                debug_assert!(meta & flags::REASON == 0, "Garbage reason @{record}");
                swept_garbage += header::record_bytes(size);
                report.garbage += 1;
                continue;
            }

            let redundant = meta & flags::REDUNDANT != 0;
            let reason = meta & flags::REASON != 0;
            let clause = ClauseRef::from_offset(record);

            literals.clear();
            let mut satisfied = false;
            let mut flushed = 0;
            let mut unmapped = false;
            for raw in &words[record + HEADER_WORDS..position] {
                let literal = Literal::from_raw(*raw);
                let literal = match remapping {
                    None => literal,
                    Some(remapping) => match remapping.literal(literal) {
                        Some(mapped) => mapped,
                        None => {
                            unmapped = true;
                            break;
                        }
                    },
                };
                match self.atom_db.root_value_of(literal) {
                    Some(true) => satisfied = true,
                    Some(false) => {
                        flushed += 1;
                        continue;
                    }
                    None => {}
                }
                literals.push(literal);
            }

            // A record of a dropped variable is dropped with the variable.
            if unmapped || (satisfied && !reason) {
                if unmapped {
                    log::warn!(target: targets::COLLECT, "Record {clause} holds a dropped variable");
                }
                *self.counters.count_large(redundant) -= 1;
                report.satisfied += 1;
                continue;
            }

            if literals.len() < 2 {
                // Only possible away from a propagation fixpoint, where the record is kept as it is.
                log::warn!(target: targets::COLLECT, "Record {clause} is unit or empty at the root");
                debug_assert!(false, "Unpropagated record {clause}");
                literals.clear();
                literals.extend(words[record + HEADER_WORDS..position].iter().map(|raw| {
                    let literal = Literal::from_raw(*raw);
                    remapping.and_then(|r| r.literal(literal)).unwrap_or(literal)
                }));
                flushed = 0;
            }
            report.flushed += flushed;

            if literals.len() == 2 {
                let (a, b) = (literals[0], literals[1]);
                self.watches.watch_binary(a, b, redundant)?;
                *self.counters.count_large(redundant) -= 1;
                *self.counters.count_binary(redundant) += 1;
                report.demoted += 1;

                if reason {
                    for (forced, other) in [(a, b), (b, a)] {
                        if self.atom_db.assignment(forced.variable()).reason == Reason::Large(clause)
                            && self.atom_db.value_of(forced) == Some(true)
                        {
                            rewrites.push((forced.variable(), Reason::Binary(other)));
                        }
                    }
                }
                log::trace!(target: targets::COLLECT, "Demoted {clause} to {a} {b}");
                continue;
            }

            let new_size = literals.len();
            let mut meta = meta;
            let mut searched = searched;
            if new_size < size {
                meta |= flags::SHRUNKEN;
                if searched as usize >= new_size {
                    searched = INITIAL_SEARCHED;
                }
            }

            let placement = relocator.emit(words, [new_size as u32, meta, searched], &literals, redundant)?;
            if reason {
                moved.push((clause, placement));
            }
            report.survivors += 1;
        }

        let (end, first_after, last_after) = relocator.finish(self.arena.words_mut());

        for (old, placement) in moved {
            let new = relocator.resolve(placement);
            let forced = self.arena.clause(new).literals().iter().copied().find(|literal| {
                self.atom_db.assignment(literal.variable()).reason == Reason::Large(old)
                    && self.atom_db.value_of(*literal) == Some(true)
            });
            match forced {
                Some(forced) => rewrites.push((forced.variable(), Reason::Large(new))),
                None => debug_assert!(false, "Reason {old} forces nothing"),
            }
        }
        for (variable, reason) in rewrites {
            self.atom_db.set_reason(variable, reason);
        }

        // A sweep lowered to the first redundant record leaves no irredundant bound before the start.
        let last_irredundant = last_after.or(last_before).or_else(|| {
            self.arena
                .iter()
                .take_while(|clause| clause.offset() < start)
                .filter(|clause| !self.arena.clause(*clause).is_redundant())
                .last()
        });

        let garbage = self.arena.garbage_bytes().saturating_sub(swept_garbage);
        self.arena
            .collected(end, garbage, first_before.or(first_after), last_irredundant);

        report.reclaimed_bytes = (old_end - end) * WORD_BYTES;
        self.counters.collected_bytes += report.reclaimed_bytes;
        self.counters.flushed_literals += report.flushed;
        self.counters.satisfied_clauses += report.satisfied;
        self.counters.demoted_clauses += report.demoted;

        Ok(report)
    }

    /// Defragments the watch pool, if due.
    pub(crate) fn defragment_if_due(&mut self) {
        if self.watches.defragmentation_due() {
            self.watches.defragment();
            self.counters.defragmentations += 1;
        }
    }

    /// True if every reason of the trail is a live record which holds the forced literal.
    ///
    /// A check intended for debugging and tests.
    pub fn reasons_consistent(&self) -> bool {
        self.literal_db.trail().iter().all(|literal| {
            let assignment = self.atom_db.assignment(literal.variable());
            match assignment.reason {
                Reason::Decision => assignment.level > 0,
                Reason::Unit => assignment.level == 0,
                Reason::Binary(other) => self.watches.list(other).iter().any(
                    |watch| matches!(watch, Watch::Binary { other: o, .. } if o == literal),
                ),
                Reason::Large(clause) => {
                    self.arena.is_valid(clause) && self.arena.clause(clause).literals().contains(literal)
                }
            }
        })
    }
}
