/*!
The arena, a contiguous buffer holding every clause of length three or more.

# Overview

Clauses are stored back-to-back as records (a [header](header) followed by the literals of the clause), and are addressed by a [ClauseRef] holding the offset of the record rather than an address.
So, the buffer may be reallocated (and moved) as it grows without any change to the references held elsewhere.

Allocation is at the end of the buffer, and is amortised constant time.
Dereferencing a reference is an offset into the buffer, and no check is made on whether the referenced record is garbage --- establishing the validity of a reference is left to the caller (and to debug assertions).

Binary clauses are never stored in the arena, see [watches](crate::db::watches).

# Garbage

Removal of a clause is in two phases:
1. The record is [marked as garbage](Arena::mark_garbage), and the bytes of the record are immediately counted as garbage.
2. A later [collection](crate::procedures::collect) reclaims the bytes, by moving each live record over any garbage.

So, a read of [garbage_bytes](Arena::garbage_bytes) between the two phases observes bytes counted as freed which are not yet available for allocation.

Likewise, [shrinking](Arena::shrink_clause) a clause pads the freed literal words with [INVALID](Literal::INVALID) literals, which are counted as garbage until the next collection.

# The partition

Records of irredundant clauses are (ideally) stored before records of redundant clauses, so membership of a region is a comparison against a single reference.
The arena tracks the first redundant record and the last irredundant record.
An irredundant clause stored after some redundant clause (or a promoted clause) violates the partition until the next collection, which restores it.
*/

pub mod header;
mod view;
pub use view::{Clause, ClauseMut};

use header::{flags, HEADER_WORDS, META_WORD, SIZE_WORD, WORD_BYTES};

use crate::{
    config::dbs::ArenaConfig,
    db::keys::ClauseRef,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self},
};

/// The clause arena.
pub struct Arena {
    /// Every record, back-to-back, possibly with padding left by shrinking.
    words: Vec<u32>,

    /// Bytes of garbage records and padding, counted when marked.
    garbage_bytes: usize,

    /// The first redundant record, if any.
    first_reducible: Option<ClauseRef>,

    /// The last irredundant record, if any.
    last_irredundant: Option<ClauseRef>,

    /// A local configuration, typically derived from the configuration of a context.
    pub config: ArenaConfig,
}

impl Arena {
    /// A new [Arena] with local configuration options derived from `config`.
    pub fn new(config: &ArenaConfig) -> Self {
        Arena {
            words: Vec::default(),
            garbage_bytes: 0,
            first_reducible: None,
            last_irredundant: None,
            config: config.clone(),
        }
    }

    /// Reserves a record for a clause of `size` literals at the end of the arena, and returns a reference to the record.
    ///
    /// The literals of the record are [INVALID](Literal::INVALID) until written, and the glue is zero.
    ///
    /// Fails if the allocator cannot grow the arena, or if the record would not be addressable by a reference.
    /// Either failure is fatal, as the arena is not rolled back.
    pub fn allocate(&mut self, size: usize, redundant: bool) -> Result<ClauseRef, err::ArenaError> {
        let offset = self.words.len();
        let required = header::record_words(size);

        if size >= u32::MAX as usize || ClauseRef::MAX_OFFSET - offset < required {
            log::error!(target: targets::ARENA, "Reference space exhausted at {offset} words");
            return Err(err::ArenaError::ReferenceSpaceExhausted);
        }

        if self.words.try_reserve(required).is_err() {
            log::error!(target: targets::ARENA, "Failed to grow the arena by {required} words");
            return Err(err::ArenaError::AllocationFailure);
        }

        self.words.push(size as u32);
        self.words.push(header::fresh_meta(0, redundant));
        self.words.push(header::INITIAL_SEARCHED);
        self.words.resize(offset + required, Literal::INVALID.raw());

        let clause = ClauseRef::from_offset(offset);
        match redundant {
            true => {
                if self.first_reducible.is_none() {
                    self.first_reducible = Some(clause);
                }
            }
            false => self.last_irredundant = Some(clause),
        }

        Ok(clause)
    }

    /// Stores `literals` as a fresh record with the given glue, and returns a reference to the record.
    pub fn store(
        &mut self,
        literals: &[Literal],
        glue: u32,
        redundant: bool,
    ) -> Result<ClauseRef, err::ArenaError> {
        let clause = self.allocate(literals.len(), redundant)?;
        let mut record = self.clause_mut(clause);
        record.set_glue(glue);
        record.literals_mut().copy_from_slice(literals);

        log::trace!(target: targets::ARENA, "Stored {clause}: {}", self.clause(clause));
        Ok(clause)
    }

    /// A view of the record referenced by `clause`.
    ///
    /// No check is made on whether the record is garbage, outside of debug builds.
    pub fn clause(&self, clause: ClauseRef) -> Clause<'_> {
        debug_assert!(self.is_valid(clause), "Stale reference {clause}");
        let offset = clause.offset();
        let size = self.words[offset + SIZE_WORD] as usize;
        Clause::new(&self.words[offset..offset + HEADER_WORDS + size])
    }

    /// A mutable view of the record referenced by `clause`.
    ///
    /// No check is made on whether the record is garbage, outside of debug builds.
    pub fn clause_mut(&mut self, clause: ClauseRef) -> ClauseMut<'_> {
        debug_assert!(self.is_valid(clause), "Stale reference {clause}");
        let offset = clause.offset();
        let size = self.words[offset + SIZE_WORD] as usize;
        ClauseMut::new(&mut self.words[offset..offset + HEADER_WORDS + size])
    }

    /// A view of the record referenced by `clause`, without bounds checks.
    ///
    /// # Safety
    /// `clause` must reference a record of the arena.
    pub unsafe fn clause_unchecked(&self, clause: ClauseRef) -> Clause<'_> {
        let offset = clause.offset();
        let size = *unsafe { self.words.get_unchecked(offset + SIZE_WORD) } as usize;
        Clause::new(unsafe { self.words.get_unchecked(offset..offset + HEADER_WORDS + size) })
    }

    /// A view of the record referenced by `clause`, whether or not the record is garbage.
    pub fn record(&self, clause: ClauseRef) -> Clause<'_> {
        let offset = clause.offset();
        let size = self.words[offset + SIZE_WORD] as usize;
        Clause::new(&self.words[offset..offset + HEADER_WORDS + size])
    }

    /// True if `clause` is within the arena and the header at `clause` is not garbage.
    ///
    /// As a reference may point to the middle of some record this is a necessary but not a sufficient check.
    /// For a sufficient check, see [contains_record](Arena::contains_record).
    pub fn is_valid(&self, clause: ClauseRef) -> bool {
        let offset = clause.offset();
        if !clause.is_valid() || self.words.len() < offset + HEADER_WORDS {
            return false;
        }
        let size = self.words[offset + SIZE_WORD] as usize;
        self.words.len() >= offset + HEADER_WORDS + size
            && self.words[offset + META_WORD] & flags::GARBAGE == 0
    }

    /// True if `clause` is the reference of a live record.
    ///
    /// A linear walk of the arena, intended for debugging and tests.
    pub fn contains_record(&self, clause: ClauseRef) -> bool {
        self.iter().any(|live| live == clause)
    }

    /// Marks the record referenced by `clause` as garbage, and counts the bytes of the record as garbage.
    ///
    /// The bytes are not reclaimed until the next collection.
    pub fn mark_garbage(&mut self, clause: ClauseRef) {
        debug_assert!(self.is_valid(clause), "Garbage marked twice {clause}");
        let offset = clause.offset();
        let size = self.words[offset + SIZE_WORD] as usize;
        self.words[offset + META_WORD] |= flags::GARBAGE;
        self.garbage_bytes += header::record_bytes(size);

        log::trace!(target: targets::ARENA, "Garbage {clause}");
    }

    /// Removes literals from the end of the record referenced by `clause`, leaving `new_size` literals.
    ///
    /// The freed words are padded with invalid literals and counted as garbage until the next collection.
    pub fn shrink_clause(&mut self, clause: ClauseRef, new_size: usize) {
        debug_assert!(self.is_valid(clause));
        let offset = clause.offset();
        let old_size = self.words[offset + SIZE_WORD] as usize;
        debug_assert!(2 < new_size && new_size <= old_size);
        if new_size == old_size {
            return;
        }

        let literals = offset + HEADER_WORDS;
        self.words[literals + new_size..literals + old_size].fill(Literal::INVALID.raw());
        self.words[offset + SIZE_WORD] = new_size as u32;
        self.words[offset + META_WORD] |= flags::SHRUNKEN;

        let searched = &mut self.words[offset + header::SEARCHED_WORD];
        if *searched as usize >= new_size {
            *searched = header::INITIAL_SEARCHED;
        }

        self.garbage_bytes += (old_size - new_size) * WORD_BYTES;
    }

    /// Turns the redundant record referenced by `clause` irredundant.
    pub fn promote(&mut self, clause: ClauseRef) {
        debug_assert!(self.is_valid(clause));
        self.words[clause.offset() + META_WORD] &= !flags::REDUNDANT;
        if self.last_irredundant.map_or(true, |last| last < clause) {
            self.last_irredundant = Some(clause);
        }
        // The redundant region now begins at the next redundant record, if any.
        if self.first_reducible == Some(clause) {
            self.first_reducible = self
                .iter_from(clause.offset())
                .find(|record| self.clause(*record).is_redundant());
        }
    }

    /// An iterator over references to every live record, in order of storage.
    pub fn iter(&self) -> ClauseIter<'_> {
        self.iter_from(0)
    }

    /// An iterator over references to every live record at or after `start`.
    ///
    /// `start` must be the offset of some record, or the end of the arena.
    pub fn iter_from(&self, start: usize) -> ClauseIter<'_> {
        ClauseIter {
            words: &self.words,
            position: start,
        }
    }

    /// The bytes of the arena, including garbage.
    pub fn bytes(&self) -> usize {
        self.words.len() * WORD_BYTES
    }

    /// The bytes of the arena counted as garbage.
    pub fn garbage_bytes(&self) -> usize {
        self.garbage_bytes
    }

    /// The bytes of the arena in live records.
    pub fn live_bytes(&self) -> usize {
        self.bytes() - self.garbage_bytes
    }

    /// The bytes reserved by the arena, including spare capacity.
    pub fn capacity_bytes(&self) -> usize {
        self.words.capacity() * WORD_BYTES
    }

    /// The offset one past the last record.
    pub fn end(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The first redundant record, if any.
    pub fn first_reducible(&self) -> Option<ClauseRef> {
        self.first_reducible
    }

    /// The last irredundant record, if any.
    pub fn last_irredundant(&self) -> Option<ClauseRef> {
        self.last_irredundant
    }

    /// True if some irredundant record is stored after some redundant record.
    pub fn partition_violated(&self) -> bool {
        match (self.first_reducible, self.last_irredundant) {
            (Some(first), Some(last)) => first < last,
            _ => false,
        }
    }

    /// True if `clause` is in the redundant region of the arena.
    ///
    /// Only meaningful while the partition holds.
    pub fn is_redundant_region(&self, clause: ClauseRef) -> bool {
        self.first_reducible.is_some_and(|first| first <= clause)
    }
}

/// Methods used by collection to move records.
impl Arena {
    pub(crate) fn words_mut(&mut self) -> &mut Vec<u32> {
        &mut self.words
    }

    /// Records the outcome of a collection: the arena ends at `end`, has `garbage_bytes` of garbage (before the swept region), and the given partition.
    pub(crate) fn collected(
        &mut self,
        end: usize,
        garbage_bytes: usize,
        first_reducible: Option<ClauseRef>,
        last_irredundant: Option<ClauseRef>,
    ) {
        self.words.truncate(end);
        self.garbage_bytes = garbage_bytes;
        self.first_reducible = first_reducible;
        self.last_irredundant = last_irredundant;
        self.shrink_capacity();
    }

    /// Returns spare capacity to the allocator, if the capacity is excessive.
    fn shrink_capacity(&mut self) {
        let factor = self.config.shrink_factor.value;
        if self.words.capacity() > factor.saturating_mul(self.words.len()).max(1) {
            let before = self.capacity_bytes();
            self.words.shrink_to_fit();
            log::debug!(target: targets::ARENA, "Capacity shrunk from {before} to {} bytes", self.capacity_bytes());
        }
    }
}

/// An iterator over the live records of an arena.
///
/// Garbage records and padding are skipped.
pub struct ClauseIter<'a> {
    words: &'a [u32],
    position: usize,
}

impl Iterator for ClauseIter<'_> {
    type Item = ClauseRef;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = next_record(self.words, self.position)?;
            let size = self.words[record + SIZE_WORD] as usize;
            self.position = record + HEADER_WORDS + size;
            if self.words[record + META_WORD] & flags::GARBAGE == 0 {
                return Some(ClauseRef::from_offset(record));
            }
        }
    }
}

/// The offset of the first record (garbage or not) at or after `position`, skipping padding.
pub(crate) fn next_record(words: &[u32], mut position: usize) -> Option<usize> {
    while position < words.len() {
        if words[position] != Literal::INVALID.raw() {
            return Some(position);
        }
        position += 1;
    }
    None
}
