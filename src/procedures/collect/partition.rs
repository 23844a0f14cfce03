//! Placement of the records which survive a sweep.
//!
//! Survivors are written back over the swept region, in order.
//! If the partition of the arena is violated, redundant survivors are instead copied to a buffer and appended after every irredundant survivor once the sweep is done.
//! So, after a sweep, every irredundant record is before every redundant record.

use crate::{
    db::{arena::header::HEADER_WORDS, keys::ClauseRef},
    structures::literal::Literal,
    types::err::{self},
};

/// Where a survivor was written.
#[derive(Clone, Copy, Debug)]
pub(super) enum Placement {
    Arena(usize),
    Buffer(usize),
}

pub(super) struct Relocator {
    /// True if redundant survivors are held back in the buffer.
    split: bool,

    /// The next offset to write a survivor to.
    write: usize,

    buffer: Vec<u32>,

    first_reducible: Option<usize>,
    last_irredundant: Option<usize>,
}

impl Relocator {
    pub(super) fn new(start: usize, split: bool) -> Self {
        Relocator {
            split,
            write: start,
            buffer: Vec::default(),
            first_reducible: None,
            last_irredundant: None,
        }
    }

    /// Writes a record with the given header words and literals.
    ///
    /// The record is written to the arena at or before the offset it was read from, and so no unread record is overwritten.
    pub(super) fn emit(
        &mut self,
        words: &mut [u32],
        header: [u32; HEADER_WORDS],
        literals: &[Literal],
        redundant: bool,
    ) -> Result<Placement, err::ArenaError> {
        let length = HEADER_WORDS + literals.len();

        if self.split && redundant {
            self.buffer
                .try_reserve(length)
                .map_err(|_| err::ArenaError::AllocationFailure)?;
            let offset = self.buffer.len();
            self.buffer.extend_from_slice(&header);
            self.buffer.extend(literals.iter().map(|literal| literal.raw()));
            return Ok(Placement::Buffer(offset));
        }

        let offset = self.write;
        words[offset..offset + HEADER_WORDS].copy_from_slice(&header);
        for (word, literal) in words[offset + HEADER_WORDS..offset + length].iter_mut().zip(literals) {
            *word = literal.raw();
        }
        self.write += length;

        match redundant {
            true => {
                if self.first_reducible.is_none() {
                    self.first_reducible = Some(offset);
                }
            }
            false => self.last_irredundant = Some(offset),
        }
        Ok(Placement::Arena(offset))
    }

    /// Appends any held back survivors, and returns the end of the arena together with the first redundant and last irredundant survivor.
    pub(super) fn finish(
        &mut self,
        words: &mut Vec<u32>,
    ) -> (usize, Option<ClauseRef>, Option<ClauseRef>) {
        words.truncate(self.write);
        if !self.buffer.is_empty() {
            // The buffer is no larger than the space freed by truncation, so no allocation is required.
            self.first_reducible = Some(self.write);
            words.extend_from_slice(&self.buffer);
        }
        (
            words.len(),
            self.first_reducible.map(ClauseRef::from_offset),
            self.last_irredundant.map(ClauseRef::from_offset),
        )
    }

    /// The reference of the survivor written to `placement`.
    ///
    /// Only meaningful after [finish](Relocator::finish).
    pub(super) fn resolve(&self, placement: Placement) -> ClauseRef {
        match placement {
            Placement::Arena(offset) => ClauseRef::from_offset(offset),
            Placement::Buffer(offset) => ClauseRef::from_offset(self.write + offset),
        }
    }
}
