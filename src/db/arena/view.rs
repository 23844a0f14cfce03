//! Views of a record in the arena.
//!
//! A view borrows the arena, and so no view outlives a later allocation (which may move the arena).

use crate::structures::literal::Literal;

use super::header::{self, flags, HEADER_WORDS, META_WORD, SEARCHED_WORD, SIZE_WORD};

/// Reinterprets words of the arena as literals.
fn as_literals(words: &[u32]) -> &[Literal] {
    // # Safety: Literal is a transparent wrapper around u32.
    unsafe { std::slice::from_raw_parts(words.as_ptr().cast::<Literal>(), words.len()) }
}

/// Reinterprets words of the arena as literals.
fn as_literals_mut(words: &mut [u32]) -> &mut [Literal] {
    // # Safety: Literal is a transparent wrapper around u32.
    unsafe { std::slice::from_raw_parts_mut(words.as_mut_ptr().cast::<Literal>(), words.len()) }
}

/// A read-only view of a clause record.
#[derive(Clone, Copy)]
pub struct Clause<'a> {
    /// The header and literals of the record.
    words: &'a [u32],
}

impl<'a> Clause<'a> {
    pub(super) fn new(words: &'a [u32]) -> Self {
        debug_assert_eq!(words.len(), HEADER_WORDS + words[SIZE_WORD] as usize);
        Clause { words }
    }

    /// The count of literals in the clause.
    pub fn size(&self) -> usize {
        self.words[SIZE_WORD] as usize
    }

    /// The literals of the clause.
    pub fn literals(&self) -> &'a [Literal] {
        as_literals(&self.words[HEADER_WORDS..])
    }

    /// The glue (or LBD) of the clause, saturated at [MAX_GLUE](header::MAX_GLUE).
    pub fn glue(&self) -> u32 {
        header::meta_glue(self.words[META_WORD])
    }

    /// The usage counter of the clause.
    pub fn used(&self) -> u32 {
        header::meta_used(self.words[META_WORD])
    }

    /// The position from which a search for a replacement watch resumes.
    pub fn searched(&self) -> usize {
        self.words[SEARCHED_WORD] as usize
    }

    fn flag(&self, flag: u32) -> bool {
        self.words[META_WORD] & flag != 0
    }

    pub fn is_garbage(&self) -> bool {
        self.flag(flags::GARBAGE)
    }

    pub fn is_redundant(&self) -> bool {
        self.flag(flags::REDUNDANT)
    }

    pub fn is_reason(&self) -> bool {
        self.flag(flags::REASON)
    }

    pub fn is_shrunken(&self) -> bool {
        self.flag(flags::SHRUNKEN)
    }

    pub fn is_subsumed(&self) -> bool {
        self.flag(flags::SUBSUMED)
    }

    pub fn is_vivified(&self) -> bool {
        self.flag(flags::VIVIFIED)
    }

    pub fn is_swept(&self) -> bool {
        self.flag(flags::SWEPT)
    }

    /// The bytes taken by the record in the arena.
    pub fn bytes(&self) -> usize {
        header::record_bytes(self.size())
    }
}

impl std::fmt::Display for Clause<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let literals = self.literals();
        write!(f, "{}", crate::structures::literal::as_dimacs_string(literals))
    }
}

/// A mutable view of a clause record.
///
/// The size of a record is not mutable through a view, see [shrink_clause](super::Arena::shrink_clause).
/// Likewise, the garbage flag, see [mark_garbage](super::Arena::mark_garbage).
pub struct ClauseMut<'a> {
    words: &'a mut [u32],
}

impl<'a> ClauseMut<'a> {
    pub(super) fn new(words: &'a mut [u32]) -> Self {
        debug_assert_eq!(words.len(), HEADER_WORDS + words[SIZE_WORD] as usize);
        ClauseMut { words }
    }

    pub fn size(&self) -> usize {
        self.words[SIZE_WORD] as usize
    }

    pub fn literals(&self) -> &[Literal] {
        as_literals(&self.words[HEADER_WORDS..])
    }

    /// The literals of the clause, mutable in place (e.g. to swap watched literals).
    pub fn literals_mut(&mut self) -> &mut [Literal] {
        as_literals_mut(&mut self.words[HEADER_WORDS..])
    }

    pub fn glue(&self) -> u32 {
        header::meta_glue(self.words[META_WORD])
    }

    pub fn set_glue(&mut self, glue: u32) {
        self.words[META_WORD] = header::meta_with_glue(self.words[META_WORD], glue);
    }

    pub fn used(&self) -> u32 {
        header::meta_used(self.words[META_WORD])
    }

    pub fn set_used(&mut self, used: u32) {
        self.words[META_WORD] = header::meta_with_used(self.words[META_WORD], used);
    }

    pub fn searched(&self) -> usize {
        self.words[SEARCHED_WORD] as usize
    }

    pub fn set_searched(&mut self, position: usize) {
        debug_assert!(position < self.size());
        self.words[SEARCHED_WORD] = position as u32;
    }

    fn set_flag(&mut self, flag: u32, value: bool) {
        match value {
            true => self.words[META_WORD] |= flag,
            false => self.words[META_WORD] &= !flag,
        }
    }

    pub fn is_garbage(&self) -> bool {
        self.words[META_WORD] & flags::GARBAGE != 0
    }

    pub fn is_redundant(&self) -> bool {
        self.words[META_WORD] & flags::REDUNDANT != 0
    }

    pub fn is_reason(&self) -> bool {
        self.words[META_WORD] & flags::REASON != 0
    }

    pub fn set_reason(&mut self, value: bool) {
        self.set_flag(flags::REASON, value)
    }

    pub fn set_subsumed(&mut self, value: bool) {
        self.set_flag(flags::SUBSUMED, value)
    }

    pub fn set_vivified(&mut self, value: bool) {
        self.set_flag(flags::VIVIFIED, value)
    }

    pub fn set_swept(&mut self, value: bool) {
        self.set_flag(flags::SWEPT, value)
    }
}
