/*!
The layout of a clause record.

Each record is a fixed header of [HEADER_WORDS] words followed by the literals of the clause:

| word | contents |
|------|----------|
| 0 | size, the count of literals |
| 1 | meta, packing flags (bits 0--6), the usage counter (bits 8--11), and glue (bits 12--31) |
| 2 | searched, the position from which propagation resumes a search for a replacement watch |
| 3.. | literals |

The usage counter and glue saturate at [MAX_USED] and [MAX_GLUE].
*/

/// The count of words in a record header.
pub const HEADER_WORDS: usize = 3;

pub(crate) const SIZE_WORD: usize = 0;
pub(crate) const META_WORD: usize = 1;
pub(crate) const SEARCHED_WORD: usize = 2;

/// The bytes taken by a word of the arena.
pub const WORD_BYTES: usize = std::mem::size_of::<u32>();

/// Flags of a record, stored in the low bits of the meta word.
pub mod flags {
    /// The record is garbage, and awaits collection.
    pub const GARBAGE: u32 = 1 << 0;

    /// The record is a learnt clause which may be deleted.
    pub const REDUNDANT: u32 = 1 << 1;

    /// The record is the reason of some current assignment.
    pub const REASON: u32 = 1 << 2;

    /// Literals of the record have been removed since it was stored.
    pub const SHRUNKEN: u32 = 1 << 3;

    /// The record has been checked for subsumption.
    pub const SUBSUMED: u32 = 1 << 4;

    /// The record has been vivified.
    pub const VIVIFIED: u32 = 1 << 5;

    /// The record has been swept.
    pub const SWEPT: u32 = 1 << 6;

    pub(crate) const ALL: u32 = 0x7f;
}

const USED_SHIFT: u32 = 8;
const USED_MASK: u32 = 0xf;

/// The largest value of the usage counter.
pub const MAX_USED: u32 = USED_MASK;

const GLUE_SHIFT: u32 = 12;

/// The largest glue representable by a record.
pub const MAX_GLUE: u32 = (1 << 20) - 1;

/// The first position to search for a replacement watch, as the first two literals are watched.
pub const INITIAL_SEARCHED: u32 = 2;

/// A meta word for a fresh record with the given glue.
pub fn fresh_meta(glue: u32, redundant: bool) -> u32 {
    let mut meta = glue.min(MAX_GLUE) << GLUE_SHIFT;
    if redundant {
        meta |= flags::REDUNDANT;
    }
    meta
}

pub(super) fn meta_glue(meta: u32) -> u32 {
    meta >> GLUE_SHIFT
}

pub(super) fn meta_with_glue(meta: u32, glue: u32) -> u32 {
    (meta & !(MAX_GLUE << GLUE_SHIFT)) | (glue.min(MAX_GLUE) << GLUE_SHIFT)
}

pub(super) fn meta_used(meta: u32) -> u32 {
    (meta >> USED_SHIFT) & USED_MASK
}

pub(super) fn meta_with_used(meta: u32, used: u32) -> u32 {
    (meta & !(USED_MASK << USED_SHIFT)) | (used.min(MAX_USED) << USED_SHIFT)
}

/// The count of words of a record with `size` literals.
pub const fn record_words(size: usize) -> usize {
    HEADER_WORDS + size
}

/// The count of bytes of a record with `size` literals.
pub const fn record_bytes(size: usize) -> usize {
    record_words(size) * WORD_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glue_saturates() {
        let meta = fresh_meta(u32::MAX, true);
        assert_eq!(meta_glue(meta), MAX_GLUE);
        assert_ne!(meta & flags::REDUNDANT, 0);
    }

    #[test]
    fn fields_are_independent() {
        let mut meta = fresh_meta(7, false) | flags::REASON;
        meta = meta_with_used(meta, 40);
        assert_eq!(meta_used(meta), MAX_USED);
        assert_eq!(meta_glue(meta), 7);

        meta = meta_with_glue(meta, 3);
        assert_eq!(meta_glue(meta), 3);
        assert_eq!(meta_used(meta), MAX_USED);
        assert_eq!(meta & flags::ALL, flags::REASON);
    }
}
