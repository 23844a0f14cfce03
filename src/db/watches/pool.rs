/*!
A pool of watches, from which every watch vector is carved.

Each [WatchVector] is a slice `{begin, size, capacity}` of the pool, and the pool itself is a single growable buffer.
So, the watches of every literal are stored in one allocation, and growth of a vector is a bump at the end of the pool.

When a vector outgrows its capacity:
- If the vector ends at the end of the pool, the pool is extended and the vector grows in place.
- Otherwise, a fresh slice of double the capacity (at least one) is taken from the end of the pool, the watches of the vector are copied, and the old slice is *tombstoned*.

Tombstoned slots are never reused directly.
Instead, once tombstones make up enough of the pool, the pool is [defragmented](Pool::defragment): every vector is moved to the front of the pool (in order of position), the capacity of each vector is trimmed to its size, and the tail of the pool is released.
*/

use crate::{
    db::keys::ClauseRef,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self},
};

/// A watch, as stored in the watch list of some literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Watch {
    /// A binary clause, with the other literal of the clause.
    Binary { other: Literal, redundant: bool },

    /// A clause stored in the arena, with a blocking literal.
    ///
    /// If the blocking literal is true the clause is satisfied, and there is no need to visit the clause.
    Large { blocking: Literal, clause: ClauseRef },
}

impl Watch {
    pub fn is_binary(&self) -> bool {
        matches!(self, Watch::Binary { .. })
    }

    pub fn is_large(&self) -> bool {
        matches!(self, Watch::Large { .. })
    }
}

/// The contents of a slot which holds no watch.
const VACANT: Watch = Watch::Large {
    blocking: Literal::INVALID,
    clause: ClauseRef::INVALID,
};

/// A slice of the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WatchVector {
    begin: u32,
    size: u32,
    capacity: u32,
}

impl WatchVector {
    pub fn len(&self) -> usize {
        self.size as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    fn begin(&self) -> usize {
        self.begin as usize
    }

    fn end(&self) -> usize {
        self.begin() + self.capacity()
    }
}

/// The pool.
pub struct Pool {
    slots: Vec<Watch>,

    /// A count of slots left behind by relocated or released vectors.
    tombstones: usize,

    /// The pool may not extend beyond this many slots.
    limit: usize,
}

impl Pool {
    pub fn new(limit: usize) -> Self {
        Pool {
            slots: Vec::default(),
            tombstones: 0,
            limit: limit.min(u32::MAX as usize),
        }
    }

    /// The count of slots in the pool, including tombstones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The count of tombstoned slots.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// The watches of `vector`.
    pub fn watches(&self, vector: &WatchVector) -> &[Watch] {
        let begin = vector.begin();
        &self.slots[begin..begin + vector.len()]
    }

    /// The watches of `vector`, mutably.
    pub fn watches_mut(&mut self, vector: &WatchVector) -> &mut [Watch] {
        let begin = vector.begin();
        &mut self.slots[begin..begin + vector.len()]
    }

    /// Appends `watch` to `vector`, growing the vector if required.
    pub fn push(&mut self, vector: &mut WatchVector, watch: Watch) -> Result<(), err::PoolError> {
        if vector.size == vector.capacity {
            self.grow(vector)?;
        }
        self.slots[vector.begin() + vector.len()] = watch;
        vector.size += 1;
        Ok(())
    }

    /// Doubles the capacity of `vector` (to at least one slot).
    fn grow(&mut self, vector: &mut WatchVector) -> Result<(), err::PoolError> {
        let capacity = vector.capacity();
        let required = (2 * capacity).max(1);

        if capacity > 0 && vector.end() == self.slots.len() {
            self.extend(required - capacity)?;
            vector.capacity = required as u32;
            return Ok(());
        }

        let begin = self.slots.len();
        self.extend(required)?;
        self.slots.copy_within(vector.begin()..vector.begin() + vector.len(), begin);
        self.tombstone(vector);

        vector.begin = begin as u32;
        vector.capacity = required as u32;
        Ok(())
    }

    /// Appends `count` vacant slots to the end of the pool.
    fn extend(&mut self, count: usize) -> Result<(), err::PoolError> {
        if self.limit - self.slots.len() < count {
            log::error!(target: targets::WATCHES, "Pool offset space exhausted at {} slots", self.slots.len());
            return Err(err::PoolError::OffsetSpaceExhausted);
        }
        if self.slots.try_reserve(count).is_err() {
            log::error!(target: targets::WATCHES, "Failed to grow the pool by {count} slots");
            return Err(err::PoolError::AllocationFailure);
        }
        self.slots.resize(self.slots.len() + count, VACANT);
        Ok(())
    }

    /// Marks every slot of `vector` as a tombstone.
    fn tombstone(&mut self, vector: &WatchVector) {
        self.slots[vector.begin()..vector.end()].fill(VACANT);
        self.tombstones += vector.capacity();
    }

    /// Keeps the first `size` watches of `vector`.
    pub fn truncate(&mut self, vector: &mut WatchVector, size: usize) {
        if size < vector.len() {
            let begin = vector.begin();
            self.slots[begin + size..begin + vector.len()].fill(VACANT);
            vector.size = size as u32;
        }
    }

    /// Releases the slots of `vector`, leaving an empty vector.
    pub fn release(&mut self, vector: &mut WatchVector) {
        if vector.capacity > 0 {
            self.tombstone(vector);
        }
        *vector = WatchVector::default();
    }

    /// Retains the watches of `vector` on which `f` returns true, in order.
    ///
    /// `f` may rewrite a watch before returning.
    pub fn retain(&mut self, vector: &mut WatchVector, mut f: impl FnMut(&mut Watch) -> bool) {
        let begin = vector.begin();
        let mut kept = 0;
        for index in 0..vector.len() {
            let mut watch = self.slots[begin + index];
            if f(&mut watch) {
                self.slots[begin + kept] = watch;
                kept += 1;
            }
        }
        self.truncate(vector, kept);
    }

    /// Moves every vector to the front of the pool in order of position, trims the capacity of each vector to its size, and releases tombstoned slots.
    pub fn defragment(&mut self, vectors: &mut [WatchVector]) {
        let before = self.slots.len();

        let mut order: Vec<usize> = (0..vectors.len())
            .filter(|&index| vectors[index].capacity > 0)
            .collect();
        order.sort_unstable_by_key(|&index| vectors[index].begin);

        let mut end = 0;
        for index in order {
            let vector = &mut vectors[index];
            let size = vector.len();
            if size == 0 {
                *vector = WatchVector::default();
                continue;
            }
            // Vectors are visited in order of position, so the destination never overtakes the source.
            self.slots.copy_within(vector.begin()..vector.begin() + size, end);
            vector.begin = end as u32;
            vector.capacity = vector.size;
            end += size;
        }

        self.slots.truncate(end);
        self.slots.shrink_to_fit();
        self.tombstones = 0;

        log::debug!(target: targets::WATCHES, "Defragmented the pool from {before} to {end} slots");
    }

    /// The bytes taken by the pool.
    pub fn bytes(&self) -> usize {
        self.slots.len() * std::mem::size_of::<Watch>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(int: isize) -> Watch {
        Watch::Binary {
            other: Literal::from_dimacs(int).unwrap(),
            redundant: false,
        }
    }

    #[test]
    fn growth_at_end_is_in_place() {
        let mut pool = Pool::new(u32::MAX as usize);
        let mut vector = WatchVector::default();

        for int in 1..=5 {
            pool.push(&mut vector, binary(int)).unwrap();
        }

        assert_eq!(vector.capacity(), 8);
        assert_eq!(pool.len(), 8);
        assert_eq!(pool.tombstones(), 0);
    }

    #[test]
    fn interleaved_growth_tombstones() {
        let mut pool = Pool::new(u32::MAX as usize);
        let mut a = WatchVector::default();
        let mut b = WatchVector::default();

        pool.push(&mut a, binary(1)).unwrap();
        pool.push(&mut b, binary(2)).unwrap();
        pool.push(&mut a, binary(3)).unwrap();

        assert_eq!(pool.tombstones(), 1);
        assert_eq!(pool.watches(&a), &[binary(1), binary(3)]);
        assert_eq!(pool.watches(&b), &[binary(2)]);
        assert_eq!(pool.len(), pool.tombstones() + a.capacity() + b.capacity());
    }

    #[test]
    fn defragment_keeps_watches() {
        let mut pool = Pool::new(u32::MAX as usize);
        let mut vectors = [WatchVector::default(); 3];

        for round in 0..6 {
            for (index, vector) in vectors.iter_mut().enumerate() {
                pool.push(vector, binary((round * 3 + index + 1) as isize)).unwrap();
            }
        }
        pool.retain(&mut vectors[1], |watch| *watch != binary(5));
        pool.release(&mut vectors[2]);

        let kept: Vec<Vec<Watch>> = vectors.iter().map(|v| pool.watches(v).to_vec()).collect();
        pool.defragment(&mut vectors);

        assert_eq!(pool.tombstones(), 0);
        assert_eq!(pool.len(), 6 + 5);
        for (vector, watches) in vectors.iter().zip(kept) {
            assert_eq!(pool.watches(vector), watches.as_slice());
            assert_eq!(vector.capacity(), vector.len());
        }
    }

    #[test]
    fn offset_limit() {
        let mut pool = Pool::new(4);
        let mut vector = WatchVector::default();
        for int in 1..=4 {
            pool.push(&mut vector, binary(int)).unwrap();
        }
        assert_eq!(
            pool.push(&mut vector, binary(5)),
            Err(err::PoolError::OffsetSpaceExhausted)
        );
    }
}
