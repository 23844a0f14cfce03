/*!
Watch lists, one for each literal.

# Overview

During propagation, the watch list of a literal is visited when the literal becomes false.
Each entry of a watch list is a [Watch]:

- A binary clause is stored only as a pair of watches --- a watch on the list of each literal of the clause, holding the other literal.
  So, for all literals *a* and *b*, a binary watch for *b* is on the list of *a* if and only if a binary watch for *a* is on the list of *b*.
- A clause stored in the arena is watched by its first two literals, with each watch holding the other literal as a blocking literal.

The lists of every literal are [vectors](pool::WatchVector) carved from a single shared [pool](pool::Pool).

# Dense mode

Some passes (e.g. [dense collection](crate::procedures::collect::dense) or [compaction](crate::procedures::compact)) move or rewrite clauses in bulk, and it is simpler to drop every large watch and rebuild the watches after the pass than to keep the watches consistent during the pass.
While large watches are dropped, the watches are in *dense mode*.
Binary watches are kept in dense mode, as a binary clause has no representation other than its watches.
*/

pub mod pool;

use pool::{Pool, Watch, WatchVector};

use crate::{
    config::dbs::WatchConfig,
    db::keys::ClauseRef,
    misc::log::targets::{self},
    structures::literal::Literal,
    types::err::{self},
};

/// The watch lists of every literal.
pub struct Watches {
    pool: Pool,

    /// The vector of each literal, indexed by literal.
    lists: Vec<WatchVector>,

    /// A local configuration, typically derived from the configuration of a context.
    pub config: WatchConfig,
}

impl Watches {
    pub fn new(config: &WatchConfig) -> Self {
        Watches {
            pool: Pool::new(config.offset_limit.value),
            lists: Vec::default(),
            config: config.clone(),
        }
    }

    /// The watches of `literal`.
    pub fn list(&self, literal: Literal) -> &[Watch] {
        self.pool.watches(&self.lists[literal.index()])
    }

    /// The watches of `literal`, mutably.
    pub fn list_mut(&mut self, literal: Literal) -> &mut [Watch] {
        self.pool.watches_mut(&self.lists[literal.index()])
    }

    /// Appends `watch` to the list of `literal`.
    pub fn push(&mut self, literal: Literal, watch: Watch) -> Result<(), err::PoolError> {
        self.pool.push(&mut self.lists[literal.index()], watch)
    }

    /// Watches the binary clause `a ∨ b` on the lists of both literals.
    pub fn watch_binary(&mut self, a: Literal, b: Literal, redundant: bool) -> Result<(), err::PoolError> {
        debug_assert_ne!(a.variable(), b.variable());
        self.push(a, Watch::Binary { other: b, redundant })?;
        self.push(b, Watch::Binary { other: a, redundant })
    }

    /// Watches `clause` on the list of `literal`, with `blocking` as the blocking literal.
    pub fn push_blocking_watch(
        &mut self,
        literal: Literal,
        blocking: Literal,
        clause: ClauseRef,
    ) -> Result<(), err::PoolError> {
        self.push(literal, Watch::Large { blocking, clause })
    }

    /// Watches `clause` on the first two of `literals`, each with the other as the blocking literal.
    pub fn watch_large(&mut self, literals: &[Literal], clause: ClauseRef) -> Result<(), err::PoolError> {
        debug_assert!(literals.len() > 2);
        self.push_blocking_watch(literals[0], literals[1], clause)?;
        self.push_blocking_watch(literals[1], literals[0], clause)
    }

    /// Removes the binary watch for `other` from the list of `literal`.
    ///
    /// Returns true if some watch was removed.
    /// The watch on the list of `other` is left in place, see [unwatch_binary](Watches::unwatch_binary).
    pub fn remove_binary_watch(&mut self, literal: Literal, other: Literal) -> bool {
        self.remove(literal, |watch| matches!(watch, Watch::Binary { other: o, .. } if *o == other))
    }

    /// Removes the watch of `clause` from the list of `literal`.
    ///
    /// Returns true if some watch was removed.
    pub fn remove_blocking_watch(&mut self, literal: Literal, clause: ClauseRef) -> bool {
        self.remove(literal, |watch| matches!(watch, Watch::Large { clause: c, .. } if *c == clause))
    }

    /// Removes both watches of the binary clause `a ∨ b`.
    ///
    /// Returns the redundancy of the clause, if the clause was watched.
    pub fn unwatch_binary(&mut self, a: Literal, b: Literal) -> Option<bool> {
        let redundant = self.list(a).iter().find_map(|watch| match watch {
            Watch::Binary { other, redundant } if *other == b => Some(*redundant),
            _ => None,
        })?;
        self.remove_binary_watch(a, b);
        let symmetric = self.remove_binary_watch(b, a);
        debug_assert!(symmetric, "Asymmetric binary watch {a} {b}");
        Some(redundant)
    }

    /// Removes the first watch on the list of `literal` matching `target`, keeping the order of the list.
    fn remove(&mut self, literal: Literal, target: impl Fn(&Watch) -> bool) -> bool {
        let mut found = false;
        self.pool.retain(&mut self.lists[literal.index()], |watch| {
            if !found && target(watch) {
                found = true;
                return false;
            }
            true
        });
        found
    }

    /// Retains the watches of `literal` on which `f` returns true, in order.
    ///
    /// `f` may rewrite a watch before returning.
    pub fn retain(&mut self, literal: Literal, f: impl FnMut(&mut Watch) -> bool) {
        self.pool.retain(&mut self.lists[literal.index()], f)
    }

    /// Releases the list of `literal`.
    pub fn clear(&mut self, literal: Literal) {
        self.pool.release(&mut self.lists[literal.index()])
    }

    /// Drops every large watch, leaving only binary watches.
    pub fn disconnect_large(&mut self) {
        for vector in self.lists.iter_mut() {
            self.pool.retain(vector, |watch| watch.is_binary());
        }
        log::debug!(target: targets::WATCHES, "Large watches disconnected");
    }

    /// The count of literals with a list.
    pub fn literal_count(&self) -> usize {
        self.lists.len()
    }

    /// Sets the count of literals with a list to `count`, releasing the lists of any dropped literal.
    pub fn resize(&mut self, count: usize) -> Result<(), err::PoolError> {
        if count < self.lists.len() {
            for vector in self.lists.iter_mut().skip(count) {
                self.pool.release(vector);
            }
            self.lists.truncate(count);
            self.lists.shrink_to(count);
        } else {
            let additional = count - self.lists.len();
            if self.lists.try_reserve(additional).is_err() {
                return Err(err::PoolError::AllocationFailure);
            }
            self.lists.resize(count, WatchVector::default());
        }
        Ok(())
    }

    /// Reserves capacity for lists of `count` literals in total.
    pub fn reserve(&mut self, count: usize) -> Result<(), err::PoolError> {
        let additional = count.saturating_sub(self.lists.len());
        self.lists
            .try_reserve_exact(additional)
            .map_err(|_| err::PoolError::AllocationFailure)
    }

    /// Moves the list of each literal to the literal given by `map`, releasing the lists of unmapped literals.
    ///
    /// The watches themselves are not rewritten.
    pub fn permute(&mut self, map: impl Fn(Literal) -> Option<Literal>) {
        let mut lists = vec![WatchVector::default(); self.lists.len()];
        for (index, vector) in self.lists.iter_mut().enumerate() {
            match map(Literal::from_index(index)) {
                Some(mapped) => {
                    debug_assert!(lists[mapped.index()].capacity() == 0);
                    lists[mapped.index()] = *vector;
                }
                None => self.pool.release(vector),
            }
        }
        self.lists = lists;
    }

    /// True if enough of the pool is tombstoned for defragmentation to be worthwhile.
    pub fn defragmentation_due(&self) -> bool {
        let slots = self.pool.len();
        slots >= self.config.minimum_slots.value
            && self.pool.tombstones() as f64 > self.config.tombstone_fraction.value * slots as f64
    }

    /// Defragments the pool.
    pub fn defragment(&mut self) {
        self.pool.defragment(&mut self.lists);
    }

    /// The pool backing the lists.
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// The capacity of the list of `literal`.
    pub fn capacity(&self, literal: Literal) -> usize {
        self.lists[literal.index()].capacity()
    }

    /// The sum of the capacities of every list.
    pub fn total_capacity(&self) -> usize {
        self.lists.iter().map(|vector| vector.capacity()).sum()
    }

    /// True if every binary watch is matched by a binary watch on the list of the other literal.
    ///
    /// A quadratic check, intended for debugging and tests.
    pub fn binaries_symmetric(&self) -> bool {
        (0..self.lists.len()).all(|index| {
            let literal = Literal::from_index(index);
            self.list(literal).iter().all(|watch| match watch {
                Watch::Binary { other, redundant } => self.list(*other).iter().any(|back| {
                    *back
                        == Watch::Binary {
                            other: literal,
                            redundant: *redundant,
                        }
                }),
                Watch::Large { .. } => true,
            })
        })
    }
}
