/// Counts for various things which count, roughly.
///
/// Clause counts are kept current by every method which stores, retires, demotes, or promotes a clause.
/// A clause marked as garbage stops counting when marked, not when collected.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// A count of every original clause stored, of any length.
    pub original_clauses: usize,

    /// Irredundant clauses held in the arena.
    pub irredundant_clauses: usize,

    /// Redundant clauses held in the arena.
    pub redundant_clauses: usize,

    /// Irredundant binary clauses, each held as a pair of watches.
    pub irredundant_binaries: usize,

    /// Redundant binary clauses, each held as a pair of watches.
    pub redundant_binaries: usize,

    pub sparse_collections: usize,
    pub dense_collections: usize,

    /// Defragmentations of the watch pool.
    pub defragmentations: usize,

    pub compactions: usize,

    /// Bytes by which the arena has shrunk over every collection.
    pub collected_bytes: usize,

    /// Literals false at the root removed from records.
    pub flushed_literals: usize,

    /// Records dropped as satisfied at the root.
    pub satisfied_clauses: usize,

    /// Records turned into binary clauses.
    pub demoted_clauses: usize,
}

impl Counters {
    /// A count of live clauses held in the arena.
    pub fn large_clauses(&self) -> usize {
        self.irredundant_clauses + self.redundant_clauses
    }

    /// A count of binary clauses.
    pub fn binary_clauses(&self) -> usize {
        self.irredundant_binaries + self.redundant_binaries
    }

    pub(crate) fn count_large(&mut self, redundant: bool) -> &mut usize {
        match redundant {
            true => &mut self.redundant_clauses,
            false => &mut self.irredundant_clauses,
        }
    }

    pub(crate) fn count_binary(&mut self, redundant: bool) -> &mut usize {
        match redundant {
            true => &mut self.redundant_binaries,
            false => &mut self.irredundant_binaries,
        }
    }
}
