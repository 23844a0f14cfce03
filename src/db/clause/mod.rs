/*!
Methods to store and remove clauses.

Clauses are routed by length:
- An empty clause is rejected, as [EmptyClause](err::ClauseDBError::EmptyClause).
- A unit clause is queued on the [literal database](crate::db::literal), to be assigned at the root.
- A binary clause is stored only as a pair of [watches](crate::db::watches).
- Any other clause is stored in the [arena](crate::db::arena), and (if the context is watching large clauses) watched on its first two literals.

So, of the routers [new_original_clause](Context::new_original_clause), [new_irredundant_clause](Context::new_irredundant_clause), and [new_redundant_clause](Context::new_redundant_clause), only a clause stored in the arena returns a reference.

Literals of a clause are taken as given: no check is made for duplicate literals, tautologies, or literals with a value.
*/

use crate::{
    context::Context,
    db::keys::ClauseRef,
    misc::log::targets::{self},
    structures::literal::{self, Literal},
    types::err::{self, ErrorKind},
};

/// The kind of a clause, relative to the formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseKind {
    /// A clause of the formula.
    Original,

    /// A clause which may not be removed without changing the formula, e.g. the result of strengthening an original clause.
    Irredundant,

    /// A learnt clause, which may be removed without changing the formula.
    Redundant,
}

impl ClauseKind {
    pub fn is_redundant(&self) -> bool {
        matches!(self, ClauseKind::Redundant)
    }
}

impl Context {
    /// Stores an original clause.
    pub fn new_original_clause(&mut self, literals: &[Literal]) -> Result<Option<ClauseRef>, ErrorKind> {
        self.counters.original_clauses += 1;
        self.new_clause(ClauseKind::Original, 0, literals)
    }

    /// Stores an irredundant clause with the given glue.
    pub fn new_irredundant_clause(
        &mut self,
        glue: u32,
        literals: &[Literal],
    ) -> Result<Option<ClauseRef>, ErrorKind> {
        self.new_clause(ClauseKind::Irredundant, glue, literals)
    }

    /// Stores a redundant clause with the given glue.
    pub fn new_redundant_clause(
        &mut self,
        glue: u32,
        literals: &[Literal],
    ) -> Result<Option<ClauseRef>, ErrorKind> {
        self.new_clause(ClauseKind::Redundant, glue, literals)
    }

    fn new_clause(
        &mut self,
        kind: ClauseKind,
        glue: u32,
        literals: &[Literal],
    ) -> Result<Option<ClauseRef>, ErrorKind> {
        match literals {
            [] => {
                log::info!(target: targets::CLAUSE_DB, "Empty {kind:?} clause");
                Err(err::ClauseDBError::EmptyClause.into())
            }

            [unit] => {
                self.literal_db.push_unit(*unit);
                log::trace!(target: targets::CLAUSE_DB, "Unit {unit}");
                Ok(None)
            }

            [a, b] => {
                self.new_binary_clause(kind, *a, *b)?;
                Ok(None)
            }

            _ => Ok(Some(self.new_large_clause(kind, glue, literals)?)),
        }
    }

    /// Reserves a record for a clause of `size` literals in the arena, and counts the clause.
    ///
    /// The record is not watched, and its literals are invalid until written through [clause_mut](crate::db::arena::Arena::clause_mut).
    /// Shorter clauses are not stored in the arena, so `size` must be at least three.
    pub fn allocate_clause(&mut self, size: usize, redundant: bool) -> Result<ClauseRef, ErrorKind> {
        if size < 3 {
            return Err(err::ClauseDBError::ShortRecord.into());
        }
        let clause = self.arena.allocate(size, redundant)?;
        *self.counters.count_large(redundant) += 1;
        Ok(clause)
    }

    /// Stores the binary clause `a ∨ b`.
    pub fn new_binary_clause(&mut self, kind: ClauseKind, a: Literal, b: Literal) -> Result<(), ErrorKind> {
        self.watches.watch_binary(a, b, kind.is_redundant())?;
        *self.counters.count_binary(kind.is_redundant()) += 1;
        log::trace!(target: targets::CLAUSE_DB, "Binary {kind:?} {a} {b}");
        Ok(())
    }

    /// Stores `literals` in the arena, and watches the clause if watching.
    pub fn new_large_clause(
        &mut self,
        kind: ClauseKind,
        glue: u32,
        literals: &[Literal],
    ) -> Result<ClauseRef, ErrorKind> {
        debug_assert!(literals.len() > 2);
        let clause = self.arena.store(literals, glue, kind.is_redundant())?;
        if self.watching {
            self.watches.watch_large(literals, clause)?;
        }
        *self.counters.count_large(kind.is_redundant()) += 1;

        log::trace!(target: targets::CLAUSE_DB, "{kind:?} {clause}: {}", literal::as_dimacs_string(literals));
        Ok(clause)
    }

    /// Marks the clause at `clause` as garbage.
    ///
    /// The bytes of the clause are counted as garbage immediately, and reclaimed by the next collection.
    /// Watches of the clause are dropped by the next collection.
    pub fn mark_as_garbage(&mut self, clause: ClauseRef) {
        let redundant = self.arena.clause(clause).is_redundant();
        self.arena.mark_garbage(clause);
        *self.counters.count_large(redundant) -= 1;
    }

    /// Removes the binary clause `a ∨ b`.
    ///
    /// Returns true if the clause was present.
    pub fn delete_binary_clause(&mut self, a: Literal, b: Literal) -> bool {
        match self.watches.unwatch_binary(a, b) {
            Some(redundant) => {
                *self.counters.count_binary(redundant) -= 1;
                log::trace!(target: targets::CLAUSE_DB, "Deleted binary {a} {b}");
                true
            }
            None => false,
        }
    }

    /// Turns the redundant clause at `clause` irredundant.
    pub fn promote_clause(&mut self, clause: ClauseRef) {
        if !self.arena.clause(clause).is_redundant() {
            return;
        }
        self.arena.promote(clause);
        self.counters.redundant_clauses -= 1;
        self.counters.irredundant_clauses += 1;
    }

    /// Keeps the first `size` literals of the clause at `clause`.
    ///
    /// As the first two literals are watched, the watches of the clause are unchanged.
    pub fn shrink_clause(&mut self, clause: ClauseRef, size: usize) {
        self.arena.shrink_clause(clause, size);
    }
}
