//! Methods to populate the valuation of a context.
//!
//! These are the operations of the search layer which the arena and its passes depend on: creating variables, assigning and unassigning literals, and eliminating variables.
//! No heuristic lives here --- which literal to decide, and when, is left to the caller.

use crate::{
    db::{
        atom::{Assignment, Import},
        keys::{LevelIndex, Reason},
    },
    misc::log::targets::{self},
    structures::{literal::Literal, variable::Variable},
    types::err::{self, ErrorKind},
};

use super::Context;

impl Context {
    /// The internal literal for the external literal `int`, creating a fresh variable if `int` is unused.
    pub fn import_literal(&mut self, int: isize) -> Result<Literal, ErrorKind> {
        let external = int.unsigned_abs();
        if external == 0 {
            return Err(err::AtomDBError::InvalidExternal.into());
        }

        let positive = match self.atom_db.import(external) {
            Import::Imported(literal) => literal,
            Import::Eliminated(_) => return Err(err::StateError::VariableEliminated.into()),
            Import::Unused => {
                let variable = self.atom_db.count();
                self.resize(variable + 1)?;
                self.atom_db.initialise_variable(variable as Variable, external)?;
                Literal::new(variable as Variable, true)
            }
        };

        match int.is_positive() {
            true => Ok(positive),
            false => Ok(positive.negate()),
        }
    }

    /// A fresh variable, with the next unused external name.
    pub fn fresh_variable(&mut self) -> Result<Variable, ErrorKind> {
        let mut external = self.atom_db.count() + 1;
        while self.atom_db.import(external) != Import::Unused {
            external += 1;
        }
        Ok(self.import_literal(external as isize)?.variable())
    }

    /// Assigns `literal` true at the current level for `reason`.
    ///
    /// At the root every assignment is a unit, whatever the reason given.
    pub fn assign(&mut self, literal: Literal, reason: Reason) {
        let level = self.literal_db.level();
        let reason = match level {
            0 => Reason::Unit,
            _ => reason,
        };

        log::trace!(target: targets::VALUATION, "Assign {literal} at {level} for {reason:?}");
        self.atom_db.assign(
            literal,
            Assignment {
                level,
                reason,
                trail: self.literal_db.trail().len(),
            },
        );
        self.literal_db.push_trail(literal);
    }

    /// Opens a fresh decision level and assigns `literal` as the decision of the level.
    pub fn decide(&mut self, literal: Literal) {
        self.literal_db.push_frame(literal);
        self.assign(literal, Reason::Decision);
    }

    /// Unassigns every literal assigned above `level`.
    pub fn backtrack(&mut self, level: LevelIndex) {
        for literal in self.literal_db.backtrack(level).into_iter().rev() {
            self.atom_db.unassign(literal.variable());
        }
        log::trace!(target: targets::VALUATION, "Backtracked to {level}");
    }

    /// Notes every literal on the trail has been propagated.
    pub fn mark_propagated(&mut self) {
        self.literal_db.mark_propagated();
    }

    /// Assigns every pending unit at the root.
    ///
    /// Returns false if some unit conflicts with the valuation, and true otherwise.
    pub fn assign_pending_units(&mut self) -> Result<bool, ErrorKind> {
        if self.literal_db.level() > 0 {
            return Err(err::StateError::DecisionMade.into());
        }
        let mut consistent = true;
        for unit in self.literal_db.take_units() {
            match self.atom_db.value_of(unit) {
                None => self.assign(unit, Reason::Unit),
                Some(true) => {}
                Some(false) => consistent = false,
            }
        }
        Ok(consistent)
    }

    /// Eliminates the active, unassigned `variable`, and returns the slot for the reconstructed value of the variable.
    ///
    /// Clauses containing the variable are not touched, and should be marked as garbage by the caller.
    pub fn eliminate_variable(&mut self, variable: Variable) -> Result<usize, ErrorKind> {
        if !self.atom_db.flags(variable).active {
            return Err(err::StateError::VariableInactive.into());
        }
        if self.atom_db.value_of(Literal::new(variable, true)).is_some() {
            return Err(err::StateError::VariableAssigned.into());
        }
        Ok(self.atom_db.eliminate(variable)?)
    }
}
