/*!
A database of variable (and literal) indexed things, accessed via fields on an [AtomDB] struct.

Things include:
- The [flags](VariableFlags) of each variable, recording whether the variable is active, fixed, or eliminated.
- The current (often partial) valuation, as a value for each *literal*.
  So, the value of a literal is a single lookup, and the values of a variable's two literals are always opposite.
- A record of how each assigned variable came to be assigned, as an [Assignment].
- Internal and external name maps, for reading and writing literals.
- An [IndexHeap] of scores and a decision [Queue], for some branching heuristic to use.

Every variable-indexed structure in the database has the same length, which is changed only by [resize](AtomDB::resize).
Likewise, renumbering of variables is only through [remap](AtomDB::remap).
*/

pub mod queue;

use queue::Queue;

use crate::{
    db::keys::{LevelIndex, Reason},
    generic::index_heap::IndexHeap,
    misc::log::targets::{self},
    structures::{
        literal::Literal,
        variable::{Variable, VariableFlags},
    },
    types::err::{self},
};

/// How a variable came to have its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// The decision level of the assignment.
    pub level: LevelIndex,

    /// Why the variable has its value.
    pub reason: Reason,

    /// The position of the assignment on the trail.
    pub trail: usize,
}

impl Default for Assignment {
    fn default() -> Self {
        Assignment {
            level: 0,
            reason: Reason::Unit,
            trail: 0,
        }
    }
}

/// What an external variable stands for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Import {
    /// The external variable has no internal counterpart, and may be freely (re)used.
    #[default]
    Unused,

    /// The external variable is the given internal literal (the positive literal of the external variable).
    Imported(Literal),

    /// The external variable was eliminated, and its value is reconstructed in the given slot.
    Eliminated(usize),
}

/// The atom database.
#[derive(Default)]
pub struct AtomDB {
    flags: Vec<VariableFlags>,

    /// The value of each literal.
    values: Vec<Option<bool>>,

    assigned: Vec<Assignment>,

    /// The external variable of each variable.
    export: Vec<usize>,

    /// What each external variable stands for, indexed by external variable less one.
    import: Vec<Import>,

    /// Reconstructed values of eliminated variables.
    eliminated: Vec<Option<bool>>,

    /// Scores of variables, where (typically) any active variable is on the heap.
    pub heap: IndexHeap<f64>,

    /// A queue of active variables.
    pub queue: Queue,

    /// A count of active variables.
    active: usize,

    /// A count of fixed variables.
    fixed: usize,

    /// The count of variables for which space is reserved.
    capacity: usize,
}

impl AtomDB {
    /// A count of variables in the database.
    pub fn count(&self) -> usize {
        self.flags.len()
    }

    /// A count of active variables.
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// A count of fixed variables.
    pub fn fixed_count(&self) -> usize {
        self.fixed
    }

    /// A count of variables which would be dropped by compaction.
    ///
    /// All fixed variables fold into a single variable, and every variable which is neither active nor fixed is dropped.
    pub fn reclaimable_count(&self) -> usize {
        self.count() - self.active - self.fixed.min(1)
    }

    /// The count of variables for which space is reserved.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn flags(&self, variable: Variable) -> &VariableFlags {
        &self.flags[variable as usize]
    }

    /// The value of `literal`, if any.
    pub fn value_of(&self, literal: Literal) -> Option<bool> {
        self.values[literal.index()]
    }

    /// The value of `literal`, if any.
    ///
    /// # Safety
    /// `literal` must be the literal of some variable of the database.
    pub unsafe fn value_of_unchecked(&self, literal: Literal) -> Option<bool> {
        *unsafe { self.values.get_unchecked(literal.index()) }
    }

    /// The value of `literal` if the value was assigned at the root, and otherwise `None`.
    pub fn root_value_of(&self, literal: Literal) -> Option<bool> {
        match self.flags[literal.variable() as usize].fixed {
            true => self.values[literal.index()],
            false => None,
        }
    }

    /// How `variable` came to have its value.
    ///
    /// Only meaningful if the variable has a value.
    pub fn assignment(&self, variable: Variable) -> &Assignment {
        &self.assigned[variable as usize]
    }

    /// Sets the reason for the value of `variable`.
    pub fn set_reason(&mut self, variable: Variable, reason: Reason) {
        self.assigned[variable as usize].reason = reason;
    }

    /// Sets the trail position of the assignment of `variable`.
    pub fn set_trail_position(&mut self, variable: Variable, position: usize) {
        self.assigned[variable as usize].trail = position;
    }

    /// The external variable of `variable`.
    pub fn external(&self, variable: Variable) -> usize {
        self.export[variable as usize]
    }

    /// The external form of `literal`.
    pub fn external_literal(&self, literal: Literal) -> isize {
        let external = self.export[literal.variable() as usize] as isize;
        match literal.polarity() {
            true => external,
            false => -external,
        }
    }

    /// What `external` stands for.
    pub fn import(&self, external: usize) -> Import {
        match external.checked_sub(1).and_then(|index| self.import.get(index)) {
            Some(import) => *import,
            None => Import::Unused,
        }
    }

    /// The reconstructed value of the eliminated variable in `slot`, if any.
    pub fn eliminated_value(&self, slot: usize) -> Option<bool> {
        self.eliminated[slot]
    }

    /// Records the reconstructed value of the eliminated variable in `slot`.
    pub fn set_eliminated_value(&mut self, slot: usize, value: bool) {
        self.eliminated[slot] = Some(value);
    }

    /// Initialises the (freshly resized) `variable` as the internal counterpart of `external`.
    pub(crate) fn initialise_variable(
        &mut self,
        variable: Variable,
        external: usize,
    ) -> Result<(), err::AtomDBError> {
        debug_assert!(external > 0);
        if self.import.len() < external {
            self.import
                .try_reserve(external - self.import.len())
                .map_err(|_| err::AtomDBError::AllocationFailure)?;
            self.import.resize(external, Import::Unused);
        }

        self.flags[variable as usize] = VariableFlags::fresh();
        self.export[variable as usize] = external;
        self.import[external - 1] = Import::Imported(Literal::new(variable, true));
        self.heap.activate(variable as usize);
        self.queue.enqueue(variable);
        self.active += 1;

        log::trace!(target: targets::VALUATION, "Variable {variable} for external {external}");
        Ok(())
    }

    /// Assigns `literal` true.
    ///
    /// An assignment at level zero fixes the variable of the literal.
    pub(crate) fn assign(&mut self, literal: Literal, assignment: Assignment) {
        let variable = literal.variable() as usize;
        debug_assert!(self.values[literal.index()].is_none());
        debug_assert!(assignment.level > 0 || assignment.reason == Reason::Unit);

        self.values[literal.index()] = Some(true);
        self.values[literal.negate().index()] = Some(false);
        self.assigned[variable] = assignment;

        if assignment.level == 0 {
            let flags = &mut self.flags[variable];
            debug_assert!(flags.active);
            flags.active = false;
            flags.fixed = true;
            self.active -= 1;
            self.fixed += 1;
            self.heap.remove(variable);
            self.queue.dequeue(variable as Variable);
            log::trace!(target: targets::VALUATION, "Fixed {literal}");
        }
    }

    /// Clears the value of `variable`.
    pub(crate) fn unassign(&mut self, variable: Variable) {
        debug_assert!(!self.flags[variable as usize].fixed);
        let positive = Literal::new(variable, true);
        self.values[positive.index()] = None;
        self.values[positive.negate().index()] = None;
        self.heap.activate(variable as usize);
    }

    /// Marks the unassigned, active `variable` as eliminated, and returns the slot for the value of the variable.
    pub(crate) fn eliminate(&mut self, variable: Variable) -> Result<usize, err::AtomDBError> {
        let flags = &mut self.flags[variable as usize];
        debug_assert!(flags.active);
        flags.active = false;
        flags.eliminated = true;
        self.active -= 1;

        self.heap.remove(variable as usize);
        self.queue.dequeue(variable);

        self.eliminated
            .try_reserve(1)
            .map_err(|_| err::AtomDBError::AllocationFailure)?;
        let slot = self.eliminated.len();
        self.eliminated.push(None);
        self.import[self.export[variable as usize] - 1] = Import::Eliminated(slot);

        log::trace!(target: targets::VALUATION, "Eliminated {variable} to slot {slot}");
        Ok(slot)
    }
}

/// Capacity and renumbering.
impl AtomDB {
    /// Reserves space for `capacity` variables in every variable and literal indexed structure.
    pub(crate) fn reserve(&mut self, capacity: usize) -> Result<(), err::AtomDBError> {
        let additional = capacity.saturating_sub(self.count());
        let literals = (2 * capacity).saturating_sub(self.values.len());

        let reserved = self.flags.try_reserve_exact(additional).is_ok()
            && self.values.try_reserve_exact(literals).is_ok()
            && self.assigned.try_reserve_exact(additional).is_ok()
            && self.export.try_reserve_exact(additional).is_ok()
            && self.heap.reserve(capacity).is_ok()
            && self.queue.reserve(capacity).is_ok();

        match reserved {
            true => {
                self.capacity = capacity;
                Ok(())
            }
            false => {
                log::error!(target: targets::RESIZE, "Failed to reserve space for {capacity} variables");
                Err(err::AtomDBError::AllocationFailure)
            }
        }
    }

    /// Sets the count of variables to `count`.
    ///
    /// Fresh variables are neither active nor fixed until initialised.
    /// Dropped variables must not be active, and their values are lost.
    pub(crate) fn resize(&mut self, count: usize) {
        let shrinking = count < self.count();
        self.flags.resize(count, VariableFlags::default());
        self.values.resize(2 * count, None);
        self.assigned.resize(count, Assignment::default());
        self.export.resize(count, 0);
        self.heap.resize(count);
        self.queue.resize(count);

        if shrinking {
            self.flags.shrink_to(count);
            self.values.shrink_to(2 * count);
            self.assigned.shrink_to(count);
            self.export.shrink_to(count);
            self.capacity = count;
        }
    }

    /// Renumbers variables by `remapping`.
    ///
    /// Kept variables carry their flags, values, assignments, names, scores, and place in the queue.
    /// Trail positions of assignments are left for the caller to rewrite.
    pub(crate) fn remap(&mut self, remapping: &Remapping) {
        let count = remapping.new_count();

        let mut flags = vec![VariableFlags::default(); count];
        let mut values = vec![None; 2 * count];
        let mut assigned = vec![Assignment::default(); count];
        let mut export = vec![0; count];
        let mut written = vec![false; count];

        for (old, mapped) in remapping.iter() {
            let Some(mapped) = mapped else {
                continue;
            };
            let new = mapped.variable() as usize;
            // Every fixed variable maps to the representative, which takes the details of the first.
            if written[new] {
                continue;
            }
            written[new] = true;
            flags[new] = self.flags[old as usize];
            assigned[new] = self.assigned[old as usize];
            if let Reason::Binary(other) = assigned[new].reason {
                assigned[new].reason = Reason::Binary(remapping.literal(other).unwrap_or(Literal::INVALID));
            }
            export[new] = self.export[old as usize];

            let positive = Literal::new(old, true);
            values[mapped.index()] = self.values[positive.index()];
            values[mapped.negate().index()] = self.values[positive.negate().index()];
        }

        for import in self.import.iter_mut() {
            if let Import::Imported(literal) = *import {
                *import = match remapping.literal(literal) {
                    Some(mapped) => Import::Imported(mapped),
                    None => Import::Unused,
                };
            }
        }

        self.heap
            .remap(count, |index| remapping.variable_of(index as Variable).map(|v| v as usize));
        self.queue.remap(count, |variable| remapping.variable_of(variable));

        self.flags = flags;
        self.values = values;
        self.assigned = assigned;
        self.export = export;
        self.fixed = self.fixed.min(1);
        self.capacity = count;
    }
}

/// A renumbering of variables, from each (old) variable to the literal which now stands for the positive literal of the variable.
///
/// Fixed variables map to a literal of a single representative variable, with the polarity chosen so that the value of the literal is the value of the variable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Remapping {
    map: Vec<Option<Literal>>,
    new_count: usize,
}

impl Remapping {
    /// The identity on `count` variables.
    pub fn identity(count: usize) -> Self {
        Remapping {
            map: (0..count)
                .map(|variable| Some(Literal::new(variable as Variable, true)))
                .collect(),
            new_count: count,
        }
    }

    pub(crate) fn new(map: Vec<Option<Literal>>, new_count: usize) -> Self {
        Remapping { map, new_count }
    }

    /// The count of variables before the renumbering.
    pub fn old_count(&self) -> usize {
        self.map.len()
    }

    /// The count of variables after the renumbering.
    pub fn new_count(&self) -> usize {
        self.new_count
    }

    /// The variable now standing for `variable`, if any.
    pub fn variable_of(&self, variable: Variable) -> Option<Variable> {
        self.map[variable as usize].map(|literal| literal.variable())
    }

    /// The literal now standing for `literal`, if any.
    pub fn literal(&self, literal: Literal) -> Option<Literal> {
        let mapped = self.map[literal.variable() as usize]?;
        match literal.polarity() {
            true => Some(mapped),
            false => Some(mapped.negate()),
        }
    }

    /// Each old variable paired with the literal now standing for its positive literal.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, Option<Literal>)> + '_ {
        self.map
            .iter()
            .enumerate()
            .map(|(variable, mapped)| (variable as Variable, *mapped))
    }

    /// True if the renumbering is the identity.
    pub fn is_identity(&self) -> bool {
        self.new_count == self.map.len()
            && self
                .iter()
                .all(|(variable, mapped)| mapped == Some(Literal::new(variable, true)))
    }
}
