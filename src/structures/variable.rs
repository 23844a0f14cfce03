/*!
(The internal representation of) a variable.

Each internal variable is a u32 *v* such that either:
- *v* is 0, or:
- *v - 1* is a variable.

So, the variables of a context are always [0..*n*) for some *n*, and a variable may be used as the index of a variable-indexed structure without translation.

Each variable is in exactly one of three states:
- Active, the variable may still be assigned during search.
- Fixed, the variable was assigned at the root and will keep its value.
- Eliminated, the variable was removed from the formula and its value is reconstructed on request.

Variables which are neither active nor fixed take up space in every variable-indexed structure.
Such space is recovered by [compaction](crate::procedures::compact).

# Notes
- The external name of a variable is the (positive) integer used for the variable in a DIMACS formula, and is stored in the [atom database](crate::db::atom).
*/

/// A variable, aka. an 'atom'.
pub type Variable = u32;

/// The maximum instance of a variable.
///
/// A literal packs a variable alongside a polarity bit, and the largest literal is reserved as invalid.
pub const VARIABLE_MAX: Variable = (u32::MAX >> 1) - 1;

/// The state of a variable, as recorded in the atom database.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VariableFlags {
    /// The variable may be assigned during search.
    pub active: bool,

    /// The variable was assigned at the root.
    pub fixed: bool,

    /// The variable was removed from the formula.
    pub eliminated: bool,
}

impl VariableFlags {
    /// Flags of a fresh variable.
    pub const fn fresh() -> Self {
        VariableFlags {
            active: true,
            fixed: false,
            eliminated: false,
        }
    }

    /// True if the variable is neither active nor fixed.
    pub fn is_inactive(&self) -> bool {
        !self.active && !self.fixed
    }
}
