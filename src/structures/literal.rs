/*!
Literals are variables paired with a (boolean) polarity.

A literal is packed into a single u32, with the variable in the upper bits and the polarity in the lowest bit:

- The positive literal of variable *v* is 2*v*.
- The negative literal of variable *v* is 2*v* + 1.

So, negation is a bit flip, the variable of a literal is a shift, and each variable owns two consecutive literal indices.
In turn, literals are used directly as the indices of literal-indexed structures (values, watch lists, etc.)

```rust
# use otter_arena::structures::literal::Literal;
let literal = Literal::new(79, true);

assert!(literal.polarity());
assert_eq!(literal.variable(), 79);
assert_eq!(literal.index(), 158);

assert_eq!(!literal, Literal::new(79, false));
assert_eq!(!!literal, literal);
```

# External form

Outside of a context literals are written as non-zero integers, with the sign of the integer indicating polarity.
For conversions see [from_dimacs](Literal::from_dimacs) and [as_dimacs](Literal::as_dimacs), which take the internal variable *v* to the integer *v* + 1.
*/

use crate::structures::variable::{Variable, VARIABLE_MAX};

/// A packed literal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct Literal(u32);

impl Literal {
    /// A literal which is not the literal of any variable.
    ///
    /// Used to mark padding in the arena and absent literals.
    pub const INVALID: Literal = Literal(u32::MAX);

    /// A fresh literal, specified by pairing a variable with a polarity.
    pub const fn new(variable: Variable, polarity: bool) -> Self {
        Literal((variable << 1) | ((!polarity) as u32))
    }

    /// The literal with the given index.
    pub const fn from_index(index: usize) -> Self {
        Literal(index as u32)
    }

    /// The literal whose external form is `int`, if representable.
    pub fn from_dimacs(int: isize) -> Option<Self> {
        let variable = int.unsigned_abs().checked_sub(1)?;
        if variable > VARIABLE_MAX as usize {
            return None;
        }
        Some(Literal::new(variable as Variable, int.is_positive()))
    }

    /// The variable of the literal.
    pub const fn variable(self) -> Variable {
        self.0 >> 1
    }

    /// The polarity of the literal.
    pub const fn polarity(self) -> bool {
        self.0 & 1 == 0
    }

    /// The negation of the literal.
    pub const fn negate(self) -> Self {
        Literal(self.0 ^ 1)
    }

    /// The index of the literal, for use with literal-indexed structures.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The packed representation of the literal.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The literal stored as `raw`.
    pub const fn from_raw(raw: u32) -> Self {
        Literal(raw)
    }

    /// True unless the literal is [INVALID](Literal::INVALID).
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// The literal in its external integer form.
    pub fn as_dimacs(self) -> isize {
        let int = self.variable() as isize + 1;
        match self.polarity() {
            true => int,
            false => -int,
        }
    }

    /// The literal of `variable` with polarity matched to `self`, i.e. `self` with the variable replaced.
    pub const fn with_variable(self, variable: Variable) -> Self {
        Literal((variable << 1) | (self.0 & 1))
    }
}

impl std::ops::Not for Literal {
    type Output = Literal;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.is_valid() {
            true => write!(f, "{}", self.as_dimacs()),
            false => write!(f, "invalid"),
        }
    }
}

/// The literals of a clause, in external form.
pub fn as_dimacs_string(literals: &[Literal]) -> String {
    let mut string = String::new();
    for literal in literals {
        string.push_str(&format!("{} ", literal.as_dimacs()));
    }
    string.push('0');
    string
}
