//! Error types used in the library.
//!
//! - Every error returned by the library is fatal to the context which returned it.
//!   In particular, a partially grown arena or watch pool cannot be cheaply rolled back, and so there is no attempt to recover from an allocation failure.
//! - Exhaustion of an address space (references into the arena, offsets into the watch pool, or variables) is a limit of the problem size, and so is reported separately from a failure to allocate.
//! - Violations of internal invariants (stale references, asymmetric binary watches, etc.) are not errors, and are instead checked by debug assertions.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

/// The umbrella error kind, wrapping the errors of each part of the library.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Arena(ArenaError),
    AtomDB(AtomDBError),
    ClauseDB(ClauseDBError),
    Parse(ParseError),
    Pool(PoolError),
    State(StateError),
}

/// Errors in the clause arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArenaError {
    /// The allocator could not provide space for the arena to grow.
    AllocationFailure,

    /// The arena would grow beyond the offsets representable by a clause reference.
    ReferenceSpaceExhausted,
}

impl From<ArenaError> for ErrorKind {
    fn from(e: ArenaError) -> Self {
        ErrorKind::Arena(e)
    }
}

/// Errors in the atom database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh variables.
    VariablesExhausted,

    /// The allocator could not provide space for some variable-indexed structure.
    AllocationFailure,

    /// Zero is not the name of any external variable.
    InvalidExternal,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Errors when storing clauses.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// Some attempt was made to reserve a record for fewer than three literals.
    ShortRecord,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

/// Errors during parsing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// Some issue with the problem specification in a DIMACS input.
    ProblemSpecification,

    /// Some unspecific problem at a specific line.
    Line(usize),

    /// A literal which could not be read, at a specific line.
    Literal(usize),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Errors in the watch vector pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolError {
    /// The allocator could not provide space for the pool to grow.
    AllocationFailure,

    /// The pool would grow beyond its addressable offsets.
    /// The instance exceeds the limits of the encoding.
    OffsetSpaceExhausted,
}

impl From<PoolError> for ErrorKind {
    fn from(e: PoolError) -> Self {
        ErrorKind::Pool(e)
    }
}

/// A pass was requested when the context was not in a state to run the pass.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StateError {
    /// Some assignment on the trail has not been propagated.
    PropagationPending,

    /// Some decision has been made, and the pass requires the root level.
    DecisionMade,

    /// Large clauses are watched, and the pass requires dense mode.
    WatchesConnected,

    /// Large clauses are not watched, and the pass requires sparse mode.
    WatchesDisconnected,

    /// Some external variable was eliminated, and cannot be used again.
    VariableEliminated,

    /// The variable has a value, and the operation requires an unassigned variable.
    VariableAssigned,

    /// The variable is not active, and the operation requires an active variable.
    VariableInactive,
}

impl From<StateError> for ErrorKind {
    fn from(e: StateError) -> Self {
        ErrorKind::State(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arena(e) => write!(f, "arena: {e:?}"),
            Self::AtomDB(e) => write!(f, "atom db: {e:?}"),
            Self::ClauseDB(e) => write!(f, "clause db: {e:?}"),
            Self::Parse(e) => write!(f, "parse: {e:?}"),
            Self::Pool(e) => write!(f, "watch pool: {e:?}"),
            Self::State(e) => write!(f, "state: {e:?}"),
        }
    }
}
