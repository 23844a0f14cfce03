use crate::structures::literal::Literal;

/// The index of a decision level.
pub type LevelIndex = u32;

/// A reference to a clause record stored in the [arena](crate::db::arena).
///
/// The reference is the offset (in words) of the record header from the start of the arena.
/// The arena exclusively owns every record, and any other copy of a reference --- in a watch, or as the reason of an assignment --- is borrowed.
///
/// In particular, any copy of a reference is invalid after a [collection](crate::procedures::collect) or [compaction](crate::procedures::compact).
/// Both passes rewrite every copy held by the context, so a stale reference is never discovered at use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClauseRef(u32);

impl ClauseRef {
    /// A reference to no clause.
    pub const INVALID: ClauseRef = ClauseRef(u32::MAX);

    /// The largest offset a reference may hold.
    pub const MAX_OFFSET: usize = (u32::MAX - 1) as usize;

    pub(crate) const fn from_offset(offset: usize) -> Self {
        ClauseRef(offset as u32)
    }

    /// The offset (in words) of the record from the start of the arena.
    pub const fn offset(self) -> usize {
        self.0 as usize
    }

    /// True unless the reference is [INVALID](ClauseRef::INVALID).
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl std::fmt::Display for ClauseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.is_valid() {
            true => write!(f, "@{}", self.0),
            false => write!(f, "@invalid"),
        }
    }
}

/// Why a variable has the value it has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    /// The variable was chosen.
    Decision,

    /// The variable was assigned at the root.
    ///
    /// Root assignments never reference a clause, as any clause they would reference is satisfied at the root and so may be collected.
    Unit,

    /// The variable was forced by a binary clause, with the other literal of the clause.
    Binary(Literal),

    /// The variable was forced by a clause stored in the arena.
    Large(ClauseRef),
}
