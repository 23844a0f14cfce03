/*!
The context, which owns every structure of a solver instance.

A [Context] holds:
- The [arena](crate::db::arena) of clauses with three or more literals.
- The [watch lists](crate::db::watches) of every literal.
- The [atom database](crate::db::atom), with the valuation and the details of each variable.
- The [literal database](crate::db::literal), with the trail, decision frames, and pending units.
- [Counters] and the [configuration](crate::config).

The context is the only owner of these structures, and every pass which moves clauses or renumbers variables is a method on the context taking `&mut self`.
So, no pass can observe a structure mid-rewrite.

# Example
```rust
# use otter_arena::config::Config;
# use otter_arena::context::Context;
let mut context = Context::from_config(Config::default());

let a = context.import_literal(1).unwrap();
let b = context.import_literal(-2).unwrap();
let c = context.import_literal(3).unwrap();

let key = context.new_original_clause(&[a, b, c]).unwrap();
assert!(key.is_some());

context.new_original_clause(&[!a, !b]).unwrap();
assert_eq!(context.counters.binary_clauses(), 1);
assert_eq!(context.counters.large_clauses(), 1);
```
*/

pub mod callbacks;
mod counters;
pub use counters::Counters;
mod valuation;

use crate::{
    config::Config,
    db::{arena::Arena, atom::AtomDB, literal::LiteralDB, watches::Watches},
};

use callbacks::CallbackTerminate;

/// The context.
pub struct Context {
    /// The configuration of a context.
    pub config: Config,

    /// Counters related to a context.
    pub counters: Counters,

    /// The clause arena.
    pub arena: Arena,

    /// The watch lists of every literal.
    pub watches: Watches,

    /// The atom database.
    /// See [db::atom](crate::db::atom) for details.
    pub atom_db: AtomDB,

    /// The literal database.
    /// See [db::literal](crate::db::literal) for details.
    pub literal_db: LiteralDB,

    /// True if large clauses are watched, i.e. the context is in sparse mode.
    pub(crate) watching: bool,

    /// Consulted before scheduling a pass.
    pub(super) callback_terminate: Option<Box<CallbackTerminate>>,
}

impl Context {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        Context {
            arena: Arena::new(&config.arena),
            watches: Watches::new(&config.watches),
            atom_db: AtomDB::default(),
            literal_db: LiteralDB::default(),

            config,

            counters: Counters::default(),
            watching: true,
            callback_terminate: None,
        }
    }

    /// True if large clauses are watched.
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// A count of variables.
    pub fn variable_count(&self) -> usize {
        self.atom_db.count()
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::from_config(Config::default())
    }
}
