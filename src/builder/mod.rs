/*!
Tools for building a context.

# Basic methods

The library has two basic methods for building a context:
- [import_literal](crate::context::Context::import_literal), to obtain the internal literal of an external (DIMACS) literal.
- [new_original_clause](crate::context::Context::new_original_clause), to add a clause.

A formula may be added to a context by interweaving these two methods.
Or, a formula in DIMACS form may be read with [read_dimacs](crate::context::Context::read_dimacs).

# Examples

A clause built using basic methods.

```rust
# use otter_arena::context::Context;
let mut the_context = Context::default();
let p = the_context.import_literal(1).unwrap();
let q = the_context.import_literal(-2).unwrap();
let r = the_context.import_literal(3).unwrap();

assert!(the_context.new_original_clause(&[p, q, r]).is_ok());
assert!(the_context.new_original_clause(&[!p, !q]).is_ok());
assert_eq!(the_context.counters.original_clauses, 2);
```

A DIMACS formula, with a tautology which is skipped.

```rust
# use otter_arena::context::Context;
# use std::io::Write;
let mut the_context = Context::default();

let mut dimacs = vec![];
let _ = dimacs.write(b"
c an example
p cnf 3 3
 1  2  3 0
-1  1  2 0
 2 -3 2 0
");

let info = the_context.read_dimacs(dimacs.as_slice()).unwrap();
assert_eq!(info.expected_clauses, Some(3));
assert_eq!(info.added_clauses, 2);
assert_eq!(info.tautologies, 1);
assert_eq!(the_context.counters.binary_clauses(), 1);
```
*/

mod dimacs;
pub use dimacs::ParserInfo;
