/*!
Compaction of variables, renumbering the variables of a context so that the variables form a dense range.

# Overview

Over a solve variables are fixed at the root, or eliminated, and each such variable keeps a place in every variable and literal indexed structure.
Compaction recovers these places in two passes.

The first pass builds a [Remapping]:
- Active variables take the next free index, in order.
- Every fixed variable folds into a single representative variable (the first fixed variable), with the polarity of the literal standing for a fixed variable chosen so that the literal has the value of the variable.
- Every other variable is dropped.
  The external name of a dropped variable is freed for reuse, unless the variable was eliminated, as the name then stands for the value of the variable.

The second pass rewrites, in order:
1. The trail (collapsing repeated entries of the representative), and the decision frames.
2. The decision queue, the score heap, and the import and export maps.
3. Values, flags, and assignments.
4. The queue of pending units.
5. Binary watches.
6. The arena, through a [dense collection](crate::procedures::collect::dense) with every literal rewritten.
7. The length of every structure, to the new count of variables.

If no variable is dropped, the renumbering is the identity and nothing is rewritten.

Compaction requires the root, a propagation fixpoint, and [dense mode](crate::db::watches).
*/

use crate::{
    context::Context,
    db::{atom::Remapping, watches::pool::Watch},
    misc::log::targets::{self},
    structures::{literal::Literal, variable::Variable},
    types::err::ErrorKind,
};

impl Context {
    /// Renumbers variables, and returns the renumbering.
    pub fn compact_variables(&mut self) -> Result<Remapping, ErrorKind> {
        self.require_dense()?;

        let remapping = self.compaction_map();
        if remapping.new_count() == remapping.old_count() {
            debug_assert!(remapping.is_identity());
            log::debug!(target: targets::COMPACT, "Nothing to compact");
            return Ok(remapping);
        }

        // Binary watches of fixed literals would collide on the representative.
        self.flush_watches(self.arena.end());

        let map = |literal: Literal| remapping.literal(literal);

        self.literal_db.remap(map);
        self.atom_db.remap(&remapping);
        self.literal_db.remap_units(map);
        for (position, literal) in self.literal_db.trail().iter().enumerate() {
            self.atom_db.set_trail_position(literal.variable(), position);
        }

        self.watches.permute(map);
        for index in 0..2 * remapping.new_count() {
            let counters = &mut self.counters;
            self.watches.retain(Literal::from_index(index), |watch| match watch {
                Watch::Binary { other, redundant } => match map(*other) {
                    Some(mapped) => {
                        *other = mapped;
                        true
                    }
                    None => {
                        // The list of the dropped literal was released, so the clause is uncounted once, here.
                        *counters.count_binary(*redundant) -= 1;
                        false
                    }
                },
                Watch::Large { .. } => false,
            });
        }

        self.dense_collection(Some(&remapping))?;
        self.resize(remapping.new_count())?;

        self.counters.compactions += 1;
        log::info!(
            target: targets::COMPACT,
            "Compaction {}: {} to {} variables",
            self.counters.compactions,
            remapping.old_count(),
            remapping.new_count()
        );
        debug_assert!(self.watches.binaries_symmetric());
        Ok(remapping)
    }

    /// The renumbering compaction would make.
    pub fn compaction_map(&self) -> Remapping {
        let count = self.atom_db.count();
        let mut map = Vec::with_capacity(count);
        let mut next: Variable = 0;
        let mut representative: Option<(Variable, bool)> = None;

        for variable in 0..count as Variable {
            let flags = self.atom_db.flags(variable);

            let mapped = if flags.active {
                next += 1;
                Some(Literal::new(next - 1, true))
            } else if flags.fixed {
                let value = self.atom_db.value_of(Literal::new(variable, true)) == Some(true);
                match representative {
                    None => {
                        representative = Some((next, value));
                        next += 1;
                        Some(Literal::new(next - 1, true))
                    }
                    Some((fixed, fixed_value)) => Some(Literal::new(fixed, value == fixed_value)),
                }
            } else {
                None
            };

            map.push(mapped);
        }

        Remapping::new(map, next as usize)
    }
}
