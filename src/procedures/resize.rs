/*!
Resizing every variable and literal indexed structure of a context in lock-step.

Space for variables is reserved ahead of use, doubling the reserved count whenever a count beyond the reservation is requested.
So, over a sequence of fresh variables, each structure is reallocated a logarithmic number of times.

A decrease in the count truncates every structure, and returns the excess space to the allocator.

This is the only way to change the count of variables, and so the length of every variable-indexed structure is the count of variables (and the length of every literal-indexed structure is twice the count).
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::variable::VARIABLE_MAX,
    types::err::{self, ErrorKind},
};

/// The largest count of variables.
const COUNT_MAX: usize = VARIABLE_MAX as usize + 1;

impl Context {
    /// Sets the count of variables to `count`.
    ///
    /// Fresh variables are neither active nor fixed until initialised, and dropped variables lose their details.
    pub fn resize(&mut self, count: usize) -> Result<(), ErrorKind> {
        if count > COUNT_MAX {
            log::error!(target: targets::RESIZE, "Variables exhausted at {count}");
            return Err(err::AtomDBError::VariablesExhausted.into());
        }

        let capacity = self.atom_db.capacity();
        if count > capacity {
            let capacity = count.max(2 * capacity).min(COUNT_MAX);
            self.atom_db.reserve(capacity)?;
            self.watches.reserve(2 * capacity)?;
            log::debug!(target: targets::RESIZE, "Reserved space for {capacity} variables");
        }

        self.atom_db.resize(count);
        self.watches.resize(2 * count)?;
        Ok(())
    }
}
