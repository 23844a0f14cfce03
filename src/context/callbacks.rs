/*!
Callbacks associated with a context.

At present, only a callback to request termination, which is consulted before a pass is [scheduled](crate::procedures::schedule).
A pass which has begun always runs to completion.
*/

use super::Context;

pub type CallbackTerminate = dyn FnMut() -> bool;

impl Context {
    /// Replaces any terminate callback with `callback`.
    pub fn set_callback_terminate(&mut self, callback: Box<CallbackTerminate>) {
        self.callback_terminate = Some(callback);
    }

    /// True if a terminate callback is set and requests termination.
    pub fn check_callback_terminate(&mut self) -> bool {
        self.callback_terminate
            .as_mut()
            .is_some_and(|callback| callback())
    }
}
