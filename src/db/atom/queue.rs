/*!
A decision queue, as a doubly linked list of variables ordered by the time each variable was enqueued.

Each enqueued variable holds links to its neighbours and a stamp, which increases along the queue.
A search cursor caches the position from which the next search for an unassigned variable resumes.

The queue carries no policy: which variable is moved to the end, and when, is left to the caller.
*/

use crate::structures::variable::Variable;

/// Links of a variable in the queue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Link {
    pub prev: Option<Variable>,
    pub next: Option<Variable>,
    pub stamp: u64,
}

#[derive(Default)]
pub struct Queue {
    links: Vec<Link>,
    enqueued: Vec<bool>,

    first: Option<Variable>,
    last: Option<Variable>,

    /// The most recent stamp.
    stamp: u64,

    /// The variable from which a search resumes.
    search: Option<Variable>,
}

impl Queue {
    /// Sets the count of variables to `count`, dequeuing any dropped variable.
    pub fn resize(&mut self, count: usize) {
        let shrinking = count < self.links.len();
        for variable in count..self.links.len() {
            self.dequeue(variable as Variable);
        }
        self.links.resize(count, Link::default());
        self.enqueued.resize(count, false);
        if shrinking {
            self.links.shrink_to(count);
            self.enqueued.shrink_to(count);
        }
    }

    /// Reserves capacity for `count` variables in total.
    pub fn reserve(&mut self, count: usize) -> Result<(), std::collections::TryReserveError> {
        let additional = count.saturating_sub(self.links.len());
        self.links.try_reserve_exact(additional)?;
        self.enqueued.try_reserve_exact(additional)
    }

    /// Appends `variable` to the end of the queue, with a fresh stamp.
    pub fn enqueue(&mut self, variable: Variable) {
        debug_assert!(!self.enqueued[variable as usize]);
        self.stamp += 1;
        self.links[variable as usize] = Link {
            prev: self.last,
            next: None,
            stamp: self.stamp,
        };
        match self.last {
            Some(last) => self.links[last as usize].next = Some(variable),
            None => self.first = Some(variable),
        }
        self.last = Some(variable);
        self.enqueued[variable as usize] = true;

        if self.search.is_none() {
            self.search = Some(variable);
        }
    }

    /// Removes `variable` from the queue, if enqueued.
    ///
    /// If the search cursor is at `variable` the cursor moves to the neighbour before (or else after) `variable`.
    pub fn dequeue(&mut self, variable: Variable) {
        if !self.enqueued[variable as usize] {
            return;
        }
        let Link { prev, next, .. } = self.links[variable as usize];

        match prev {
            Some(prev) => self.links[prev as usize].next = next,
            None => self.first = next,
        }
        match next {
            Some(next) => self.links[next as usize].prev = prev,
            None => self.last = prev,
        }

        if self.search == Some(variable) {
            self.search = prev.or(next);
        }
        self.links[variable as usize] = Link::default();
        self.enqueued[variable as usize] = false;
    }

    /// Moves `variable` to the end of the queue.
    pub fn move_to_end(&mut self, variable: Variable) {
        self.dequeue(variable);
        self.enqueue(variable);
    }

    pub fn contains(&self, variable: Variable) -> bool {
        self.enqueued[variable as usize]
    }

    pub fn link(&self, variable: Variable) -> &Link {
        &self.links[variable as usize]
    }

    pub fn first(&self) -> Option<Variable> {
        self.first
    }

    pub fn last(&self) -> Option<Variable> {
        self.last
    }

    /// The variable from which a search resumes.
    pub fn search(&self) -> Option<Variable> {
        self.search
    }

    pub fn set_search(&mut self, variable: Variable) {
        debug_assert!(self.enqueued[variable as usize]);
        self.search = Some(variable);
    }

    /// The enqueued variables, from first to last.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        std::iter::successors(self.first, |variable| self.links[*variable as usize].next)
    }

    /// Renumbers variables by `map`, to a total of `count` variables.
    ///
    /// The order of kept variables is preserved, and stamps are reissued in order.
    /// If the variable at the search cursor is dropped, the cursor moves to the end of the queue.
    pub fn remap(&mut self, count: usize, map: impl Fn(Variable) -> Option<Variable>) {
        let order: Vec<Variable> = self.iter().filter_map(&map).collect();
        let search = self.search.and_then(&map);

        let mut remapped = Queue::default();
        remapped.resize(count);
        for variable in order {
            remapped.enqueue(variable);
        }
        remapped.search = search.or(remapped.last);

        *self = remapped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeue_moves_search() {
        let mut queue = Queue::default();
        queue.resize(4);
        for variable in 0..4 {
            queue.enqueue(variable);
        }
        queue.set_search(2);

        queue.dequeue(2);
        assert_eq!(queue.search(), Some(1));
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![0, 1, 3]);

        queue.move_to_end(0);
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![1, 3, 0]);
        assert!(queue.link(1).stamp < queue.link(0).stamp);
    }

    #[test]
    fn remap_keeps_order() {
        let mut queue = Queue::default();
        queue.resize(5);
        for variable in [4, 2, 0, 3, 1] {
            queue.enqueue(variable);
        }
        queue.set_search(3);

        // Drop 2 and 3, shift 4 down.
        queue.remap(3, |variable| match variable {
            0 => Some(0),
            1 => Some(1),
            4 => Some(2),
            _ => None,
        });

        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![2, 0, 1]);
        assert_eq!(queue.search(), Some(1));
        assert_eq!(queue.first(), Some(2));
    }
}
