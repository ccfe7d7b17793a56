use std::cell::Cell;
use std::rc::Rc;

/// Counts how many of the [`Tracked`] values it handed out have been dropped.
#[derive(Debug, Clone, Default)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    /// Creates a value which increments this counter when dropped.
    pub fn track(&self, id: usize) -> Tracked {
        Tracked {
            id,
            drops: Rc::clone(&self.0),
        }
    }

    pub fn dropped(&self) -> usize {
        self.0.get()
    }
}

#[derive(Debug)]
pub struct Tracked {
    pub id: usize,
    drops: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}
