use std::cell::RefCell;
use std::rc::Rc;

use crate::marker::MarkerSet;

/// Persistence capability for the marker set.
///
/// Loading never fails: a missing or unreadable record is an empty set.
pub trait MarkerStore {
    fn load(&self) -> MarkerSet;
    fn save(&self, markers: &MarkerSet);
}

/// Store that keeps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl MarkerStore for NoopStore {
    fn load(&self) -> MarkerSet {
        MarkerSet::new()
    }

    fn save(&self, _markers: &MarkerSet) {}
}

/// In-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Rc<RefCell<MarkerSet>>,
}

impl MemoryStore {
    pub fn new(initial: MarkerSet) -> Self {
        Self {
            slot: Rc::new(RefCell::new(initial)),
        }
    }

    pub fn snapshot(&self) -> MarkerSet {
        self.slot.borrow().clone()
    }
}

impl MarkerStore for MemoryStore {
    fn load(&self) -> MarkerSet {
        self.slot.borrow().clone()
    }

    fn save(&self, markers: &MarkerSet) {
        *self.slot.borrow_mut() = markers.clone();
    }
}
