use crate::Entity;

use std::{cell::RefCell, fmt, rc::Rc};

/// A lazily built belongs-to slot.
///
/// The slot has two states, absent and present, with a single one-way
/// transition: the first delegated write, `will_change`, or explicit build
/// creates the associated record, and every later access reuses that same
/// instance. Identity is observable through the returned `Rc`.
///
/// The owning record and its parent belong to a single caller for the
/// duration of an operation.
pub struct BelongsTo {
    value: Option<Rc<RefCell<Entity>>>,
}

impl BelongsTo {
    /// The associated record, if it has been built or loaded.
    pub fn get(&self) -> Option<Rc<RefCell<Entity>>> {
        self.value.clone()
    }

    pub fn is_built(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn set(&mut self, entity: Entity) -> Rc<RefCell<Entity>> {
        debug_assert!(self.value.is_none(), "association already built");

        let entity = Rc::new(RefCell::new(entity));
        self.value = Some(entity.clone());
        entity
    }

    pub(crate) fn clear(&mut self) {
        self.value = None;
    }
}

impl Default for BelongsTo {
    fn default() -> Self {
        Self { value: None }
    }
}

impl fmt::Debug for BelongsTo {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.as_ref() {
            Some(entity) => write!(fmt, "{:?}", entity.borrow()),
            None => write!(fmt, "<not built>"),
        }
    }
}
