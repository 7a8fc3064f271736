//! Routing of native events back to the views that subscribed to them.
//!
//! A view registers a callback slot here and hands the returned
//! [`CallbackId`] to the toolkit as subscription user data. When the toolkit
//! reports a fired subscription, [`dispatch`] resolves the id back to the slot
//! and runs whatever callback it currently holds.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::toolkit::FiredEvent;

/// Callback for click events
pub type ClickCallback = Rc<dyn Fn()>;

/// Identifier passed to the toolkit as subscription user data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CallbackId(u64);

impl CallbackId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Shared cell holding the callback a view currently wants to run.
///
/// The view keeps one clone to replace the callback, the registry keeps the
/// other to run it.
#[derive(Clone, Default)]
pub struct CallbackSlot {
    callback: Rc<RefCell<Option<ClickCallback>>>,
}

impl CallbackSlot {
    pub fn set(&self, callback: ClickCallback) {
        *self.callback.borrow_mut() = Some(callback);
    }

    pub fn clear(&self) {
        self.callback.borrow_mut().take();
    }

    pub fn get(&self) -> Option<ClickCallback> {
        self.callback.borrow().clone()
    }

    pub fn is_set(&self) -> bool {
        self.callback.borrow().is_some()
    }
}

// ---------------------------------------------------------------------------
// Thread-local registry: CallbackId → CallbackSlot
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Registry {
    slots: HashMap<CallbackId, CallbackSlot>,
    next_id: u64,
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

/// Register a fresh, empty slot.
pub fn register() -> (CallbackId, CallbackSlot) {
    REGISTRY.with(|reg| {
        let mut reg = reg.borrow_mut();
        let id = CallbackId(reg.next_id);
        reg.next_id += 1;
        let slot = CallbackSlot::default();
        reg.slots.insert(id, slot.clone());
        (id, slot)
    })
}

/// Forget a slot. Events still carrying its id are ignored afterwards.
pub fn unregister(id: CallbackId) {
    // Thread teardown may already have destroyed the registry
    let _ = REGISTRY.try_with(|reg| {
        reg.borrow_mut().slots.remove(&id);
    });
}

pub fn registered() -> usize {
    REGISTRY.with(|reg| reg.borrow().slots.len())
}

/// Run the callbacks for `events`, in order, on the calling thread.
///
/// No registry borrow is held while a callback runs, so callbacks may build,
/// drop or reconfigure views (including their own). Returns the number of
/// callbacks invoked.
pub fn dispatch(events: &[FiredEvent]) -> usize {
    let mut invoked = 0;
    for event in events {
        let id = CallbackId(event.user_data);
        let callback = REGISTRY.with(|reg| reg.borrow().slots.get(&id).and_then(|s| s.get()));
        match callback {
            Some(callback) => {
                log::debug!("Dispatching {:?} on {}", event.kind, event.handle);
                callback();
                invoked += 1;
            }
            None => log::trace!("No callback for {:?} on {}", event.kind, event.handle),
        }
    }
    invoked
}

/// Drop every registered slot.
pub(crate) fn reset() {
    let _ = REGISTRY.try_with(|reg| {
        reg.borrow_mut().slots.clear();
    });
}
