//! In-memory toolkit for tests, demos and display-less targets.
//!
//! The headless toolkit keeps the native object tree, geometry, flex settings,
//! styles and event subscriptions, but never computes layout or draws.
//!
//! Objects live in a slot table with generational indices:
//! - A deleted slot bumps its generation and goes on the free list
//! - Handles from before the deletion fail validation from then on
//! - Deletion is recursive, mirroring the native primitive

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::ToolkitError;
use crate::layout::{FlexConfig, Length};
use crate::widgets::Color;

use super::{EventKind, FiredEvent, NodeHandle, ObjectClass, ObjectFlags, Toolkit};

/// Default resolution of the headless screen.
pub const DEFAULT_SCREEN_WIDTH: i32 = 480;
pub const DEFAULT_SCREEN_HEIGHT: i32 = 320;

struct ObjectData {
    class: ObjectClass,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    width: Length,
    height: Length,
    flex: Option<FlexConfig>,
    centered: bool,
    text: Option<String>,
    bg_color: Option<Color>,
    flags: ObjectFlags,
    subscriptions: Vec<(EventKind, u64)>,
}

impl ObjectData {
    fn new(class: ObjectClass, parent: Option<NodeHandle>) -> Self {
        let flags = match class {
            ObjectClass::Button => ObjectFlags::CLICKABLE,
            ObjectClass::Screen | ObjectClass::Object => {
                ObjectFlags::CLICKABLE | ObjectFlags::SCROLLABLE
            }
            ObjectClass::Label => ObjectFlags::empty(),
        };
        Self {
            class,
            parent,
            children: Vec::new(),
            width: Length::Content,
            height: Length::Content,
            flex: None,
            centered: false,
            text: match class {
                ObjectClass::Label => Some(String::new()),
                _ => None,
            },
            bg_color: None,
            flags,
            subscriptions: Vec::new(),
        }
    }
}

struct Slot {
    generation: u32,
    object: Option<ObjectData>,
}

#[derive(Default)]
struct Counters {
    created: usize,
    deleted: usize,
    delete_calls: usize,
    stale_operations: usize,
}

struct HeadlessState {
    slots: Vec<Slot>,
    free_indices: Vec<u32>,
    screen: NodeHandle,
    object_limit: Option<usize>,
    subscription_limit: Option<usize>,
    live: usize,
    pending_events: VecDeque<(NodeHandle, EventKind)>,
    counters: Counters,
}

impl HeadlessState {
    fn new(width: i32, height: i32) -> Self {
        let mut screen = ObjectData::new(ObjectClass::Screen, None);
        screen.width = Length::Px(width);
        screen.height = Length::Px(height);
        Self {
            slots: vec![Slot {
                generation: 0,
                object: Some(screen),
            }],
            free_indices: Vec::new(),
            screen: NodeHandle::from_parts(0, 0),
            object_limit: None,
            subscription_limit: None,
            live: 0,
            pending_events: VecDeque::new(),
            counters: Counters::default(),
        }
    }

    fn get(&self, handle: NodeHandle) -> Option<&ObjectData> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.object.as_ref()
    }

    fn get_mut(&mut self, handle: NodeHandle) -> Result<&mut ObjectData, ToolkitError> {
        let valid = self
            .slots
            .get(handle.index() as usize)
            .is_some_and(|slot| slot.generation == handle.generation() && slot.object.is_some());
        if !valid {
            self.counters.stale_operations += 1;
            return Err(ToolkitError::StaleHandle(handle));
        }
        self.slots[handle.index() as usize]
            .object
            .as_mut()
            .ok_or(ToolkitError::StaleHandle(handle))
    }

    fn expect_class(
        &mut self,
        handle: NodeHandle,
        expected: ObjectClass,
    ) -> Result<&mut ObjectData, ToolkitError> {
        let object = self.get_mut(handle)?;
        if object.class != expected {
            return Err(ToolkitError::WrongClass {
                handle,
                expected,
                actual: object.class,
            });
        }
        Ok(object)
    }

    fn allocate(&mut self, data: ObjectData) -> NodeHandle {
        self.live += 1;
        self.counters.created += 1;
        if let Some(index) = self.free_indices.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(data);
            NodeHandle::from_parts(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                object: Some(data),
            });
            NodeHandle::from_parts(index, 0)
        }
    }

    fn free(&mut self, handle: NodeHandle) -> Option<ObjectData> {
        let slot = self.slots.get_mut(handle.index() as usize)?;
        if slot.generation != handle.generation() {
            return None;
        }
        let data = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_indices.push(handle.index());
        self.live -= 1;
        self.counters.deleted += 1;
        Some(data)
    }

    fn detach(&mut self, handle: NodeHandle, parent: Option<NodeHandle>) {
        let Some(parent) = parent else {
            return;
        };
        let Some(slot) = self.slots.get_mut(parent.index() as usize) else {
            return;
        };
        if slot.generation != parent.generation() {
            return;
        }
        if let Some(object) = slot.object.as_mut() {
            object.children.retain(|&child| child != handle);
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeHandle, mut handle: NodeHandle) -> bool {
        loop {
            if handle == candidate {
                return true;
            }
            match self.get(handle).and_then(|o| o.parent) {
                Some(parent) => handle = parent,
                None => return false,
            }
        }
    }
}

/// A [`Toolkit`] that keeps everything in memory.
///
/// State is shared with any [`HeadlessProbe`] taken from it, so tests can keep
/// inspecting the toolkit after handing it to [`App`](crate::App).
pub struct HeadlessToolkit {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessToolkit {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState::new(width, height))),
        }
    }

    /// Fail allocations once `limit` objects (excluding the screen) are live.
    pub fn with_object_limit(self, limit: usize) -> Self {
        self.state.borrow_mut().object_limit = Some(limit);
        self
    }

    /// Fail `add_event_cb` once an object holds `limit` subscriptions.
    pub fn with_subscription_limit(self, limit: usize) -> Self {
        self.state.borrow_mut().subscription_limit = Some(limit);
        self
    }

    pub fn probe(&self) -> HeadlessProbe {
        HeadlessProbe {
            state: self.state.clone(),
        }
    }
}

impl Default for HeadlessToolkit {
    fn default() -> Self {
        Self::new(DEFAULT_SCREEN_WIDTH, DEFAULT_SCREEN_HEIGHT)
    }
}

impl Toolkit for HeadlessToolkit {
    fn active_screen(&self) -> NodeHandle {
        self.state.borrow().screen
    }

    fn create(
        &mut self,
        class: ObjectClass,
        parent: NodeHandle,
    ) -> Result<NodeHandle, ToolkitError> {
        let mut state = self.state.borrow_mut();
        if class == ObjectClass::Screen {
            return Err(ToolkitError::WrongClass {
                handle: parent,
                expected: ObjectClass::Object,
                actual: ObjectClass::Screen,
            });
        }
        if state.object_limit.is_some_and(|limit| state.live >= limit) {
            log::warn!("Object limit reached, cannot create {:?}", class);
            return Err(ToolkitError::OutOfMemory(class));
        }
        state.get_mut(parent)?;

        let handle = state.allocate(ObjectData::new(class, Some(parent)));
        state.get_mut(parent)?.children.push(handle);
        log::trace!("Created {:?} {} under {}", class, handle, parent);
        Ok(handle)
    }

    fn delete(&mut self, handle: NodeHandle) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        state.counters.delete_calls += 1;
        if handle == state.screen {
            return Err(ToolkitError::WrongClass {
                handle,
                expected: ObjectClass::Object,
                actual: ObjectClass::Screen,
            });
        }
        let parent = state.get_mut(handle)?.parent;
        state.detach(handle, parent);

        // Depth-first; children of a freed object are freed with it
        let mut pending = vec![handle];
        while let Some(next) = pending.pop() {
            if let Some(data) = state.free(next) {
                pending.extend(data.children);
            }
        }
        state.pending_events.retain(|(h, _)| *h != handle);
        Ok(())
    }

    fn is_valid(&self, handle: NodeHandle) -> bool {
        self.state.borrow().get(handle).is_some()
    }

    fn class(&self, handle: NodeHandle) -> Option<ObjectClass> {
        self.state.borrow().get(handle).map(|o| o.class)
    }

    fn set_parent(&mut self, handle: NodeHandle, parent: NodeHandle) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        state.get_mut(parent)?;
        let old_parent = state.get_mut(handle)?.parent;
        if state.is_ancestor_or_self(handle, parent) {
            return Err(ToolkitError::CyclicParent(handle));
        }
        state.detach(handle, old_parent);
        state.get_mut(handle)?.parent = Some(parent);
        state.get_mut(parent)?.children.push(handle);
        Ok(())
    }

    fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.state.borrow().get(handle).and_then(|o| o.parent)
    }

    fn child(&self, handle: NodeHandle, index: usize) -> Option<NodeHandle> {
        self.state
            .borrow()
            .get(handle)
            .and_then(|o| o.children.get(index).copied())
    }

    fn child_count(&self, handle: NodeHandle) -> usize {
        self.state
            .borrow()
            .get(handle)
            .map_or(0, |o| o.children.len())
    }

    fn set_width(&mut self, handle: NodeHandle, width: Length) -> Result<(), ToolkitError> {
        self.state.borrow_mut().get_mut(handle)?.width = width;
        Ok(())
    }

    fn set_height(&mut self, handle: NodeHandle, height: Length) -> Result<(), ToolkitError> {
        self.state.borrow_mut().get_mut(handle)?.height = height;
        Ok(())
    }

    fn width(&self, handle: NodeHandle) -> Option<Length> {
        self.state.borrow().get(handle).map(|o| o.width)
    }

    fn height(&self, handle: NodeHandle) -> Option<Length> {
        self.state.borrow().get(handle).map(|o| o.height)
    }

    fn set_flex(&mut self, handle: NodeHandle, flex: FlexConfig) -> Result<(), ToolkitError> {
        self.state.borrow_mut().get_mut(handle)?.flex = Some(flex);
        Ok(())
    }

    fn flex(&self, handle: NodeHandle) -> Option<FlexConfig> {
        self.state.borrow().get(handle).and_then(|o| o.flex)
    }

    fn center(&mut self, handle: NodeHandle) -> Result<(), ToolkitError> {
        self.state.borrow_mut().get_mut(handle)?.centered = true;
        Ok(())
    }

    fn set_text(&mut self, handle: NodeHandle, text: &str) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        let label = state.expect_class(handle, ObjectClass::Label)?;
        label.text = Some(text.to_string());
        Ok(())
    }

    fn text(&self, handle: NodeHandle) -> Option<String> {
        self.state.borrow().get(handle).and_then(|o| o.text.clone())
    }

    fn set_bg_color(&mut self, handle: NodeHandle, color: Color) -> Result<(), ToolkitError> {
        self.state.borrow_mut().get_mut(handle)?.bg_color = Some(color);
        Ok(())
    }

    fn bg_color(&self, handle: NodeHandle) -> Option<Color> {
        self.state.borrow().get(handle).and_then(|o| o.bg_color)
    }

    fn add_flags(&mut self, handle: NodeHandle, flags: ObjectFlags) -> Result<(), ToolkitError> {
        self.state.borrow_mut().get_mut(handle)?.flags |= flags;
        Ok(())
    }

    fn clear_flags(&mut self, handle: NodeHandle, flags: ObjectFlags) -> Result<(), ToolkitError> {
        self.state.borrow_mut().get_mut(handle)?.flags -= flags;
        Ok(())
    }

    fn flags(&self, handle: NodeHandle) -> Option<ObjectFlags> {
        self.state.borrow().get(handle).map(|o| o.flags)
    }

    fn add_event_cb(
        &mut self,
        handle: NodeHandle,
        kind: EventKind,
        user_data: u64,
    ) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        let limit = state.subscription_limit;
        let object = state.get_mut(handle)?;
        if limit.is_some_and(|limit| object.subscriptions.len() >= limit) {
            log::warn!("Subscription limit reached on {}", handle);
            return Err(ToolkitError::SubscriptionLimit(handle));
        }
        object.subscriptions.push((kind, user_data));
        Ok(())
    }

    fn send_event(&mut self, handle: NodeHandle, kind: EventKind) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        state.get_mut(handle)?;
        state.pending_events.push_back((handle, kind));
        Ok(())
    }

    fn timer_handler(&mut self) -> Vec<FiredEvent> {
        let mut state = self.state.borrow_mut();
        let pending: Vec<_> = state.pending_events.drain(..).collect();

        let mut fired = Vec::new();
        for (handle, kind) in pending {
            let Some(object) = state.get(handle) else {
                log::trace!("Dropping {:?} for deleted object {}", kind, handle);
                continue;
            };
            if object.flags.contains(ObjectFlags::HIDDEN) {
                continue;
            }
            // Pointer-originated events only reach clickable objects
            if !object.flags.contains(ObjectFlags::CLICKABLE) {
                continue;
            }
            fired.extend(
                object
                    .subscriptions
                    .iter()
                    .filter(|(k, _)| *k == kind)
                    .map(|&(kind, user_data)| FiredEvent {
                        handle,
                        kind,
                        user_data,
                    }),
            );
        }
        fired
    }
}

/// Read-only window into a [`HeadlessToolkit`]'s bookkeeping.
#[derive(Clone)]
pub struct HeadlessProbe {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessProbe {
    /// Objects alive right now, not counting the screen.
    pub fn live_objects(&self) -> usize {
        self.state.borrow().live
    }

    pub fn created(&self) -> usize {
        self.state.borrow().counters.created
    }

    /// Objects freed, including descendants freed by a recursive delete.
    pub fn deleted(&self) -> usize {
        self.state.borrow().counters.deleted
    }

    /// Calls to [`Toolkit::delete`], successful or not.
    pub fn delete_calls(&self) -> usize {
        self.state.borrow().counters.delete_calls
    }

    /// Mutating calls that were rejected because the handle was stale.
    pub fn stale_operations(&self) -> usize {
        self.state.borrow().counters.stale_operations
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().pending_events.len()
    }

    pub fn is_centered(&self, handle: NodeHandle) -> bool {
        self.state.borrow().get(handle).is_some_and(|o| o.centered)
    }

    pub fn subscriptions(&self, handle: NodeHandle) -> Vec<(EventKind, u64)> {
        self.state
            .borrow()
            .get(handle)
            .map(|o| o.subscriptions.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_is_root() {
        let tk = HeadlessToolkit::new(800, 600);
        let screen = tk.active_screen();
        assert!(tk.is_valid(screen));
        assert_eq!(tk.class(screen), Some(ObjectClass::Screen));
        assert_eq!(tk.parent(screen), None);
        assert_eq!(tk.width(screen), Some(Length::Px(800)));
        assert_eq!(tk.height(screen), Some(Length::Px(600)));
        assert_eq!(tk.probe().live_objects(), 0);
    }

    #[test]
    fn test_create_appends_to_parent() {
        let mut tk = HeadlessToolkit::default();
        let screen = tk.active_screen();
        let a = tk.create(ObjectClass::Object, screen).unwrap();
        let b = tk.create(ObjectClass::Label, screen).unwrap();

        assert_eq!(tk.child_count(screen), 2);
        assert_eq!(tk.child(screen, 0), Some(a));
        assert_eq!(tk.child(screen, 1), Some(b));
        assert_eq!(tk.parent(b), Some(screen));
        assert_eq!(tk.text(b), Some(String::new()));
        assert_eq!(tk.text(a), None);
    }

    #[test]
    fn test_delete_is_recursive() {
        let mut tk = HeadlessToolkit::default();
        let probe = tk.probe();
        let screen = tk.active_screen();
        let outer = tk.create(ObjectClass::Object, screen).unwrap();
        let button = tk.create(ObjectClass::Button, outer).unwrap();
        let label = tk.create(ObjectClass::Label, button).unwrap();
        assert_eq!(probe.live_objects(), 3);

        tk.delete(outer).unwrap();
        assert!(!tk.is_valid(outer));
        assert!(!tk.is_valid(button));
        assert!(!tk.is_valid(label));
        assert_eq!(tk.child_count(screen), 0);
        assert_eq!(probe.live_objects(), 0);
        assert_eq!(probe.deleted(), 3);
        assert_eq!(probe.delete_calls(), 1);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut tk = HeadlessToolkit::default();
        let probe = tk.probe();
        let screen = tk.active_screen();
        let old = tk.create(ObjectClass::Label, screen).unwrap();
        tk.delete(old).unwrap();

        let new = tk.create(ObjectClass::Label, screen).unwrap();
        assert_eq!(old.index(), new.index());
        assert_ne!(old, new);

        assert_eq!(tk.delete(old), Err(ToolkitError::StaleHandle(old)));
        assert_eq!(
            tk.set_text(old, "ghost"),
            Err(ToolkitError::StaleHandle(old))
        );
        assert!(tk.is_valid(new));
        assert_eq!(probe.stale_operations(), 2);
    }

    #[test]
    fn test_set_parent_moves_between_children_lists() {
        let mut tk = HeadlessToolkit::default();
        let screen = tk.active_screen();
        let container = tk.create(ObjectClass::Object, screen).unwrap();
        let label = tk.create(ObjectClass::Label, screen).unwrap();

        tk.set_parent(label, container).unwrap();
        assert_eq!(tk.parent(label), Some(container));
        assert_eq!(tk.child_count(screen), 1);
        assert_eq!(tk.child(container, 0), Some(label));
    }

    #[test]
    fn test_set_parent_rejects_cycles() {
        let mut tk = HeadlessToolkit::default();
        let screen = tk.active_screen();
        let outer = tk.create(ObjectClass::Object, screen).unwrap();
        let inner = tk.create(ObjectClass::Object, outer).unwrap();

        assert_eq!(
            tk.set_parent(outer, inner),
            Err(ToolkitError::CyclicParent(outer))
        );
        assert_eq!(
            tk.set_parent(outer, outer),
            Err(ToolkitError::CyclicParent(outer))
        );
        assert_eq!(tk.parent(outer), Some(screen));
    }

    #[test]
    fn test_set_text_requires_label() {
        let mut tk = HeadlessToolkit::default();
        let screen = tk.active_screen();
        let button = tk.create(ObjectClass::Button, screen).unwrap();
        assert_eq!(
            tk.set_text(button, "nope"),
            Err(ToolkitError::WrongClass {
                handle: button,
                expected: ObjectClass::Label,
                actual: ObjectClass::Button,
            })
        );
    }

    #[test]
    fn test_object_limit() {
        let mut tk = HeadlessToolkit::default().with_object_limit(1);
        let screen = tk.active_screen();
        tk.create(ObjectClass::Object, screen).unwrap();
        assert_eq!(
            tk.create(ObjectClass::Button, screen),
            Err(ToolkitError::OutOfMemory(ObjectClass::Button))
        );
    }

    #[test]
    fn test_subscription_limit() {
        let mut tk = HeadlessToolkit::default().with_subscription_limit(1);
        let screen = tk.active_screen();
        let button = tk.create(ObjectClass::Button, screen).unwrap();
        tk.add_event_cb(button, EventKind::Clicked, 1).unwrap();
        assert_eq!(
            tk.add_event_cb(button, EventKind::Pressed, 2),
            Err(ToolkitError::SubscriptionLimit(button))
        );
        assert_eq!(tk.probe().subscriptions(button).len(), 1);
    }

    #[test]
    fn test_click_reaches_subscriptions() {
        let mut tk = HeadlessToolkit::default();
        let screen = tk.active_screen();
        let button = tk.create(ObjectClass::Button, screen).unwrap();
        tk.add_event_cb(button, EventKind::Clicked, 7).unwrap();
        tk.add_event_cb(button, EventKind::Pressed, 8).unwrap();

        tk.send_event(button, EventKind::Clicked).unwrap();
        let fired = tk.timer_handler();
        assert_eq!(
            fired,
            vec![FiredEvent {
                handle: button,
                kind: EventKind::Clicked,
                user_data: 7,
            }]
        );
        assert!(tk.timer_handler().is_empty());
    }

    #[test]
    fn test_hidden_and_unclickable_objects_swallow_clicks() {
        let mut tk = HeadlessToolkit::default();
        let screen = tk.active_screen();
        let button = tk.create(ObjectClass::Button, screen).unwrap();
        let label = tk.create(ObjectClass::Label, screen).unwrap();
        tk.add_event_cb(button, EventKind::Clicked, 1).unwrap();
        tk.add_event_cb(label, EventKind::Clicked, 2).unwrap();

        tk.add_flags(button, ObjectFlags::HIDDEN).unwrap();
        tk.send_event(button, EventKind::Clicked).unwrap();
        tk.send_event(label, EventKind::Clicked).unwrap();
        assert!(tk.timer_handler().is_empty());

        tk.clear_flags(button, ObjectFlags::HIDDEN).unwrap();
        tk.send_event(button, EventKind::Clicked).unwrap();
        assert_eq!(tk.timer_handler().len(), 1);
    }

    #[test]
    fn test_delete_drops_queued_events() {
        let mut tk = HeadlessToolkit::default();
        let probe = tk.probe();
        let screen = tk.active_screen();
        let button = tk.create(ObjectClass::Button, screen).unwrap();
        tk.add_event_cb(button, EventKind::Clicked, 1).unwrap();
        tk.send_event(button, EventKind::Clicked).unwrap();
        assert_eq!(probe.pending_events(), 1);

        tk.delete(button).unwrap();
        assert_eq!(probe.pending_events(), 0);
        assert!(tk.timer_handler().is_empty());
    }

    #[test]
    fn test_screen_cannot_be_deleted() {
        let mut tk = HeadlessToolkit::default();
        let screen = tk.active_screen();
        assert!(tk.delete(screen).is_err());
        assert!(tk.is_valid(screen));
    }
}
