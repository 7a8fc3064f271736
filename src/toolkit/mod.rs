//! The seam between views and the native UI toolkit.
//!
//! Views never own toolkit state directly. They hold [`NodeHandle`]s and reach
//! the toolkit installed on the current thread through [`with_toolkit`].
//! Object trees, layout, rendering and input handling all live behind the
//! [`Toolkit`] trait.

mod context;
mod handle;
pub mod headless;

use bitflags::bitflags;

pub use context::{install, is_installed, try_install, uninstall, with_toolkit};
pub use handle::NodeHandle;
pub use headless::{HeadlessProbe, HeadlessToolkit};

use crate::error::ToolkitError;
use crate::layout::{FlexConfig, Length};
use crate::widgets::Color;

/// Kind of native object to allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    /// Root of the display. Only the toolkit creates these.
    Screen,
    /// Plain rectangle, used for containers.
    Object,
    Button,
    Label,
}

/// Native events a subscription can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Pressed,
    Released,
    Clicked,
    LongPressed,
}

bitflags! {
    /// Behaviour flags on a native object.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ObjectFlags: u8 {
        const CLICKABLE = 1 << 0;
        const HIDDEN = 1 << 1;
        const SCROLLABLE = 1 << 2;
    }
}

/// A subscription that fired during [`Toolkit::timer_handler`].
///
/// `user_data` is whatever was passed to [`Toolkit::add_event_cb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredEvent {
    pub handle: NodeHandle,
    pub kind: EventKind,
    pub user_data: u64,
}

/// The native toolkit a view tree is built on.
///
/// Getters return `None` for stale handles. Mutators return
/// [`ToolkitError::StaleHandle`] instead of touching a reused slot.
pub trait Toolkit {
    /// The screen new top-level objects are created on.
    fn active_screen(&self) -> NodeHandle;

    fn create(&mut self, class: ObjectClass, parent: NodeHandle)
        -> Result<NodeHandle, ToolkitError>;

    /// Delete an object together with all of its native descendants.
    fn delete(&mut self, handle: NodeHandle) -> Result<(), ToolkitError>;

    fn is_valid(&self, handle: NodeHandle) -> bool;

    fn class(&self, handle: NodeHandle) -> Option<ObjectClass>;

    /// Move `handle` under `parent`, appending it to the parent's children.
    fn set_parent(&mut self, handle: NodeHandle, parent: NodeHandle) -> Result<(), ToolkitError>;

    fn parent(&self, handle: NodeHandle) -> Option<NodeHandle>;

    fn child(&self, handle: NodeHandle, index: usize) -> Option<NodeHandle>;

    fn child_count(&self, handle: NodeHandle) -> usize;

    fn set_width(&mut self, handle: NodeHandle, width: Length) -> Result<(), ToolkitError>;

    fn set_height(&mut self, handle: NodeHandle, height: Length) -> Result<(), ToolkitError>;

    fn width(&self, handle: NodeHandle) -> Option<Length>;

    fn height(&self, handle: NodeHandle) -> Option<Length>;

    /// Switch the object to flex layout with the given configuration.
    fn set_flex(&mut self, handle: NodeHandle, flex: FlexConfig) -> Result<(), ToolkitError>;

    fn flex(&self, handle: NodeHandle) -> Option<FlexConfig>;

    /// Align the object to the center of its parent.
    fn center(&mut self, handle: NodeHandle) -> Result<(), ToolkitError>;

    fn set_text(&mut self, handle: NodeHandle, text: &str) -> Result<(), ToolkitError>;

    fn text(&self, handle: NodeHandle) -> Option<String>;

    fn set_bg_color(&mut self, handle: NodeHandle, color: Color) -> Result<(), ToolkitError>;

    fn bg_color(&self, handle: NodeHandle) -> Option<Color>;

    fn add_flags(&mut self, handle: NodeHandle, flags: ObjectFlags) -> Result<(), ToolkitError>;

    fn clear_flags(&mut self, handle: NodeHandle, flags: ObjectFlags) -> Result<(), ToolkitError>;

    fn flags(&self, handle: NodeHandle) -> Option<ObjectFlags>;

    /// Subscribe to `kind` events on `handle`; `user_data` comes back in each [`FiredEvent`].
    fn add_event_cb(
        &mut self,
        handle: NodeHandle,
        kind: EventKind,
        user_data: u64,
    ) -> Result<(), ToolkitError>;

    /// Queue an event as if an input device produced it.
    fn send_event(&mut self, handle: NodeHandle, kind: EventKind) -> Result<(), ToolkitError>;

    /// Run one round of toolkit processing and report the subscriptions that fired.
    fn timer_handler(&mut self) -> Vec<FiredEvent>;
}
