//! Views: typed owners of native toolkit objects.
//!
//! Every view embeds a [`ViewBase`] holding its native handle. The [`View`]
//! trait gives uniform access to that base (and to the concrete type behind a
//! `Box<dyn View>`), and [`Modifiers`] layers the chainable geometry setters
//! on top of every view through a blanket impl.

mod base;
mod modifiers;

use std::any::Any;

pub use base::ViewBase;
pub use modifiers::Modifiers;

use crate::toolkit::NodeHandle;

/// A value that owns a native toolkit object through a [`ViewBase`].
///
/// Implement it with `#[derive(View)]`.
pub trait View: Any {
    fn base(&self) -> &ViewBase;

    fn base_mut(&mut self) -> &mut ViewBase;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The native handle, borrowed; ownership stays with the view.
    fn handle(&self) -> Option<NodeHandle> {
        self.base().handle()
    }

    /// Native handle of the container this view was attached to.
    fn parent(&self) -> Option<NodeHandle> {
        self.base().parent()
    }

    fn object_name(&self) -> Option<&str> {
        self.base().object().object_name()
    }
}

impl dyn View {
    pub fn is<T: View>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: View>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: View>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
