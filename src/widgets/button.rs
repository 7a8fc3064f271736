use std::rc::Rc;

use crate::dispatch::{self, CallbackId, CallbackSlot};
use crate::error::{Result, ToolkitError};
use crate::toolkit::{with_toolkit, EventKind, NodeHandle, ObjectClass};
use crate::view::ViewBase;
use crate::View;

use super::Color;

/// A clickable button with a centered text label.
///
/// The label is a native child object (child 0 of the button). One native
/// `Clicked` subscription is registered at construction; [`on_click`]
/// only swaps the callback it leads to.
///
/// [`on_click`]: Button::on_click
#[derive(View)]
pub struct Button {
    base: ViewBase,
    callback_id: CallbackId,
    on_click: CallbackSlot,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        match Self::try_new(label) {
            Ok(button) => button,
            Err(err) => panic!("failed to build button: {err}"),
        }
    }

    pub fn try_new(label: impl Into<String>) -> Result<Self> {
        let base = ViewBase::try_new(ObjectClass::Button, None)?;
        let (callback_id, on_click) = dispatch::register();
        // Built first so an early return below unregisters and releases
        let button = Self {
            base,
            callback_id,
            on_click,
        };

        if let Some(handle) = button.base.handle() {
            let label = label.into();
            with_toolkit(|tk| -> Result<(), ToolkitError> {
                // Allocated under the button, so the toolkit deletes it with the button
                let label_handle = tk.create(ObjectClass::Label, handle)?;
                tk.set_text(label_handle, &label)?;
                tk.center(label_handle)?;
                tk.add_event_cb(handle, EventKind::Clicked, callback_id.as_u64())
            })??;
        }
        Ok(button)
    }

    fn label_handle(&self) -> Option<NodeHandle> {
        self.base.query(|tk, handle| tk.child(handle, 0))
    }

    /// Replace the label text. Does nothing if the label object is gone.
    pub fn set_label(&mut self, label: impl AsRef<str>) -> &mut Self {
        let Some(label_handle) = self.label_handle() else {
            log::debug!("Button {:?} has no label to update", self.base.handle());
            return self;
        };
        let label = label.as_ref();
        self.base
            .apply("set_text", |tk, _| tk.set_text(label_handle, label));
        self
    }

    pub fn with_label(mut self, label: impl AsRef<str>) -> Self {
        self.set_label(label);
        self
    }

    /// The label text, as the toolkit reports it.
    pub fn label(&self) -> Option<String> {
        let label_handle = self.label_handle()?;
        self.base.query(|tk, _| tk.text(label_handle))
    }

    /// Set the click callback, replacing any previous one.
    pub fn on_click<F: Fn() + 'static>(mut self, callback: F) -> Self {
        self.set_on_click(callback);
        self
    }

    pub fn set_on_click<F: Fn() + 'static>(&mut self, callback: F) -> &mut Self {
        self.on_click.set(Rc::new(callback));
        self
    }

    pub fn has_on_click(&self) -> bool {
        self.on_click.is_set()
    }

    pub fn bg_color(mut self, color: impl Into<Color>) -> Self {
        self.set_bg_color(color);
        self
    }

    pub fn set_bg_color(&mut self, color: impl Into<Color>) -> &mut Self {
        let color = color.into();
        self.base
            .apply("set_bg_color", |tk, handle| tk.set_bg_color(handle, color));
        self
    }

    /// Queue a click as if the pointer produced it.
    ///
    /// The callback runs during the next [`App::tick`](crate::App::tick).
    pub fn click(&self) {
        self.base
            .apply("send_event", |tk, handle| tk.send_event(handle, EventKind::Clicked));
    }
}

impl Drop for Button {
    fn drop(&mut self) {
        self.on_click.clear();
        dispatch::unregister(self.callback_id);
    }
}

/// Create a button
///
/// ```ignore
/// button("Save").on_click(|| log::info!("saved"))
/// ```
pub fn button(label: impl Into<String>) -> Button {
    Button::new(label)
}
