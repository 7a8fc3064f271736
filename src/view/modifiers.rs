use crate::layout::Length;
use crate::toolkit::ObjectFlags;

use super::View;

/// Chainable geometry and identity setters available on every view.
///
/// Each setter comes in two forms that apply the same change to the native
/// object immediately:
/// - by value (`width`), for chaining on a freshly built view
/// - by `&mut` (`set_width`), for a view already bound to a name
///
/// Both return the concrete view type, so leaf-specific modifiers keep
/// chaining afterwards.
///
/// # Example
/// ```ignore
/// let label = Text::new("Hello").width(200).height(pct(50));
///
/// let mut button = Button::new("Ok");
/// button.set_width(120).set_height(40);
/// ```
pub trait Modifiers: View + Sized {
    fn width(mut self, width: impl Into<Length>) -> Self {
        self.set_width(width);
        self
    }

    fn set_width(&mut self, width: impl Into<Length>) -> &mut Self {
        let width = width.into();
        self.base()
            .apply("set_width", |tk, handle| tk.set_width(handle, width));
        self
    }

    fn height(mut self, height: impl Into<Length>) -> Self {
        self.set_height(height);
        self
    }

    fn set_height(&mut self, height: impl Into<Length>) -> &mut Self {
        let height = height.into();
        self.base()
            .apply("set_height", |tk, handle| tk.set_height(handle, height));
        self
    }

    fn size(mut self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.set_size(width, height);
        self
    }

    fn set_size(&mut self, width: impl Into<Length>, height: impl Into<Length>) -> &mut Self {
        self.set_width(width).set_height(height)
    }

    fn named(mut self, name: impl Into<String>) -> Self {
        self.set_object_name(name);
        self
    }

    fn set_object_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.base_mut().object_mut().set_object_name(name);
        self
    }

    fn hidden(mut self, hidden: bool) -> Self {
        self.set_hidden(hidden);
        self
    }

    fn set_hidden(&mut self, hidden: bool) -> &mut Self {
        self.base().apply("set_hidden", |tk, handle| {
            if hidden {
                tk.add_flags(handle, ObjectFlags::HIDDEN)
            } else {
                tk.clear_flags(handle, ObjectFlags::HIDDEN)
            }
        });
        self
    }
}

impl<T: View> Modifiers for T {}
