use crate::error::{Result, ToolkitError};
use crate::layout::{pct, FlexAlign, FlexConfig};
use crate::toolkit::{with_toolkit, ObjectClass};
use crate::view::{View, ViewBase};

/// Generates a flex stack type. HStack and VStack differ only in flow.
macro_rules! stack_view {
    ($(#[$meta:meta])* $name:ident, $flex:expr) => {
        $(#[$meta])*
        #[derive(crate::View)]
        pub struct $name {
            // Declared before `base`: children release before the container
            children: Vec<Box<dyn View>>,
            base: ViewBase,
            flex: FlexConfig,
        }

        impl $name {
            /// An empty stack filling its parent.
            pub fn new() -> Self {
                match Self::try_new() {
                    Ok(stack) => stack,
                    Err(err) => panic!(concat!("failed to build ", stringify!($name), ": {}"), err),
                }
            }

            pub fn try_new() -> Result<Self> {
                let base = ViewBase::try_new(ObjectClass::Object, None)?;
                let flex = $flex;
                let stack = Self {
                    children: Vec::new(),
                    base,
                    flex,
                };
                if let Some(handle) = stack.base.handle() {
                    with_toolkit(|tk| -> Result<(), ToolkitError> {
                        tk.set_width(handle, pct(100))?;
                        tk.set_height(handle, pct(100))?;
                        tk.set_flex(handle, flex)
                    })??;
                }
                Ok(stack)
            }

            /// A stack holding `children`, in order.
            pub fn with_children(children: Vec<Box<dyn View>>) -> Self {
                let mut stack = Self::new();
                for child in children {
                    stack.add_boxed_child(child);
                }
                stack
            }

            /// Build a stack by letting `f` add children to the empty stack.
            pub fn build(f: impl FnOnce(&mut Self)) -> Self {
                let mut stack = Self::new();
                f(&mut stack);
                stack
            }

            /// Append `child` and move its native object under this stack.
            pub fn add_child(&mut self, child: impl View) -> &mut Self {
                self.add_boxed_child(Box::new(child))
            }

            pub fn add_boxed_child(&mut self, mut child: Box<dyn View>) -> &mut Self {
                match self.base.handle() {
                    Some(container) if child.handle().is_some() => {
                        child.base_mut().reparent(container);
                    }
                    _ => log::warn!(
                        "Adding released view to {}; native tree left untouched",
                        stringify!($name)
                    ),
                }
                self.children.push(child);
                self
            }

            pub fn child(mut self, child: impl View) -> Self {
                self.add_child(child);
                self
            }

            pub fn extend_children<I, W>(mut self, children: I) -> Self
            where
                I: IntoIterator<Item = W>,
                W: View,
            {
                for child in children {
                    self.add_child(child);
                }
                self
            }

            pub fn children(&self) -> &[Box<dyn View>] {
                &self.children
            }

            pub fn child_at(&self, index: usize) -> Option<&(dyn View + 'static)> {
                self.children.get(index).map(|child| &**child)
            }

            pub fn child_at_mut(&mut self, index: usize) -> Option<&mut (dyn View + 'static)> {
                self.children.get_mut(index).map(|child| &mut **child)
            }

            pub fn len(&self) -> usize {
                self.children.len()
            }

            pub fn is_empty(&self) -> bool {
                self.children.is_empty()
            }

            pub fn flex(&self) -> FlexConfig {
                self.flex
            }

            pub fn main_axis_alignment(mut self, alignment: FlexAlign) -> Self {
                self.set_main_axis_alignment(alignment);
                self
            }

            pub fn set_main_axis_alignment(&mut self, alignment: FlexAlign) -> &mut Self {
                self.flex.main = alignment;
                self.apply_flex()
            }

            pub fn cross_axis_alignment(mut self, alignment: FlexAlign) -> Self {
                self.set_cross_axis_alignment(alignment);
                self
            }

            pub fn set_cross_axis_alignment(&mut self, alignment: FlexAlign) -> &mut Self {
                self.flex.cross = alignment;
                self.apply_flex()
            }

            fn apply_flex(&mut self) -> &mut Self {
                let flex = self.flex;
                self.base
                    .apply("set_flex", |tk, handle| tk.set_flex(handle, flex));
                self
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

stack_view!(
    /// Lays its children out left to right.
    HStack,
    FlexConfig::row()
);

stack_view!(
    /// Lays its children out top to bottom.
    VStack,
    FlexConfig::column()
);

pub fn hstack() -> HStack {
    HStack::new()
}

pub fn vstack() -> VStack {
    VStack::new()
}

/// Build an [`HStack`] from child views, moved in argument order.
///
/// ```ignore
/// hstack![text("Left"), button("Right")]
/// ```
#[macro_export]
macro_rules! hstack {
    ($($child:expr),* $(,)?) => {
        {
            let mut s = $crate::widgets::HStack::new();
            $(
                s.add_child($child);
            )*
            s
        }
    };
}

/// Build a [`VStack`] from child views, moved in argument order.
#[macro_export]
macro_rules! vstack {
    ($($child:expr),* $(,)?) => {
        {
            let mut s = $crate::widgets::VStack::new();
            $(
                s.add_child($child);
            )*
            s
        }
    };
}
