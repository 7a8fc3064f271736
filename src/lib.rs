//! Declarative views over an embedded UI toolkit.
//!
//! Every view owns exactly one native toolkit object and deletes it when
//! dropped. Views are configured with chainable modifiers and composed into
//! flex stacks, which move their children's native objects under their own:
//!
//! ```
//! use dui::prelude::*;
//!
//! let toolkit = HeadlessToolkit::default();
//! let mut app = App::new(toolkit);
//!
//! let root = vstack![
//!     text("Hello").width(200),
//!     button("Click me").bg_color(Palette::Blue),
//!     hstack![text("Left"), button("Right")],
//! ];
//! assert_eq!(root.len(), 3);
//!
//! app.mount(root);
//! app.tick();
//! ```

// Lets the derive macro name `::dui` from inside this crate too
extern crate self as dui;

pub mod app;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod object;
pub mod toolkit;
pub mod view;
pub mod widgets;

pub use app::{request_exit, App, AppConfig, UpdateCallback};
pub use dui_macros::View;
pub use error::{DuiError, Result, ToolkitError};
pub use view::{Modifiers, View, ViewBase};

pub mod prelude {
    pub use crate::layout::{content, pct, FlexAlign, FlexConfig, FlexFlow, Length};
    pub use crate::toolkit::{HeadlessToolkit, NodeHandle, Toolkit};
    pub use crate::view::{Modifiers, ViewBase};
    pub use crate::widgets::{
        button, hstack, text, vstack, Button, Color, HStack, Palette, Text, VStack,
    };
    pub use crate::{hstack, request_exit, vstack, App, AppConfig, View};
}
