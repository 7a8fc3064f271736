pub mod button;
pub mod color;
pub mod stack;
pub mod text;

pub use button::{button, Button};
pub use color::{Color, Palette};
pub use stack::{hstack, vstack, HStack, VStack};
pub use text::{text, Text};
