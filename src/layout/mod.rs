pub mod flex;

pub use flex::{FlexAlign, FlexConfig, FlexFlow};

/// A toolkit coordinate for width and height.
///
/// # Examples
/// ```
/// use dui::prelude::*;
///
/// // Exact size (most common)
/// assert_eq!(Length::from(200), Length::Px(200));
///
/// // Relative to the parent's content area
/// assert_eq!(pct(100), Length::Percent(100));
///
/// // Shrink-wrap the children
/// assert_eq!(content(), Length::Content);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Length {
    /// Absolute size in pixels.
    Px(i32),
    /// Percentage of the parent's size. Not clamped; the toolkit interprets it.
    Percent(i16),
    /// Size to fit the content.
    #[default]
    Content,
}

/// i32 converts to exact pixel sizing
impl From<i32> for Length {
    fn from(value: i32) -> Self {
        Length::Px(value)
    }
}

/// Create a length relative to the parent's size.
pub fn pct(value: i16) -> Length {
    Length::Percent(value)
}

/// Create a length that sizes to the content.
pub fn content() -> Length {
    Length::Content
}
