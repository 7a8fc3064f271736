use crate::error::Result;
use crate::toolkit::ObjectClass;
use crate::view::ViewBase;
use crate::View;

/// A single-line label.
///
/// The toolkit owns the text: [`Text::text`] always reads it back from the
/// native label rather than from a cached copy.
#[derive(View)]
pub struct Text {
    base: ViewBase,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        let base = ViewBase::new(ObjectClass::Label, None);
        Self::with_base(base, content.into())
    }

    pub fn try_new(content: impl Into<String>) -> Result<Self> {
        let base = ViewBase::try_new(ObjectClass::Label, None)?;
        Ok(Self::with_base(base, content.into()))
    }

    fn with_base(base: ViewBase, content: String) -> Self {
        let text = Self { base };
        text.apply_text(&content);
        text
    }

    fn apply_text(&self, content: &str) {
        self.base
            .apply("set_text", |tk, handle| tk.set_text(handle, content));
    }

    /// Replace the label's text.
    pub fn set_text(&mut self, content: impl AsRef<str>) -> &mut Self {
        self.apply_text(content.as_ref());
        self
    }

    pub fn with_text(mut self, content: impl AsRef<str>) -> Self {
        self.set_text(content);
        self
    }

    /// The label's current text, as the toolkit reports it.
    pub fn text(&self) -> String {
        self.base
            .query(|tk, handle| tk.text(handle))
            .unwrap_or_default()
    }
}

/// Create a text view
///
/// ```ignore
/// vstack![text("Hello"), text("World").width(200)]
/// ```
pub fn text(content: impl Into<String>) -> Text {
    Text::new(content)
}
