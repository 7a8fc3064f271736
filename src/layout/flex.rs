/// Direction children flow in a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlexFlow {
    Row,
    Column,
    RowWrap,
    ColumnWrap,
    RowReverse,
    ColumnReverse,
}

impl FlexFlow {
    /// Whether the main axis is horizontal.
    pub fn is_row(self) -> bool {
        matches!(self, FlexFlow::Row | FlexFlow::RowWrap | FlexFlow::RowReverse)
    }

    pub fn wraps(self) -> bool {
        matches!(self, FlexFlow::RowWrap | FlexFlow::ColumnWrap)
    }
}

/// Placement of items along an axis of a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlexAlign {
    Start,
    End,
    Center,
    SpaceEvenly,
    SpaceAround,
    SpaceBetween,
}

/// Flex layout configuration handed to the toolkit.
///
/// `main` places items along the flow direction, `cross` places each item
/// inside its track, `track` places the tracks themselves when wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlexConfig {
    pub flow: FlexFlow,
    pub main: FlexAlign,
    pub cross: FlexAlign,
    pub track: FlexAlign,
}

impl FlexConfig {
    pub const fn new(flow: FlexFlow) -> Self {
        Self {
            flow,
            main: FlexAlign::Start,
            cross: FlexAlign::Center,
            track: FlexAlign::Center,
        }
    }

    /// Horizontal flow: start-aligned on the main axis, centered across.
    pub const fn row() -> Self {
        Self::new(FlexFlow::Row)
    }

    /// Vertical flow: start-aligned on the main axis, centered across.
    pub const fn column() -> Self {
        Self::new(FlexFlow::Column)
    }

    pub fn with_main(mut self, align: FlexAlign) -> Self {
        self.main = align;
        self
    }

    pub fn with_cross(mut self, align: FlexAlign) -> Self {
        self.cross = align;
        self
    }

    pub fn with_track(mut self, align: FlexAlign) -> Self {
        self.track = align;
        self
    }
}
