/// A 24-bit RGB colour as understood by the toolkit's style setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// The toolkit's named material palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Red,
    Pink,
    Purple,
    DeepPurple,
    Indigo,
    Blue,
    LightBlue,
    Cyan,
    Teal,
    Green,
    LightGreen,
    Lime,
    Yellow,
    Amber,
    Orange,
    DeepOrange,
    Brown,
    BlueGrey,
    Grey,
}

impl Palette {
    /// The palette's main (500) shade.
    pub const fn main(self) -> Color {
        let hex = match self {
            Palette::Red => 0xF44336,
            Palette::Pink => 0xE91E63,
            Palette::Purple => 0x9C27B0,
            Palette::DeepPurple => 0x673AB7,
            Palette::Indigo => 0x3F51B5,
            Palette::Blue => 0x2196F3,
            Palette::LightBlue => 0x03A9F4,
            Palette::Cyan => 0x00BCD4,
            Palette::Teal => 0x009688,
            Palette::Green => 0x4CAF50,
            Palette::LightGreen => 0x8BC34A,
            Palette::Lime => 0xCDDC39,
            Palette::Yellow => 0xFFEB3B,
            Palette::Amber => 0xFFC107,
            Palette::Orange => 0xFF9800,
            Palette::DeepOrange => 0xFF5722,
            Palette::Brown => 0x795548,
            Palette::BlueGrey => 0x607D8B,
            Palette::Grey => 0x9E9E9E,
        };
        Color::from_hex(hex)
    }
}

impl From<Palette> for Color {
    fn from(palette: Palette) -> Self {
        palette.main()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x2196F3);
        assert_eq!(c, Color::rgb(0x21, 0x96, 0xF3));
        assert_eq!(c.to_hex(), 0x2196F3);
    }

    #[test]
    fn test_palette_main() {
        assert_eq!(Palette::Blue.main(), Color::from_hex(0x2196F3));
        assert_eq!(Color::from(Palette::Green), Color::from_hex(0x4CAF50));
        assert_ne!(Palette::Green.main(), Palette::Blue.main());
    }
}
