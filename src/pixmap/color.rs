use std::fmt::{Display, Formatter, UpperHex};

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// Color data represented as red, green, blue and alpha channels each having a depth of 8 bits
///
/// Two colors are equal only if all four channels are equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color(0x00, 0x00, 0x00, 0xFF);
    /// Opaque white
    pub const WHITE: Color = Color(0xFF, 0xFF, 0xFF, 0xFF);

    /// Construct a fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b, 0xFF)
    }

    /// The same color with its alpha channel replaced
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    /// The alpha channel
    pub const fn alpha(&self) -> u8 {
        self.3
    }

    /// Blend this color over an opaque `background` and return the result as `0RGB` word
    pub fn blend_over(self, background: Color) -> u32 {
        let a = self.3 as u32;
        let mix = |fg: u8, bg: u8| (fg as u32 * a + bg as u32 * (255 - a)) / 255;
        mix(self.0, background.0) << 16 | mix(self.1, background.1) << 8 | mix(self.2, background.2)
    }
}

/// The canvas background
impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[u8; 4]> for Color {
    fn from(data: [u8; 4]) -> Self {
        Self(data[0], data[1], data[2], data[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(value: Color) -> Self {
        [value.0, value.1, value.2, value.3]
    }
}

/// Decodes `0xRRGGBBAA`
impl From<u32> for Color {
    fn from(src: u32) -> Self {
        src.to_be_bytes().into()
    }
}

/// Encodes as `0xRRGGBBAA`
impl From<Color> for u32 {
    fn from(value: Color) -> Self {
        u32::from_be_bytes(value.into())
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(value: image::Rgba<u8>) -> Self {
        value.0.into()
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(value: Color) -> Self {
        image::Rgba(value.into())
    }
}

impl UpperHex for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // format each byte as hex string with at least two characters and leading zeroes
        f.write_fmt(format_args!(
            "{:02X}{:02X}{:02X}{:02X}",
            self.0, self.1, self.2, self.3
        ))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:X}", self)
    }
}

#[cfg(test)]
impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        u32::arbitrary(g).into()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::quickcheck;

    quickcheck! {
        fn test_u32_conversion(color: Color) -> bool {
            let c_enc: u32 = color.into();
            let c_dec: Color = Color::from(c_enc);
            c_dec == color
        }
    }

    #[test]
    fn test_default_is_opaque_white() {
        assert_eq!(Color::default(), Color(0xFF, 0xFF, 0xFF, 0xFF));
        assert_eq!(Color::rgb(1, 2, 3).alpha(), 0xFF);
    }

    #[test]
    fn test_equality_includes_alpha() {
        assert_ne!(Color::BLACK, Color::BLACK.with_alpha(0x80));
    }

    #[test]
    fn test_display() {
        assert_eq!(Color(0xAB, 0x01, 0x00, 0xFF).to_string(), "#AB0100FF");
    }

    #[test]
    fn test_blend_over() {
        assert_eq!(Color::BLACK.blend_over(Color::WHITE), 0x000000);
        assert_eq!(Color::BLACK.with_alpha(0).blend_over(Color::WHITE), 0xFFFFFF);
    }
}
