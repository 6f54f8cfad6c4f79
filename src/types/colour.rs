//! RGBA colour value.

use std::fmt;

use serde::{Serialize, Serializer};

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a colour from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Blend towards `other` in linear RGB (0.0 = self, 1.0 = other).
    pub fn mix(self, other: Colour, factor: f32) -> Colour {
        use palette::{LinSrgb, Mix, Srgb};

        let factor = factor.clamp(0.0, 1.0);
        let from: LinSrgb<f32> = Srgb::new(self.r, self.g, self.b)
            .into_format::<f32>()
            .into_linear();
        let to: LinSrgb<f32> = Srgb::new(other.r, other.g, other.b)
            .into_format::<f32>()
            .into_linear();

        let mixed: Srgb<f32> = Srgb::from_linear(from.mix(to, factor));
        let mixed: Srgb<u8> = mixed.into_format();
        let alpha = self.a as f32 + (other.a as f32 - self.a as f32) * factor;

        Colour::new(mixed.red, mixed.green, mixed.blue, alpha.round() as u8)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_argb() {
        let c = Colour::from_argb(0xFFDB8E7B);
        assert_eq!(c, Colour::rgb(0xDB, 0x8E, 0x7B));

        let c = Colour::from_argb(0x80FF0000);
        assert_eq!(c, Colour::new(255, 0, 0, 128));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Colour::rgb(255, 0, 0)), "#FF0000");
        assert_eq!(format!("{}", Colour::new(255, 0, 0, 128)), "#FF000080");
    }

    #[test]
    fn test_mix_endpoints() {
        let a = Colour::from_argb(0xFFC44535);
        let b = Colour::from_argb(0xFF245496);

        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(a, 0.5), a);
    }

    #[test]
    fn test_serializes_as_hex() {
        let json = serde_json::to_string(&Colour::rgb(0x10, 0x10, 0x10)).unwrap();
        assert_eq!(json, "\"#101010\"");
    }
}
