use std::fmt;

/// Straight-alpha sRGB color with byte channels.
///
/// This is what every accepted CSS color resolves to. Renderers convert to
/// premultiplied form themselves.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Builds a color from straight `f64` components in `[0, 1]`.
    ///
    /// Components are clamped, then rounded to the nearest byte.
    #[inline]
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[inline]
pub(crate) fn unit_to_u8(v: f64) -> u8 {
    // NaN clamps to NaN; `as` then saturates it to 0.
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgba::opaque(255, 0, 128).to_hex(), "#ff0080");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn from_unit_rounds_and_clamps() {
        assert_eq!(Rgba::from_unit(0.5, 1.5, -1.0, 1.0), Rgba::opaque(128, 255, 0));
        assert_eq!(Rgba::from_unit(f64::NAN, 0.0, 0.0, 0.0), Rgba::TRANSPARENT);
    }
}
