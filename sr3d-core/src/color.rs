/// Packed 32-bit colors and alpha compositing
///
/// Channel layout, lowest byte first: R, G, B, A (`0xAABBGGRR`).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);

    /// The all-zero word. Besides meaning transparent black, a mesh uses it
    /// to mark a draw feature (lines or points) as switched off.
    pub const NONE: Color = Color(0);

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color((a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32)
    }

    /// Pack normalized channels. Values are scaled by 255 and truncated;
    /// anything outside 0.0..=1.0 saturates.
    pub fn from_rgba_f64(r: f64, g: f64, b: f64, a: f64) -> Self {
        let c = |v: f64| (v * 255.0) as u8;
        Self::from_rgba(c(r), c(g), c(b), c(a))
    }

    /// Convert HSV (hue in degrees, the rest normalized) to a packed color.
    pub fn from_hsv(h: f64, s: f64, v: f64, a: f64) -> Self {
        if s <= 0.0 {
            return Self::from_rgba_f64(v, v, v, a);
        }

        let hh = h.rem_euclid(360.0) / 60.0;
        let sector = hh.floor();
        let f = hh - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector as u32 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Self::from_rgba_f64(r, g, b, a)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a() == 0xFF
    }

    /// True for the zero word (see [`Color::NONE`]).
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Composite `src` over `self`.
    ///
    /// The alpha of `self` is ignored (the background is treated as opaque)
    /// and the result is always opaque.
    pub fn blend(self, src: Color) -> Color {
        let sa = src.a() as u32;
        let da = 255 - sa;
        let mix = |d: u8, s: u8| ((d as u32 * da + s as u32 * sa) / 255).min(255) as u8;

        Color::from_rgba(
            mix(self.r(), src.r()),
            mix(self.g(), src.g()),
            mix(self.b(), src.b()),
            255,
        )
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_order() {
        let c = Color::from_rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(c.0, 0x4433_2211);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn test_from_rgba_f64() {
        assert_eq!(Color::from_rgba_f64(1.0, 1.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(Color::from_rgba_f64(0.0, 0.0, 0.0, 1.0), Color::BLACK);
        assert_eq!(Color::from_rgba_f64(0.0, 0.0, 0.0, 0.0), Color::NONE);
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0, 1.0), Color::from_rgba(255, 0, 0, 255));
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0, 1.0), Color::from_rgba(0, 255, 0, 255));
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0, 1.0), Color::from_rgba(0, 0, 255, 255));
        // Hue wraps
        assert_eq!(Color::from_hsv(360.0, 1.0, 1.0, 1.0), Color::from_rgba(255, 0, 0, 255));
    }

    #[test]
    fn test_hsv_gray_when_unsaturated() {
        let c = Color::from_hsv(200.0, 0.0, 0.5, 1.0);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (127, 127, 127, 255));
    }

    #[test]
    fn test_hsv_secondaries() {
        assert_eq!(Color::from_hsv(60.0, 1.0, 1.0, 1.0), Color::from_rgba(255, 255, 0, 255));
        assert_eq!(Color::from_hsv(180.0, 1.0, 1.0, 1.0), Color::from_rgba(0, 255, 255, 255));
        assert_eq!(Color::from_hsv(300.0, 1.0, 1.0, 1.0), Color::from_rgba(255, 0, 255, 255));
    }

    #[test]
    fn test_blend_opaque_copies_source() {
        let src = Color::from_rgba(10, 200, 30, 255);
        for dst in [Color::NONE, Color::WHITE, Color::from_rgba(1, 2, 3, 4)] {
            assert_eq!(dst.blend(src), src);
        }
    }

    #[test]
    fn test_blend_transparent_keeps_destination() {
        let dst = Color::from_rgba(90, 45, 180, 17);
        let out = dst.blend(Color::from_rgba(255, 255, 255, 0));
        assert!((out.r() as i32 - 90).abs() <= 1);
        assert!((out.g() as i32 - 45).abs() <= 1);
        assert!((out.b() as i32 - 180).abs() <= 1);
        assert_eq!(out.a(), 255);
    }

    #[test]
    fn test_blend_half() {
        let out = Color::BLACK.blend(Color::from_rgba(255, 0, 0, 128));
        assert_eq!(out, Color::from_rgba(128, 0, 0, 255));
    }
}
