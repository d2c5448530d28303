//! Linear RGBA color representation.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self(r, g, b, 1.0)
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self(r, g, b, a)
    }

    pub const fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    pub fn r(&self) -> f32 {
        self.0
    }

    pub fn g(&self) -> f32 {
        self.1
    }

    pub fn b(&self) -> f32 {
        self.2
    }

    pub fn a(&self) -> f32 {
        self.3
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self(self.0, self.1, self.2, alpha)
    }

    /// Component-wise linear interpolation towards `target`.
    ///
    /// `fraction` is not clamped, so values outside `[0, 1]` extrapolate.
    /// Fractions of exactly `0.0` and `1.0` return the endpoints unchanged.
    pub fn lerp(&self, target: &Color, fraction: f32) -> Self {
        let mix = |from: f32, to: f32| from * (1.0 - fraction) + to * fraction;
        Self(
            mix(self.0, target.0),
            mix(self.1, target.1),
            mix(self.2, target.2),
            mix(self.3, target.3),
        )
    }

    /// Returns the color with every component clamped to `[0, 1]`.
    pub fn clamped(&self) -> Self {
        Self(
            self.0.clamp(0.0, 1.0),
            self.1.clamp(0.0, 1.0),
            self.2.clamp(0.0, 1.0),
            self.3.clamp(0.0, 1.0),
        )
    }

    /// Converts to 8-bit RGBA, clamping out-of-range components.
    pub fn to_rgba_u8(&self) -> [u8; 4] {
        let c = self.clamped();
        let to_u8 = |v: f32| (v * 255.0).round() as u8;
        [to_u8(c.0), to_u8(c.1), to_u8(c.2), to_u8(c.3)]
    }

    // Common color constants
    pub const BLACK: Color = Color(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color(0.0, 0.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}
