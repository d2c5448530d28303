use framewait_graphics::Color;

/// Trait for types that can be linearly interpolated.
///
/// `fraction` is not clamped here; [`crate::lerp_value`] and the helpers
/// built on it clamp progress before calling in.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self * (1.0 - fraction) + target * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        let fraction = fraction as f64;
        self * (1.0 - fraction) + target * fraction
    }
}

impl Lerp for Color {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Color::lerp(self, target, fraction)
    }
}

impl<T: Lerp> Lerp for [T; 2] {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        [
            self[0].lerp(&target[0], fraction),
            self[1].lerp(&target[1], fraction),
        ]
    }
}

impl<T: Lerp> Lerp for [T; 3] {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        [
            self[0].lerp(&target[0], fraction),
            self[1].lerp(&target[1], fraction),
            self[2].lerp(&target[2], fraction),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_endpoints_are_exact() {
        assert_eq!(0.3f32.lerp(&7.9, 0.0), 0.3);
        assert_eq!(0.3f32.lerp(&7.9, 1.0), 7.9);
        assert_eq!((-2.5f64).lerp(&11.1, 1.0), 11.1);
    }

    #[test]
    fn scalar_is_unclamped() {
        assert_eq!(0.0f32.lerp(&10.0, 1.5), 15.0);
        assert_eq!(0.0f32.lerp(&10.0, -0.5), -5.0);
    }

    #[test]
    fn vectors_interpolate_per_component() {
        let from = [0.0f32, 10.0, -4.0];
        let to = [4.0f32, 20.0, 4.0];
        assert_eq!(from.lerp(&to, 0.25), [1.0, 12.5, -2.0]);
    }

    #[test]
    fn color_uses_component_lerp() {
        let mid = Lerp::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert_eq!(mid, Color(0.5, 0.5, 0.5, 1.0));
    }
}
