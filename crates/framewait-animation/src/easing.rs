//! Easing curves applied to interpolation progress.

/// Cubic bezier timing curve anchored at `(0, 0)` and `(1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Maps a linear fraction to the curve's output.
    ///
    /// Fractions outside `[0, 1]` are clamped to the endpoints.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        let x = Polynomial::new(self.x1, self.x2);
        let y = Polynomial::new(self.y1, self.y2);
        y.sample(x.solve(fraction))
    }
}

/// Cubic `((a * t + b) * t + c) * t` for one bezier axis.
#[derive(Clone, Copy)]
struct Polynomial {
    a: f32,
    b: f32,
    c: f32,
}

impl Polynomial {
    fn new(p1: f32, p2: f32) -> Self {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        Self { a, b, c }
    }

    fn sample(&self, t: f32) -> f32 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    fn derivative(&self, t: f32) -> f32 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }

    /// Finds `t` with `sample(t) == x`: Newton first, bisection when the
    /// slope is too flat for Newton to converge.
    fn solve(&self, x: f32) -> f32 {
        const EPSILON: f32 = 1e-6;

        let mut t = x;
        for _ in 0..8 {
            let error = self.sample(t) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = self.derivative(t);
            if slope.abs() < EPSILON {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..24 {
            let error = self.sample(t) - x;
            if error.abs() < EPSILON {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
        t
    }
}

/// Easing applied to interpolation progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Smoothstep polynomial `3t² - 2t³`.
    SmoothStep,
    Bezier(CubicBezier),
}

impl Easing {
    pub const EASE_IN: CubicBezier = CubicBezier::new(0.42, 0.0, 1.0, 1.0);
    pub const EASE_OUT: CubicBezier = CubicBezier::new(0.0, 0.0, 0.58, 1.0);
    pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.42, 0.0, 0.58, 1.0);

    /// Applies the easing to a linear progress fraction.
    ///
    /// `Linear` passes the fraction through untouched (including values
    /// outside `[0, 1]`); the curved variants clamp.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => Self::EASE_IN.transform(fraction),
            Easing::EaseOut => Self::EASE_OUT.transform(fraction),
            Easing::EaseInOut => Self::EASE_IN_OUT.transform(fraction),
            Easing::SmoothStep => {
                let t = fraction.clamp(0.0, 1.0);
                t * t * (3.0 - 2.0 * t)
            }
            Easing::Bezier(curve) => curve.transform(fraction),
        }
    }
}

#[cfg(test)]
#[path = "tests/easing_tests.rs"]
mod tests;
