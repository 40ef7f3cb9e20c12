//! Easing curves for duration-based transitions.

/// Cubic Bézier timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Clone, Copy, Debug, PartialEq)]
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

    fn bezier(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn bezier_slope(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Solves x(t) = `fraction` for t, then returns y(t).
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        // Newton first; bisection if the slope flattens out.
        let mut t = fraction;
        for _ in 0..8 {
            let error = Self::bezier(t, self.x1, self.x2) - fraction;
            if error.abs() < 1e-5 {
                return Self::bezier(t, self.y1, self.y2);
            }
            let slope = Self::bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t = (t - error / slope).clamp(0.0, 1.0);
        }

        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..32 {
            let x = Self::bezier(t, self.x1, self.x2);
            if (x - fraction).abs() < 1e-5 {
                break;
            }
            if x < fraction {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        Self::bezier(t, self.y1, self.y2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    Smoothstep,
    Cubic(CubicBezier),
}

impl Easing {
    /// Material "standard" curve.
    pub const FAST_OUT_SLOW_IN: Easing = Easing::Cubic(CubicBezier::new(0.4, 0.0, 0.2, 1.0));
    pub const LINEAR_OUT_SLOW_IN: Easing = Easing::Cubic(CubicBezier::new(0.0, 0.0, 0.2, 1.0));
    pub const EASE_OUT: Easing = Easing::Cubic(CubicBezier::new(0.0, 0.0, 0.58, 1.0));

    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Smoothstep => t * t * (3.0 - 2.0 * t),
            Easing::Cubic(curve) => curve.transform(t),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::FAST_OUT_SLOW_IN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::Smoothstep,
            Easing::FAST_OUT_SLOW_IN,
            Easing::EASE_OUT,
        ] {
            assert_eq!(easing.transform(0.0), 0.0);
            assert_eq!(easing.transform(1.0), 1.0);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        let easing = Easing::FAST_OUT_SLOW_IN;
        let mut previous = 0.0;
        for step in 1..=50 {
            let value = easing.transform(step as f32 / 50.0);
            assert!(value + 1e-4 >= previous, "dip at step {step}");
            previous = value;
        }
    }

    #[test]
    fn fast_out_slow_in_is_ahead_at_midpoint() {
        assert!(Easing::FAST_OUT_SLOW_IN.transform(0.5) > 0.5);
    }
}
