//! Damped harmonic oscillator with unit mass, solved in closed form.
//!
//! Time is in seconds and velocity in units/second inside this module;
//! [`Animatable`](crate::Animatable) converts from its px/ms convention.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped (no overshoot); below 1.0 bounces.
    pub damping_ratio: f32,
    /// Spring constant in 1/s². Higher settles faster.
    pub stiffness: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_MEDIUM: f32 = 1500.0;

    pub const fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
        }
    }

    /// Displacement and velocity `t` seconds after starting at
    /// (`displacement`, `velocity`) relative to the rest position.
    pub fn evaluate(&self, displacement: f32, velocity: f32, t: f32) -> (f32, f32) {
        let zeta = f64::from(self.damping_ratio.max(0.0));
        let omega = f64::from(self.stiffness.max(f32::MIN_POSITIVE)).sqrt();
        let x0 = f64::from(displacement);
        let v0 = f64::from(velocity);
        let t = f64::from(t);

        let (x, v) = if (zeta - 1.0).abs() < 1e-6 {
            let r = -omega;
            let c1 = x0;
            let c2 = v0 - r * x0;
            let decay = (r * t).exp();
            ((c1 + c2 * t) * decay, (c2 + r * (c1 + c2 * t)) * decay)
        } else if zeta > 1.0 {
            let root = omega * (zeta * zeta - 1.0).sqrt();
            let r1 = -zeta * omega - root;
            let r2 = -zeta * omega + root;
            let c2 = (v0 - r1 * x0) / (r2 - r1);
            let c1 = x0 - c2;
            let (e1, e2) = ((r1 * t).exp(), (r2 * t).exp());
            (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
        } else {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            let decay_rate = zeta * omega;
            let c1 = x0;
            let c2 = (v0 + decay_rate * x0) / damped;
            let decay = (-decay_rate * t).exp();
            let (sin, cos) = (damped * t).sin_cos();
            (
                decay * (c1 * cos + c2 * sin),
                decay * ((c2 * damped - decay_rate * c1) * cos - (c1 * damped + decay_rate * c2) * sin),
            )
        };
        (x as f32, v as f32)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCY, Self::STIFFNESS_MEDIUM_LOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_initial_conditions() {
        for spec in [
            SpringSpec::default(),
            SpringSpec::new(0.5, 300.0),
            SpringSpec::new(2.0, 300.0),
        ] {
            let (x, v) = spec.evaluate(100.0, -20.0, 0.0);
            assert!((x - 100.0).abs() < 1e-3, "{spec:?}: x={x}");
            assert!((v + 20.0).abs() < 1e-2, "{spec:?}: v={v}");
        }
    }

    #[test]
    fn critically_damped_does_not_overshoot() {
        let spec = SpringSpec::default();
        for step in 0..200 {
            let (x, _) = spec.evaluate(100.0, 0.0, step as f32 * 0.005);
            assert!(x >= -1e-3, "overshoot at step {step}: {x}");
        }
    }

    #[test]
    fn decays_toward_rest() {
        let (x, v) = SpringSpec::new(0.75, 400.0).evaluate(100.0, 0.0, 2.0);
        assert!(x.abs() < 0.01 && v.abs() < 0.1, "x={x}, v={v}");
    }
}
