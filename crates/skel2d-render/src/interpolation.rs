/// Easing curves used to animate effect parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpolation {
    Linear,
    /// Ease in and out with the given power.
    Pow(i32),
    /// Ease out with the given power.
    PowOut(i32),
}

impl Interpolation {
    /// Map `a` in `0..=1` through the curve.
    pub fn apply(self, a: f32) -> f32 {
        match self {
            Interpolation::Linear => a,
            Interpolation::Pow(power) => {
                if a <= 0.5 {
                    (a * 2.0).powi(power) / 2.0
                } else {
                    let sign = if power % 2 == 0 { -2.0 } else { 2.0 };
                    ((a - 1.0) * 2.0).powi(power) / sign + 1.0
                }
            }
            Interpolation::PowOut(power) => {
                let sign = if power % 2 == 0 { -1.0 } else { 1.0 };
                (a - 1.0).powi(power) * sign + 1.0
            }
        }
    }

    pub fn interpolate(self, start: f32, end: f32, a: f32) -> f32 {
        start + (end - start) * self.apply(a)
    }
}

/// Triangle wave over `time`: rises 0 -> 1 during the first second of every
/// two, then falls back to 0.
pub fn ping_pong(time: f32) -> f32 {
    let percent = time.rem_euclid(2.0);
    if percent > 1.0 { 2.0 - percent } else { percent }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_endpoints() {
        for curve in [
            Interpolation::Linear,
            Interpolation::Pow(2),
            Interpolation::Pow(3),
            Interpolation::PowOut(2),
            Interpolation::PowOut(3),
        ] {
            assert!(approx(curve.apply(0.0), 0.0), "{curve:?} at 0");
            assert!(approx(curve.apply(1.0), 1.0), "{curve:?} at 1");
        }
    }

    #[test]
    fn test_pow_is_symmetric_at_midpoint() {
        assert!(approx(Interpolation::Pow(2).apply(0.5), 0.5));
        assert!(approx(Interpolation::Pow(2).apply(0.25), 0.125));
    }

    #[test]
    fn test_pow_out_eases_out() {
        // 1 - (0.5 - 1)^2 = 0.75
        assert!(approx(Interpolation::PowOut(2).apply(0.5), 0.75));
    }

    #[test]
    fn test_interpolate_range() {
        assert!(approx(Interpolation::Linear.interpolate(-60.0, 60.0, 0.5), 0.0));
        assert!(approx(Interpolation::Pow(2).interpolate(-60.0, 60.0, 1.0), 60.0));
    }

    #[test]
    fn test_ping_pong() {
        assert!(approx(ping_pong(0.0), 0.0));
        assert!(approx(ping_pong(0.5), 0.5));
        assert!(approx(ping_pong(1.5), 0.5));
        assert!(approx(ping_pong(2.25), 0.25));
        assert!(approx(ping_pong(-0.5), 0.5));
    }
}
