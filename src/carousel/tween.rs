//! Fixed-step tween used to drive the scroll offset.

use std::time::Duration;

/// Easing curve applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Cubic ease-out: fast start, gentle landing.
    #[default]
    Power2Out,
    /// Hermite smoothstep, symmetric in and out.
    SmoothStep,
}

impl Ease {
    /// Maps linear progress `t` in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A single from→to transition sampled one frame at a time.
#[derive(Debug, Clone)]
pub(crate) struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    ease: Ease,
}

impl Tween {
    pub(crate) fn new(from: f64, to: f64, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            duration,
            ease,
        }
    }

    /// Advances by `dt` and returns the new value.
    pub(crate) fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.sample()
    }

    pub(crate) fn sample(&self) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.ease.apply(t)
    }

    pub(crate) fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_endpoints() {
        for ease in [Ease::Linear, Ease::Power2Out, Ease::SmoothStep] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_power2_out_front_loaded() {
        assert!(Ease::Power2Out.apply(0.5) > 0.5);
        assert!((Ease::SmoothStep.apply(0.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tween_reaches_target_exactly() {
        let mut tween = Tween::new(10.0, 20.0, Duration::from_millis(100), Ease::Power2Out);
        let mut last = 10.0;
        while !tween.is_done() {
            let v = tween.advance(Duration::from_millis(16));
            assert!(v >= last);
            last = v;
        }
        assert_eq!(last, 20.0);
        assert_eq!(tween.sample(), 20.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_done() {
        let tween = Tween::new(0.0, 5.0, Duration::ZERO, Ease::Linear);
        assert!(tween.is_done());
        assert_eq!(tween.sample(), 5.0);
    }
}
