//! Inertial momentum
//!
//! Friction-based decay of a fling velocity. The wheel keeps drifting after
//! the finger lifts and slows down until the velocity drops under a
//! threshold.

/// Configuration for momentum decay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumConfig {
    /// Fraction of velocity kept per 60Hz frame (0.0-1.0, lower = more friction)
    pub friction: f32,
    /// Velocity under which motion stops (pixels/second)
    pub velocity_threshold: f32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            friction: 0.95,
            velocity_threshold: 10.0,
        }
    }
}

/// A decaying velocity
#[derive(Clone, Copy, Debug)]
pub struct Momentum {
    config: MomentumConfig,
    velocity: f32,
}

impl Momentum {
    pub fn new(config: MomentumConfig, velocity: f32) -> Self {
        Self { config, velocity }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_stopped(&self) -> bool {
        self.velocity.abs() < self.config.velocity_threshold
    }

    /// Advance by `dt` seconds and return the distance travelled
    ///
    /// Friction is applied per 60Hz frame equivalent, so the decay does not
    /// depend on the host's refresh rate.
    pub fn step(&mut self, dt: f32) -> f32 {
        if self.is_stopped() {
            self.velocity = 0.0;
            return 0.0;
        }

        let distance = self.velocity * dt;
        self.velocity *= self.config.friction.clamp(0.0, 1.0).powf(dt * 60.0);
        if self.is_stopped() {
            self.velocity = 0.0;
        }
        distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_momentum_decelerates() {
        let mut momentum = Momentum::new(MomentumConfig::default(), 600.0);
        let first = momentum.step(1.0 / 60.0);
        let second = momentum.step(1.0 / 60.0);

        assert!(first > 0.0);
        assert!(second < first);
        assert!(momentum.velocity() < 600.0);
    }

    #[test]
    fn test_momentum_eventually_stops() {
        let mut momentum = Momentum::new(MomentumConfig::default(), -900.0);
        let mut travelled = 0.0;
        for _ in 0..600 {
            travelled += momentum.step(1.0 / 60.0);
        }

        assert!(momentum.is_stopped());
        assert_eq!(momentum.velocity(), 0.0);
        assert!(travelled < 0.0);
    }

    #[test]
    fn test_decay_is_refresh_rate_independent() {
        let mut at_60 = Momentum::new(MomentumConfig::default(), 500.0);
        let mut at_120 = Momentum::new(MomentumConfig::default(), 500.0);

        for _ in 0..30 {
            at_60.step(1.0 / 60.0);
        }
        for _ in 0..60 {
            at_120.step(1.0 / 120.0);
        }

        assert!((at_60.velocity() - at_120.velocity()).abs() < 0.5);
    }

    #[test]
    fn test_slow_fling_never_starts() {
        let mut momentum = Momentum::new(MomentumConfig::default(), 8.0);
        assert!(momentum.is_stopped());
        assert_eq!(momentum.step(1.0 / 60.0), 0.0);
        assert_eq!(momentum.velocity(), 0.0);
    }
}
