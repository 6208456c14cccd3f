//! Scroll surfaces
//!
//! A surface is whatever actually scrolls: a native scroll view, a DOM
//! element, or the built-in [`PhysicsSurface`]. Wheels only talk to the
//! [`ScrollSurface`] trait, so the interaction logic stays independent of the
//! toolkit.
//!
//! # Features
//!
//! - **Drag**: user deltas move the content immediately, clamped to bounds
//! - **Momentum**: a fling keeps drifting with friction until it stops
//! - **Smooth scroll**: programmatic targets are reached with a spring that
//!   lands exactly on the requested offset

use taqvim_animation::{Momentum, MomentumConfig, Spring, SpringConfig};

// ============================================================================
// Surface Contract
// ============================================================================

/// How a programmatic scroll reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump straight to the target
    Instant,
    /// Animate to the target
    #[default]
    Smooth,
}

/// Why the offset moved during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// Inertial drift after the user released a fling
    Momentum,
    /// A `scroll_to` animation in progress
    Programmatic,
}

/// A vertically scrolling viewport
pub trait ScrollSurface {
    /// Current offset, 0 at the first item
    fn offset(&self) -> f32;

    /// Largest reachable offset
    fn max_offset(&self) -> f32;

    /// Resize the scroll range (content changed)
    fn set_max_offset(&mut self, max_offset: f32);

    /// Move by a user drag delta, cancelling any running motion
    fn apply_scroll_delta(&mut self, delta: f32);

    /// Release the gesture with `velocity` (pixels per second)
    fn fling(&mut self, velocity: f32);

    /// Programmatic scroll to an offset
    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior);

    /// Advance running motion by `dt` seconds
    ///
    /// Returns the source of the movement when the offset changed.
    fn tick(&mut self, dt: f32) -> Option<ScrollSource>;

    /// Whether momentum or an animation is still running
    fn is_animating(&self) -> bool;
}

// ============================================================================
// Physics Surface
// ============================================================================

/// Configuration for [`PhysicsSurface`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SurfaceConfig {
    /// Friction applied to flings
    pub momentum: MomentumConfig,
    /// Spring used for smooth programmatic scrolls
    pub spring: SpringConfig,
}

#[derive(Debug, Clone, Copy)]
enum Motion {
    Rest,
    Drifting(Momentum),
    Animating(Spring),
}

/// Built-in surface with momentum and spring physics
#[derive(Debug, Clone)]
pub struct PhysicsSurface {
    offset: f32,
    max_offset: f32,
    motion: Motion,
    config: SurfaceConfig,
}

impl Default for PhysicsSurface {
    fn default() -> Self {
        Self::new(SurfaceConfig::default())
    }
}

impl PhysicsSurface {
    pub fn new(config: SurfaceConfig) -> Self {
        Self {
            offset: 0.0,
            max_offset: 0.0,
            motion: Motion::Rest,
            config,
        }
    }

    fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(0.0, self.max_offset)
    }

    /// Target of the running animation, if any
    pub fn animation_target(&self) -> Option<f32> {
        match self.motion {
            Motion::Animating(spring) => Some(spring.target()),
            _ => None,
        }
    }

    /// Whether a fling is still drifting
    pub fn is_drifting(&self) -> bool {
        matches!(self.motion, Motion::Drifting(_))
    }

    fn current_velocity(&self) -> f32 {
        match self.motion {
            Motion::Rest => 0.0,
            Motion::Drifting(momentum) => momentum.velocity(),
            Motion::Animating(spring) => spring.velocity(),
        }
    }
}

impl ScrollSurface for PhysicsSurface {
    fn offset(&self) -> f32 {
        self.offset
    }

    fn max_offset(&self) -> f32 {
        self.max_offset
    }

    fn set_max_offset(&mut self, max_offset: f32) {
        self.max_offset = max_offset.max(0.0);
        self.offset = self.clamp(self.offset);
        if let Motion::Animating(ref mut spring) = self.motion {
            let target = spring.target().clamp(0.0, self.max_offset);
            spring.set_target(target);
        }
    }

    fn apply_scroll_delta(&mut self, delta: f32) {
        self.motion = Motion::Rest;
        self.offset = self.clamp(self.offset + delta);
    }

    fn fling(&mut self, velocity: f32) {
        let momentum = Momentum::new(self.config.momentum, velocity);
        self.motion = if momentum.is_stopped() {
            Motion::Rest
        } else {
            Motion::Drifting(momentum)
        };
    }

    fn scroll_to(&mut self, offset: f32, behavior: ScrollBehavior) {
        let target = self.clamp(offset);
        match behavior {
            ScrollBehavior::Instant => {
                self.offset = target;
                self.motion = Motion::Rest;
            }
            ScrollBehavior::Smooth => {
                let mut spring =
                    Spring::with_velocity(self.config.spring, self.offset, self.current_velocity());
                spring.set_target(target);
                if spring.is_settled() {
                    self.offset = target;
                    self.motion = Motion::Rest;
                } else {
                    self.motion = Motion::Animating(spring);
                }
            }
        }
    }

    fn tick(&mut self, dt: f32) -> Option<ScrollSource> {
        let before = self.offset;

        let source = match self.motion {
            Motion::Rest => return None,

            Motion::Drifting(ref mut momentum) => {
                let travelled = momentum.step(dt);
                let next = (before + travelled).clamp(0.0, self.max_offset);
                // Hitting an edge kills the remaining momentum
                if momentum.is_stopped() || next != before + travelled {
                    self.motion = Motion::Rest;
                }
                self.offset = next;
                ScrollSource::Momentum
            }

            Motion::Animating(ref mut spring) => {
                spring.step(dt);
                if spring.is_settled() {
                    self.offset = spring.target();
                    self.motion = Motion::Rest;
                } else {
                    self.offset = spring.value();
                }
                ScrollSource::Programmatic
            }
        };

        (self.offset != before).then_some(source)
    }

    fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::Rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(max_offset: f32) -> PhysicsSurface {
        let mut surface = PhysicsSurface::default();
        surface.set_max_offset(max_offset);
        surface
    }

    #[test]
    fn test_drag_is_clamped() {
        let mut surface = surface(400.0);
        surface.apply_scroll_delta(50.0);
        assert_eq!(surface.offset(), 50.0);

        surface.apply_scroll_delta(-500.0);
        assert_eq!(surface.offset(), 0.0);

        surface.apply_scroll_delta(900.0);
        assert_eq!(surface.offset(), 400.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_fling_drifts_then_stops() {
        let mut surface = surface(4000.0);
        surface.fling(800.0);
        assert!(surface.is_drifting());

        let mut moved = 0;
        for _ in 0..600 {
            if surface.tick(1.0 / 60.0) == Some(ScrollSource::Momentum) {
                moved += 1;
            }
        }

        assert!(moved > 10);
        assert!(surface.offset() > 0.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_fling_stops_at_edge() {
        let mut surface = surface(100.0);
        surface.fling(5000.0);
        for _ in 0..120 {
            surface.tick(1.0 / 60.0);
        }
        assert_eq!(surface.offset(), 100.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_smooth_scroll_lands_exactly() {
        let mut surface = surface(1000.0);
        surface.apply_scroll_delta(13.7);
        surface.scroll_to(120.0, ScrollBehavior::Smooth);
        assert_eq!(surface.animation_target(), Some(120.0));

        let mut sources = Vec::new();
        for _ in 0..240 {
            if let Some(source) = surface.tick(1.0 / 60.0) {
                sources.push(source);
            }
        }

        assert_eq!(surface.offset(), 120.0);
        assert!(!surface.is_animating());
        assert!(sources.iter().all(|s| *s == ScrollSource::Programmatic));
    }

    #[test]
    fn test_smooth_scroll_to_current_offset_is_immediate() {
        let mut surface = surface(1000.0);
        surface.scroll_to(80.0, ScrollBehavior::Instant);
        surface.scroll_to(80.0, ScrollBehavior::Smooth);
        assert!(!surface.is_animating());
        assert_eq!(surface.tick(1.0 / 60.0), None);
    }

    #[test]
    fn test_drag_interrupts_animation() {
        let mut surface = surface(1000.0);
        surface.scroll_to(500.0, ScrollBehavior::Smooth);
        surface.tick(1.0 / 60.0);
        surface.apply_scroll_delta(5.0);
        assert!(!surface.is_animating());
    }

    #[test]
    fn test_shrinking_range_clamps_offset() {
        let mut surface = surface(1200.0);
        surface.scroll_to(1200.0, ScrollBehavior::Instant);
        surface.set_max_offset(1120.0);
        assert_eq!(surface.offset(), 1120.0);
    }
}
