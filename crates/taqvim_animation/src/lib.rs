//! Taqvim Animation System
//!
//! Physics used by the scroll wheels.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Momentum**: friction-based inertial decay after a fling
//! - **Interruptible**: springs keep their velocity when retargeted

pub mod momentum;
pub mod spring;

pub use momentum::{Momentum, MomentumConfig};
pub use spring::{Spring, SpringConfig};
