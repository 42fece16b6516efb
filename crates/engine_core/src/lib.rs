//! Core engine types for Planet Conquest.
//!
//! This crate provides the presentation-side plumbing shared by the front end:
//! - Frame timing with a fixed-step accumulator
//! - Timed phase sequences for cinematics
//! - Easing curves for camera tweens

pub mod easing;
pub mod sequence;
pub mod time;

pub use easing::*;
pub use sequence::*;
pub use time::*;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
