//! Easing curves for camera tweens.

use glam::Vec3;

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    /// Cubic ease-in-out (the curve GSAP calls `power2.inOut`).
    #[default]
    Power2InOut,
    SmoothStep,
}

impl Ease {
    /// Map `t` in [0, 1] through the curve. Input is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Interpolate between two points with an easing curve.
pub fn tween(from: Vec3, to: Vec3, t: f32, ease: Ease) -> Vec3 {
    from.lerp(to, ease.apply(t))
}
