//! Easing curves and smoothing helpers shared by the phase machines and the
//! pointer follower. Pure math, no effect state.

use glam::Vec2;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Fast start, slow end. Used for galaxy reformation.
    CubicOut,
    /// Slow start and end. Approximates the CSS `ease` curve for fades.
    CubicInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` (clamped to [0, 1]).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// One step of exponential smoothing: move `current` a fixed fraction toward `target`.
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Vec2 variant of [`approach`].
#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, factor: f32) -> Vec2 {
    current + (target - current) * factor
}

/// Signed shortest rotation from `current` to `target`, in degrees, within [-180, 180).
#[inline]
pub fn shortest_angle_delta(current_deg: f32, target_deg: f32) -> f32 {
    (target_deg - current_deg + 540.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_endpoints() {
        assert_eq!(Easing::Linear.apply(0.0), 0.0);
        assert_eq!(Easing::Linear.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
        assert_eq!(Easing::default(), Easing::Linear);
    }

    #[test]
    fn cubic_out_front_loaded() {
        assert_eq!(Easing::CubicOut.apply(1.0), 1.0);
        assert!((Easing::CubicOut.apply(0.5) - 0.875).abs() < 1e-6);
        assert_eq!(Easing::CubicOut.apply(2.0), 1.0);
    }

    #[test]
    fn cubic_in_out_symmetric() {
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
        let a = Easing::CubicInOut.apply(0.2);
        let b = Easing::CubicInOut.apply(0.8);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }

    #[test]
    fn approach_moves_by_fraction() {
        assert!((approach(0.0, 100.0, 0.048) - 4.8).abs() < 1e-5);
        let v = approach_vec2(Vec2::ZERO, Vec2::new(10.0, -10.0), 0.5);
        assert_eq!(v, Vec2::new(5.0, -5.0));
    }

    #[test]
    fn shortest_delta_wraps() {
        assert!((shortest_angle_delta(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((shortest_angle_delta(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert!((shortest_angle_delta(0.0, 90.0) - 90.0).abs() < 1e-4);
        // Accumulated angles far outside [0, 360) still take the short way.
        assert!((shortest_angle_delta(-1070.0, 0.0) - (-10.0)).abs() < 1e-3);
    }
}
