//! Heading smoothing for the cursor-following ship.

use glam::Vec2;

use crate::extensions::easing::shortest_angle_delta;

/// Rotates toward the direction of travel, a fixed fraction per sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingFollower {
    degrees: f32,
    smoothing: f32,
    min_speed: f32,
    last: Option<Vec2>,
}

impl HeadingFollower {
    pub const DEFAULT_SMOOTHING: f32 = 0.12;
    pub const DEFAULT_MIN_SPEED: f32 = 0.5;

    pub fn new(smoothing: f32, min_speed: f32) -> Self {
        Self {
            degrees: 0.0,
            smoothing: smoothing.clamp(0.0, 1.0),
            min_speed,
            last: None,
        }
    }

    /// Current heading in degrees. 0 points up; the value is not wrapped.
    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    pub fn radians(&self) -> f32 {
        self.degrees.to_radians()
    }

    /// Feed an instantaneous velocity. Returns the rotation applied this step.
    /// Below the speed threshold the heading holds.
    pub fn steer(&mut self, velocity: Vec2) -> f32 {
        if !velocity.is_finite() || velocity.length() <= self.min_speed {
            return 0.0;
        }
        let target = velocity.y.atan2(velocity.x).to_degrees() + 90.0;
        let step = shortest_angle_delta(self.degrees, target) * self.smoothing;
        self.degrees += step;
        step
    }

    /// Feed a new pointer position; the velocity is the delta from the previous one.
    pub fn follow(&mut self, position: Vec2) -> f32 {
        let step = match self.last {
            Some(prev) => self.steer(position - prev),
            None => 0.0,
        };
        self.last = Some(position);
        step
    }
}

impl Default for HeadingFollower {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SMOOTHING, Self::DEFAULT_MIN_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn moving_right_turns_toward_90() {
        let mut h = HeadingFollower::default();
        for _ in 0..200 {
            h.steer(Vec2::new(5.0, 0.0));
        }
        assert_abs_diff_eq!(h.degrees(), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn slow_motion_holds_heading() {
        let mut h = HeadingFollower::default();
        assert_eq!(h.steer(Vec2::new(0.3, 0.3)), 0.0);
        assert_eq!(h.degrees(), 0.0);
    }

    #[test]
    fn first_sample_only_primes() {
        let mut h = HeadingFollower::default();
        assert_eq!(h.follow(Vec2::new(100.0, 100.0)), 0.0);
        assert!(h.follow(Vec2::new(110.0, 100.0)) > 0.0);
    }

    #[test]
    fn takes_short_way_round() {
        let mut h = HeadingFollower::new(1.0, 0.5);
        // Heading up-left (-45 => 315 equivalent), then target 10 degrees.
        h.steer(Vec2::new(-1.0, -1.0));
        assert_abs_diff_eq!(h.degrees(), -45.0, epsilon = 1e-3);
        let step = h.steer(Vec2::new(10f32.to_radians().sin(), -10f32.to_radians().cos()));
        assert_abs_diff_eq!(step, 55.0, epsilon = 1e-2);
    }

    proptest! {
        #[test]
        fn single_step_never_exceeds_half_turn(
            start in -2000.0f32..2000.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            smoothing in 0.0f32..=1.0,
        ) {
            let mut h = HeadingFollower::new(smoothing, 0.5);
            h.degrees = start;
            let step = h.steer(Vec2::new(vx, vy));
            prop_assert!(step.abs() <= 180.0 + 1e-3);
        }
    }
}
