//! A single background star.

use glam::Vec2;

use crate::api::types::Viewport;
use crate::renderer::surface::{Color, Fill, GradientStop, Surface};
use crate::systems::rng::Rng;

/// Stars larger than this get a radial glow.
pub const GLOW_MIN_RADIUS: f32 = 1.2;
/// Stars larger than this get a four-point sparkle.
pub const SPARKLE_MIN_RADIUS: f32 = 1.8;
const GLOW_SCALE: f32 = 4.0;
const SPARKLE_SCALE: f32 = 5.0;
/// Stars respawn once this far below the bottom edge.
const WRAP_MARGIN: f32 = 2.0;

/// Which size/brightness distribution a star was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Population {
    Bright,
    Dim,
}

#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    /// Opacity before twinkle.
    pub base_opacity: f32,
    /// Opacity after the last `twinkle`, in [0, 1].
    pub opacity: f32,
    /// Downward drift per frame.
    pub fall_speed: f32,
    /// Twinkle angular speed, radians per frame.
    pub twinkle_speed: f32,
    pub phase: f32,
    pub population: Population,
}

impl Star {
    /// Random star somewhere inside `viewport`.
    pub fn spawn(rng: &mut Rng, viewport: Viewport, bright_fraction: f32) -> Self {
        let population = if rng.chance(bright_fraction) {
            Population::Bright
        } else {
            Population::Dim
        };
        let (radius, base_opacity) = match population {
            Population::Bright => (rng.range(1.0, 3.2), rng.range(0.55, 0.95)),
            Population::Dim => (rng.range(0.3, 1.5), rng.range(0.25, 0.70)),
        };
        Self {
            pos: Vec2::new(rng.range(0.0, viewport.width), rng.range(0.0, viewport.height)),
            radius,
            base_opacity,
            opacity: base_opacity,
            fall_speed: rng.range(0.002, 0.012),
            twinkle_speed: rng.range(0.004, 0.016),
            phase: rng.angle(),
            population,
        }
    }

    /// Recompute opacity for frame `tick`.
    pub fn twinkle(&mut self, tick: u64) {
        let wave = (tick as f64 * self.twinkle_speed as f64 + self.phase as f64).sin() as f32;
        self.opacity = (self.base_opacity * (wave * 0.35 + 0.65)).clamp(0.0, 1.0);
    }

    /// Drift down one frame. Returns true when the star wrapped to the top.
    pub fn fall(&mut self, rng: &mut Rng, viewport: Viewport) -> bool {
        self.pos.y += self.fall_speed;
        if self.pos.y > viewport.height + WRAP_MARGIN {
            self.pos.y = -WRAP_MARGIN;
            self.pos.x = rng.range(0.0, viewport.width);
            true
        } else {
            false
        }
    }

    pub fn render(&self, surface: &mut dyn Surface, color: Color) {
        let op = self.opacity;
        let glow = glow_radius(self.radius);
        if glow > 0.0 {
            surface.fill_circle(
                self.pos,
                glow,
                Fill::radial(
                    self.pos,
                    glow,
                    &[
                        GradientStop::new(0.0, color.with_alpha(op * 0.45)),
                        GradientStop::new(0.5, color.with_alpha(op * 0.1)),
                        GradientStop::new(1.0, color.with_alpha(0.0)),
                    ],
                ),
            );
        }

        surface.fill_circle(self.pos, self.radius, color.with_alpha(op).into());

        let arm = sparkle_arm(self.radius);
        if arm > 0.0 {
            let c = color.with_alpha(op * 0.35);
            surface.line(self.pos - Vec2::X * arm, self.pos + Vec2::X * arm, 0.5, c);
            surface.line(self.pos - Vec2::Y * arm, self.pos + Vec2::Y * arm, 0.5, c);
        }
    }
}

/// Glow radius for a star of `radius`; 0 when the star is too small to glow.
pub fn glow_radius(radius: f32) -> f32 {
    if radius > GLOW_MIN_RADIUS {
        radius * GLOW_SCALE
    } else {
        0.0
    }
}

/// Sparkle arm length for a star of `radius`; 0 when too small.
pub fn sparkle_arm(radius: f32) -> f32 {
    if radius > SPARKLE_MIN_RADIUS {
        radius * SPARKLE_SCALE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recorder::{DrawCommand, RecordingSurface};
    use proptest::prelude::*;
    use crate::systems::rng::Rng;

    fn star(radius: f32) -> Star {
        Star {
            pos: Vec2::new(50.0, 50.0),
            radius,
            base_opacity: 0.8,
            opacity: 0.8,
            fall_speed: 0.01,
            twinkle_speed: 0.01,
            phase: 0.0,
            population: Population::Bright,
        }
    }

    #[test]
    fn populations_respect_ranges() {
        let mut rng = Rng::new(9);
        let vp = Viewport::new(400.0, 300.0);
        for _ in 0..500 {
            let s = Star::spawn(&mut rng, vp, 0.15);
            match s.population {
                Population::Bright => {
                    assert!((1.0..3.2).contains(&s.radius));
                    assert!((0.55..0.95).contains(&s.base_opacity));
                }
                Population::Dim => {
                    assert!((0.3..1.5).contains(&s.radius));
                    assert!((0.25..0.70).contains(&s.base_opacity));
                }
            }
            assert!(s.pos.x >= 0.0 && s.pos.x < 400.0);
        }
    }

    #[test]
    fn wraps_below_bottom_edge() {
        let mut rng = Rng::new(1);
        let vp = Viewport::new(100.0, 100.0);
        let mut s = star(1.0);
        s.pos.y = 102.0;
        assert!(s.fall(&mut rng, vp));
        assert_eq!(s.pos.y, -2.0);
        assert!(!s.fall(&mut rng, vp));
    }

    #[test]
    fn small_star_is_a_single_disc() {
        let mut surface = RecordingSurface::new();
        star(1.0).render(&mut surface, Color::INK);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn large_star_has_glow_and_sparkle() {
        let mut surface = RecordingSurface::new();
        star(2.0).render(&mut surface, Color::INK);
        assert!(matches!(
            surface.commands()[0],
            DrawCommand::FillCircle { radius, fill: Fill::Radial { .. }, .. } if radius == 8.0
        ));
        assert_eq!(surface.lines().count(), 2);
    }

    proptest! {
        #[test]
        fn twinkle_keeps_opacity_in_unit_range(
            base in 0.0f32..=1.0,
            speed in 0.0f32..0.1,
            phase in 0.0f32..7.0,
            tick in 0u64..10_000_000,
        ) {
            let mut s = star(1.0);
            s.base_opacity = base;
            s.twinkle_speed = speed;
            s.phase = phase;
            s.twinkle(tick);
            prop_assert!((0.0..=1.0).contains(&s.opacity));
        }

        #[test]
        fn glow_is_monotonic_in_size(a in 0.0f32..10.0, b in 0.0f32..10.0) {
            let (small, large) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(glow_radius(small) <= glow_radius(large));
        }
    }
}
