//! Orbital solar system with mouse parallax, plus the slower elliptical
//! "orrery" variant driven by wall-clock time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::effect::{Effect, EffectContext};
use crate::api::types::Viewport;
use crate::core::error::FxError;
use crate::input::queue::InputQueue;
use crate::renderer::surface::{Color, Fill, GradientStop, Surface};
use crate::systems::orbit::{self, Orbit, OrbitStyle, OrbitingBody};

// ── Sun ──────────────────────────────────────────────────────────────

const SUN_GLOW_SCALE: f32 = 4.0;

fn sun_glow_stops() -> [GradientStop; 4] {
    [
        GradientStop::new(0.0, Color::rgba8(255, 255, 220, 1.0)),
        GradientStop::new(0.15, Color::rgba8(255, 240, 180, 0.9)),
        GradientStop::new(0.5, Color::rgba8(255, 220, 100, 0.2)),
        GradientStop::new(1.0, Color::rgba8(255, 200, 60, 0.0)),
    ]
}

// ── Orrery scaling ───────────────────────────────────────────────────

const ORRERY_MIN_SCALE: f32 = 180.0;
const ORRERY_SIDE_FRACTION: f32 = 0.9;

/// What `t` in the orbit formula counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeBase {
    #[default]
    Frames,
    Millis,
}

/// How body orbit radii are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitScale {
    /// Radii are pixels.
    #[default]
    Absolute,
    /// Radii are fractions of `max(180, min_side * 0.9)`.
    Viewport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolarSystemConfig {
    pub bodies: Vec<OrbitingBody>,
    pub style: OrbitStyle,
    pub parallax: f32,
    pub time_base: TimeBase,
    pub orbit_scale: OrbitScale,
    /// Vertical squash applied to every planet orbit.
    pub y_scale: f32,
    pub show_sun: bool,
    pub sun_radius: f32,
    pub sun_color: Color,
}

impl Default for SolarSystemConfig {
    fn default() -> Self {
        Self {
            bodies: orbit::default_planets(),
            style: OrbitStyle::default(),
            parallax: 8.0,
            time_base: TimeBase::Frames,
            orbit_scale: OrbitScale::Absolute,
            y_scale: 1.0,
            show_sun: true,
            sun_radius: 22.0,
            sun_color: Color::rgb8(0xff, 0xf9, 0xe0),
        }
    }
}

impl SolarSystemConfig {
    /// Four slow project planets on 0.66-squashed ellipses, timed in milliseconds.
    pub fn orrery() -> Self {
        fn project(
            fraction: f32,
            diameter: f32,
            angle: f32,
            speed: f32,
            rgb: (u8, u8, u8),
            glow: Color,
        ) -> OrbitingBody {
            OrbitingBody {
                orbit: Orbit::new(fraction, speed, angle),
                size: diameter * 0.5,
                color: Color::rgb8(rgb.0, rgb.1, rgb.2),
                glow,
                ..Default::default()
            }
        }

        Self {
            bodies: vec![
                project(0.26, 54.0, 0.5, 0.00008, (0x1f, 0x29, 0x37), Color::rgba8(99, 102, 241, 0.35)),
                project(0.39, 68.0, 2.3, 0.000055, (0x0f, 0x17, 0x2a), Color::rgba8(34, 197, 94, 0.3)),
                project(0.53, 78.0, 4.2, 0.00004, (0x11, 0x18, 0x27), Color::rgba8(59, 130, 246, 0.32)),
                project(0.64, 62.0, 5.4, 0.000032, (0x3f, 0x2a, 0x12), Color::rgba8(245, 158, 11, 0.35)),
            ],
            style: OrbitStyle {
                orbit_color: Color::INK.with_alpha(0.12),
                ..Default::default()
            },
            parallax: 0.0,
            time_base: TimeBase::Millis,
            orbit_scale: OrbitScale::Viewport,
            y_scale: 0.66,
            show_sun: false,
            ..Default::default()
        }
    }

    /// Pixel multiplier for `OrbitScale::Viewport` radii.
    pub fn viewport_scale(viewport: Viewport) -> f32 {
        ORRERY_MIN_SCALE.max(viewport.min_side() * ORRERY_SIDE_FRACTION)
    }
}

pub struct SolarSystem {
    config: SolarSystemConfig,
    /// Bodies with radii and squash resolved for the current viewport.
    bodies: Vec<OrbitingBody>,
    /// Orbit time: frames or milliseconds.
    time: f64,
}

impl SolarSystem {
    pub fn new(config: SolarSystemConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            time: 0.0,
        }
    }

    pub fn orrery() -> Self {
        Self::new(SolarSystemConfig::orrery())
    }

    pub fn from_json(json: &str) -> Result<Self, FxError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn bodies(&self) -> &[OrbitingBody] {
        &self.bodies
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    fn layout(&mut self, viewport: Viewport) {
        let scale = match self.config.orbit_scale {
            OrbitScale::Absolute => 1.0,
            OrbitScale::Viewport => SolarSystemConfig::viewport_scale(viewport),
        };
        let y_scale = self.config.y_scale;
        self.bodies = self
            .config
            .bodies
            .iter()
            .map(|b| {
                let mut body = b.clone();
                body.orbit.radius *= scale;
                body.orbit = body.orbit.with_y_scale(b.orbit.y_scale * y_scale);
                body
            })
            .collect();
    }

    /// Sun center after parallax.
    pub fn origin(&self, ctx: &EffectContext) -> Vec2 {
        ctx.viewport.center() + ctx.pointer.parallax(ctx.viewport, self.config.parallax)
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new(SolarSystemConfig::default())
    }
}

impl Effect for SolarSystem {
    fn init(&mut self, ctx: &mut EffectContext) {
        self.layout(ctx.viewport);
        log::info!(
            "solar system: {} bodies, {:?} time base",
            self.bodies.len(),
            self.config.time_base
        );
    }

    fn resize(&mut self, ctx: &mut EffectContext) {
        self.layout(ctx.viewport);
        log::info!("solar system resized to {}x{}", ctx.viewport.width, ctx.viewport.height);
    }

    fn update(&mut self, ctx: &mut EffectContext, _input: &InputQueue) {
        self.time = match self.config.time_base {
            TimeBase::Frames => ctx.tick as f64,
            TimeBase::Millis => ctx.elapsed_ms,
        };
    }

    fn render(&self, surface: &mut dyn Surface, ctx: &EffectContext) {
        surface.clear(ctx.viewport.width, ctx.viewport.height);
        if ctx.viewport.is_empty() {
            return;
        }
        let origin = self.origin(ctx);

        if self.config.show_sun {
            let glow = self.config.sun_radius * SUN_GLOW_SCALE;
            surface.fill_circle(origin, glow, Fill::radial(origin, glow, &sun_glow_stops()));
            surface.fill_circle(origin, self.config.sun_radius, self.config.sun_color.into());
        }

        for body in &self.bodies {
            body.render(surface, origin, self.time, &self.config.style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recorder::{DrawCommand, RecordingSurface};
    use approx::assert_abs_diff_eq;

    fn started(fx: &mut SolarSystem, w: f32, h: f32) -> EffectContext {
        let mut ctx = EffectContext::new(Viewport::new(w, h), 1);
        fx.init(&mut ctx);
        ctx
    }

    fn sun_center(s: &RecordingSurface) -> Option<Vec2> {
        s.filled_circles().next().map(|(c, _, _)| c)
    }

    #[test]
    fn sun_sits_at_center_without_pointer() {
        let mut fx = SolarSystem::default();
        let ctx = started(&mut fx, 800.0, 600.0);
        let mut s = RecordingSurface::new();
        fx.render(&mut s, &ctx);
        assert_eq!(sun_center(&s), Some(Vec2::new(400.0, 300.0)));
        assert!(matches!(
            s.commands()[1],
            DrawCommand::FillCircle { radius, fill: Fill::Radial { .. }, .. } if radius == 88.0
        ));
    }

    #[test]
    fn pointer_shifts_the_system() {
        let mut fx = SolarSystem::default();
        let mut ctx = started(&mut fx, 800.0, 600.0);
        ctx.pointer.set(0.0, 600.0);
        let mut s = RecordingSurface::new();
        fx.render(&mut s, &ctx);
        let c = sun_center(&s).unwrap_or(Vec2::ZERO);
        assert_abs_diff_eq!(c.x, 396.0, epsilon = 1e-4);
        assert_abs_diff_eq!(c.y, 304.0, epsilon = 1e-4);
    }

    #[test]
    fn frame_time_base_follows_tick() {
        let mut fx = SolarSystem::default();
        let mut ctx = started(&mut fx, 800.0, 600.0);
        ctx.begin_frame(100, 16.0);
        fx.update(&mut ctx, &InputQueue::new());
        assert_eq!(fx.time(), 100.0);
        let mercury = &fx.bodies()[0];
        let expected = Vec2::new((0.8f32 + 1.8).cos(), (0.8f32 + 1.8).sin()) * 60.0;
        let got = mercury.orbit.offset_at(fx.time());
        assert_abs_diff_eq!(got.x, expected.x, epsilon = 1e-3);
        assert_abs_diff_eq!(got.y, expected.y, epsilon = 1e-3);
    }

    #[test]
    fn orrery_scales_with_viewport() {
        let mut fx = SolarSystem::orrery();
        let mut ctx = started(&mut fx, 800.0, 600.0);
        assert_abs_diff_eq!(fx.bodies()[0].orbit.radius, 0.26 * 540.0, epsilon = 1e-3);
        assert_abs_diff_eq!(fx.bodies()[0].orbit.y_scale, 0.66, epsilon = 1e-6);

        ctx.viewport = Viewport::new(150.0, 100.0);
        fx.resize(&mut ctx);
        assert_abs_diff_eq!(fx.bodies()[0].orbit.radius, 0.26 * 180.0, epsilon = 1e-3);
    }

    #[test]
    fn orrery_runs_on_milliseconds() {
        let mut fx = SolarSystem::orrery();
        let mut ctx = started(&mut fx, 800.0, 600.0);
        ctx.begin_frame(1, 250.0);
        ctx.begin_frame(2, 250.0);
        fx.update(&mut ctx, &InputQueue::new());
        assert_eq!(fx.time(), 500.0);
    }

    #[test]
    fn empty_viewport_skips_drawing() {
        let mut fx = SolarSystem::default();
        let ctx = started(&mut fx, 0.0, 0.0);
        let mut s = RecordingSurface::new();
        fx.render(&mut s, &ctx);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn partial_json_keeps_default_planets() {
        let fx = SolarSystem::from_json(r#"{"parallax": 0, "time_base": "millis"}"#).unwrap();
        assert_eq!(fx.config.bodies.len(), 6);
        assert_eq!(fx.config.time_base, TimeBase::Millis);
        assert_eq!(fx.config.parallax, 0.0);
    }
}
