//! Vector ship that rides on the pointer and turns toward its direction of travel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::effect::{Effect, EffectContext};
use crate::core::error::FxError;
use crate::input::heading::HeadingFollower;
use crate::input::queue::InputQueue;
use crate::renderer::surface::{Color, Fill, GradientStop, Surface};

// ── Hull, in a 40x48 box, nose up ────────────────────────────────────

/// Rotation pivot: the center node.
const PIVOT: Vec2 = Vec2::new(20.0, 18.0);
const NOSE: [Vec2; 4] = [
    Vec2::new(20.0, 2.0),
    Vec2::new(26.0, 22.0),
    Vec2::new(20.0, 18.0),
    Vec2::new(14.0, 22.0),
];
const LEFT_WING: [Vec2; 4] = [
    Vec2::new(14.0, 22.0),
    Vec2::new(3.0, 38.0),
    Vec2::new(16.0, 28.0),
    Vec2::new(20.0, 18.0),
];
const RIGHT_WING: [Vec2; 4] = [
    Vec2::new(26.0, 22.0),
    Vec2::new(37.0, 38.0),
    Vec2::new(24.0, 28.0),
    Vec2::new(20.0, 18.0),
];
const ENGINE: [Vec2; 4] = [
    Vec2::new(16.0, 28.0),
    Vec2::new(24.0, 28.0),
    Vec2::new(22.0, 42.0),
    Vec2::new(18.0, 42.0),
];
const TIP: Vec2 = Vec2::new(20.0, 2.0);
const LINE_WIDTH: f32 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorShipConfig {
    /// Fraction of the remaining turn applied per frame.
    pub smoothing: f32,
    /// Pointer speed (px/frame) below which the heading holds.
    pub min_speed: f32,
    pub scale: f32,
    pub color: Color,
    pub exhaust_color: Color,
}

impl Default for CursorShipConfig {
    fn default() -> Self {
        Self {
            smoothing: HeadingFollower::DEFAULT_SMOOTHING,
            min_speed: HeadingFollower::DEFAULT_MIN_SPEED,
            scale: 0.9,
            color: Color::INK,
            exhaust_color: Color::rgb8(40, 40, 60),
        }
    }
}

pub struct CursorShip {
    config: CursorShipConfig,
    heading: HeadingFollower,
}

impl CursorShip {
    pub fn new(config: CursorShipConfig) -> Self {
        let heading = HeadingFollower::new(config.smoothing, config.min_speed);
        Self { config, heading }
    }

    pub fn from_json(json: &str) -> Result<Self, FxError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Current heading in degrees, 0 = nose up.
    pub fn heading(&self) -> f32 {
        self.heading.degrees()
    }

    fn render_hull(&self, surface: &mut dyn Surface) {
        let ink = self.config.color;

        surface.fill_polygon(&NOSE, ink.with_alpha(0.9).into());
        surface.stroke_polygon(&NOSE, LINE_WIDTH, ink);

        for wing in [&LEFT_WING, &RIGHT_WING] {
            surface.fill_polygon(wing, ink.with_alpha(0.08).into());
            surface.stroke_polygon(wing, LINE_WIDTH, ink.with_alpha(0.6));
        }

        surface.line(TIP, LEFT_WING[1], 0.6, ink.with_alpha(0.25));
        surface.line(TIP, RIGHT_WING[1], 0.6, ink.with_alpha(0.25));

        surface.fill_polygon(
            &ENGINE,
            Fill::linear(
                Vec2::new(20.0, 28.0),
                Vec2::new(20.0, 42.0),
                &[
                    GradientStop::new(0.0, ink.with_alpha(0.14)),
                    GradientStop::new(1.0, ink.with_alpha(0.06)),
                ],
            ),
        );
        surface.stroke_polygon(&ENGINE, 0.6, ink.with_alpha(0.45));

        let exhaust = self.config.exhaust_color;
        surface.fill_circle(Vec2::new(20.0, 44.0), 1.4, exhaust.with_alpha(0.9).into());
        surface.fill_circle(Vec2::new(20.0, 46.0), 0.7, exhaust.with_alpha(0.5).into());

        surface.fill_circle(PIVOT, 2.0, ink.with_alpha(0.95).into());
        surface.fill_circle(TIP, 1.1, ink.into());
    }
}

impl Default for CursorShip {
    fn default() -> Self {
        Self::new(CursorShipConfig::default())
    }
}

impl Effect for CursorShip {
    fn init(&mut self, _ctx: &mut EffectContext) {
        log::info!("cursor ship ready");
    }

    fn update(&mut self, ctx: &mut EffectContext, _input: &InputQueue) {
        if let Some(pos) = ctx.pointer.position() {
            self.heading.follow(pos);
        }
    }

    fn render(&self, surface: &mut dyn Surface, ctx: &EffectContext) {
        surface.clear(ctx.viewport.width, ctx.viewport.height);
        let Some(pos) = ctx.pointer.position() else {
            return;
        };
        surface.save();
        surface.translate(pos);
        surface.rotate(self.heading.radians());
        surface.scale(Vec2::splat(self.config.scale));
        surface.translate(-PIVOT);
        self.render_hull(surface);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Viewport;
    use crate::renderer::recorder::{DrawCommand, RecordingSurface};
    use approx::assert_abs_diff_eq;

    fn step(ship: &mut CursorShip, ctx: &mut EffectContext, x: f32, y: f32) {
        ctx.pointer.set(x, y);
        ship.update(ctx, &InputQueue::new());
    }

    #[test]
    fn hidden_until_pointer_arrives() {
        let mut ctx = EffectContext::new(Viewport::new(800.0, 600.0), 1);
        let mut ship = CursorShip::default();
        ship.init(&mut ctx);
        ship.update(&mut ctx, &InputQueue::new());
        let mut s = RecordingSurface::new();
        ship.render(&mut s, &ctx);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn turns_toward_motion() {
        let mut ctx = EffectContext::new(Viewport::new(800.0, 600.0), 1);
        let mut ship = CursorShip::default();
        for i in 0..200 {
            step(&mut ship, &mut ctx, 100.0 + i as f32 * 4.0, 300.0);
        }
        assert_abs_diff_eq!(ship.heading(), 90.0, epsilon = 1e-2);
    }

    #[test]
    fn resting_pointer_keeps_heading() {
        let mut ctx = EffectContext::new(Viewport::new(800.0, 600.0), 1);
        let mut ship = CursorShip::default();
        step(&mut ship, &mut ctx, 100.0, 100.0);
        step(&mut ship, &mut ctx, 100.0, 110.0);
        let h = ship.heading();
        step(&mut ship, &mut ctx, 100.0, 110.2);
        assert_eq!(ship.heading(), h);
    }

    #[test]
    fn hull_drawn_around_pointer() {
        let mut ctx = EffectContext::new(Viewport::new(800.0, 600.0), 1);
        let ship = CursorShip::default();
        ctx.pointer.set(50.0, 60.0);
        let mut s = RecordingSurface::new();
        ship.render(&mut s, &ctx);
        assert_eq!(s.commands()[1], DrawCommand::Save);
        assert_eq!(s.commands()[2], DrawCommand::Translate(Vec2::new(50.0, 60.0)));
        assert_eq!(s.count(|c| matches!(c, DrawCommand::FillPolygon { .. })), 4);
        assert_eq!(s.lines().count(), 2);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn config_from_json() {
        assert!(CursorShip::from_json(r#"{"scale": 1.5, "smoothing": 0.2}"#).is_ok());
        assert!(matches!(CursorShip::from_json("[1, 2"), Err(FxError::Config(_))));
    }
}
