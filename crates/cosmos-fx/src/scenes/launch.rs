//! Launch sequence overlay: countdown, progress bar, rocket and exhaust plume.
//!
//! Text (the big T-minus number and checklist) belongs to the host page; it
//! follows along through `CountdownStep` events and the accessors here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::effect::{Effect, EffectContext};
use crate::api::types::FxEvent;
use crate::core::error::FxError;
use crate::input::queue::InputQueue;
use crate::renderer::surface::{Color, Surface};
use crate::systems::countdown::{Countdown, CountdownConfig, CountdownSignal};
use crate::systems::particles::{BurstEmitter, SparkDynamics, SparkField};

// ── Rocket (40x56 box, nose at the top) ──────────────────────────────

const ROCKET_SIZE: Vec2 = Vec2::new(40.0, 56.0);
const NOSE: [Vec2; 4] = [
    Vec2::new(20.0, 2.0),
    Vec2::new(28.0, 24.0),
    Vec2::new(20.0, 20.0),
    Vec2::new(12.0, 24.0),
];
const LEFT_FIN: [Vec2; 4] = [
    Vec2::new(12.0, 24.0),
    Vec2::new(2.0, 42.0),
    Vec2::new(16.0, 32.0),
    Vec2::new(20.0, 20.0),
];
const RIGHT_FIN: [Vec2; 4] = [
    Vec2::new(28.0, 24.0),
    Vec2::new(38.0, 42.0),
    Vec2::new(24.0, 32.0),
    Vec2::new(20.0, 20.0),
];
const ENGINE: [Vec2; 4] = [
    Vec2::new(16.0, 32.0),
    Vec2::new(24.0, 32.0),
    Vec2::new(22.0, 48.0),
    Vec2::new(18.0, 48.0),
];

// ── Progress bar ─────────────────────────────────────────────────────

const BAR_Y: f32 = 61.0;
const BAR_WIDTH: f32 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchConfig {
    pub countdown: CountdownConfig,
    /// Nozzle height as a fraction of the viewport height.
    pub nozzle_y: f32,
    /// Horizontal spread of new exhaust, each side of the nozzle.
    pub nozzle_spread: f32,
    pub exhaust_per_burst: usize,
    pub exhaust_every: u64,
    /// Gap between the rocket and the bottom edge before liftoff.
    pub rocket_bottom: f32,
    /// How far below the edge the rocket ends up.
    pub rocket_drop: f32,
    pub glitch_opacity: f32,
    pub color: Color,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            countdown: CountdownConfig::default(),
            nozzle_y: 0.72,
            nozzle_spread: 15.0,
            exhaust_per_burst: 8,
            exhaust_every: 2,
            rocket_bottom: 60.0,
            rocket_drop: 180.0,
            glitch_opacity: 0.7,
            color: Color::INK,
        }
    }
}

pub struct LaunchSequence {
    config: LaunchConfig,
    countdown: Countdown,
    exhaust: SparkField,
    emitter: BurstEmitter,
    signals: Vec<CountdownSignal>,
    /// Screen shake for this frame while glitching.
    shake: Option<Vec2>,
}

impl LaunchSequence {
    pub fn new(config: LaunchConfig) -> Self {
        let emitter = BurstEmitter::new()
            .with_count(config.exhaust_per_burst)
            .with_every(config.exhaust_every);
        Self {
            countdown: Countdown::new(config.countdown.clone()),
            exhaust: SparkField::new(SparkDynamics::EXHAUST),
            emitter,
            signals: Vec::new(),
            shake: None,
            config,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FxError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn exhaust(&self) -> &SparkField {
        &self.exhaust
    }

    fn forward_signals(&mut self, ctx: &mut EffectContext) {
        for signal in self.signals.drain(..) {
            match signal {
                CountdownSignal::Step(step) => ctx.emit(FxEvent::CountdownStep { step }),
                CountdownSignal::Liftoff => ctx.emit(FxEvent::Liftoff),
                CountdownSignal::FadeStarted => {
                    log::debug!("launch overlay fading");
                    ctx.emit(FxEvent::FadeStarted);
                }
                CountdownSignal::Complete => ctx.emit(FxEvent::SequenceComplete),
            }
        }
    }

    /// Top-left corner of the rocket box.
    fn rocket_origin(&self, ctx: &EffectContext) -> Vec2 {
        let vp = ctx.viewport;
        let drop = self.countdown.liftoff_progress() * self.config.rocket_drop;
        Vec2::new(
            vp.width * 0.5 - ROCKET_SIZE.x * 0.5,
            vp.height - self.config.rocket_bottom - ROCKET_SIZE.y + drop,
        )
    }

    fn render_rocket(&self, surface: &mut dyn Surface, origin: Vec2, opacity: f32) {
        let ink = self.config.color;
        let shade = |a: f32| ink.with_alpha(a * opacity);
        let place = |pts: &[Vec2; 4]| pts.map(|p| origin + p);

        surface.fill_polygon(&place(&NOSE), shade(1.0).into());
        for fin in [&LEFT_FIN, &RIGHT_FIN] {
            let fin = place(fin);
            surface.fill_polygon(&fin, shade(0.08).into());
            surface.stroke_polygon(&fin, 0.8, shade(0.6));
        }
        let engine = place(&ENGINE);
        surface.fill_polygon(&engine, shade(0.15).into());
        surface.stroke_polygon(&engine, 0.7, shade(0.5));
        surface.fill_circle(origin + Vec2::new(20.0, 20.0), 2.5, Color::WHITE.with_alpha(opacity).into());
        surface.fill_circle(origin + Vec2::new(20.0, 2.0), 1.5, shade(1.0).into());
    }
}

impl Default for LaunchSequence {
    fn default() -> Self {
        Self::new(LaunchConfig::default())
    }
}

impl Effect for LaunchSequence {
    fn init(&mut self, ctx: &mut EffectContext) {
        log::info!(
            "launch sequence: {} steps, {:.0} ms total",
            self.config.countdown.steps.len(),
            self.config.countdown.total_ms()
        );
        if ctx.viewport.is_empty() {
            log::warn!("launch sequence started without a viewport; drawing is skipped");
        }
    }

    fn update(&mut self, ctx: &mut EffectContext, _input: &InputQueue) {
        self.countdown.advance(ctx.dt_ms, &mut self.signals);
        self.forward_signals(ctx);

        self.shake = self.countdown.glitch_offset(&mut ctx.rng);

        // The plume freezes once the fade begins.
        self.emitter.active = self.countdown.exhaust_active();
        if self.emitter.active {
            let count = self.emitter.tick();
            if count > 0 && !ctx.viewport.is_empty() {
                let nozzle = Vec2::new(
                    ctx.viewport.width * 0.5,
                    ctx.viewport.height * self.config.nozzle_y,
                );
                self.exhaust
                    .emit_plume(&mut ctx.rng, nozzle, self.config.nozzle_spread, count);
            }
            self.exhaust.advance(Some(ctx.viewport.height));
        }
    }

    fn render(&self, surface: &mut dyn Surface, ctx: &EffectContext) {
        let vp = ctx.viewport;
        surface.clear(vp.width, vp.height);
        if vp.is_empty() {
            return;
        }
        let opacity = self.countdown.overlay_opacity();
        if opacity <= 0.0 {
            return;
        }
        let ink = self.config.color;

        surface.line(
            Vec2::new(0.0, BAR_Y),
            Vec2::new(vp.width, BAR_Y),
            BAR_WIDTH,
            ink.with_alpha(0.06 * opacity),
        );
        let filled = vp.width * self.countdown.progress();
        if filled > 0.0 {
            surface.line(
                Vec2::new(0.0, BAR_Y),
                Vec2::new(filled, BAR_Y),
                BAR_WIDTH,
                ink.with_alpha(0.3 * opacity),
            );
        }

        if let Some(shake) = self.shake {
            surface.save();
            surface.translate(shake);
        }
        self.exhaust.render(surface, ink.with_alpha(opacity));
        let rocket_opacity = if self.shake.is_some() {
            opacity * self.config.glitch_opacity
        } else {
            opacity
        };
        self.render_rocket(surface, self.rocket_origin(ctx), rocket_opacity);
        if self.shake.is_some() {
            surface.restore();
        }
    }
}
