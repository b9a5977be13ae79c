//! Spiral galaxy that explodes when its core is clicked and then pulls itself
//! back together.
//!
//! Phases run on frame counts: `Stable` holds until triggered, `Exploding`
//! lasts `explode_frames`, `Reforming` lasts `reform_frames`. Particle
//! positions are stored relative to the galaxy center so parallax only moves
//! the drawing, never the simulation.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::effect::{Effect, EffectContext};
use crate::api::types::{FxEvent, Viewport};
use crate::core::error::FxError;
use crate::extensions::easing::{approach, approach_vec2, ease, Easing};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::surface::{Color, Fill, GradientStop, Surface};
use crate::systems::particles::{SparkDynamics, SparkField};
use crate::systems::phase::PhaseClock;
use crate::systems::rng::Rng;

// ── Layout ───────────────────────────────────────────────────────────

const MIN_MAX_RADIUS: f32 = 180.0;
const RADIUS_FRACTION: f32 = 0.42;
const VERTICAL_SQUASH: f32 = 0.52;

// ── Dust halo ────────────────────────────────────────────────────────

const DUST_DOTS: usize = 42;
const DUST_RADIUS: f32 = 0.8;
const DUST_ALPHA: f32 = 0.06;

// ── Shock waves ──────────────────────────────────────────────────────

const WAVE_GROWTH: f32 = 4.6;
const WAVE_FADE: f32 = 0.95;
const WAVE_MIN_ALPHA: f32 = 0.02;
const WAVE_MAX_RADIUS_FACTOR: f32 = 1.35;

// ── Motion ───────────────────────────────────────────────────────────

const EXPLODE_DRAG: f32 = 0.988;
const EXPLODE_FADE: f32 = 0.982;
const REFORM_PULL: f32 = 0.048;
const REFORM_ALPHA_SMOOTHING: f32 = 0.05;
const BURST_DECAY: f32 = 0.94;
const BURST_CUTOFF: f32 = 0.01;

// ── Core ─────────────────────────────────────────────────────────────

const CORE_RADIUS: f32 = 22.0;
const CORE_BURST_GROWTH: f32 = 16.0;
const CORE_GLOW_SCALE: f32 = 3.8;
const PARTICLE_GLOW_SCALE: f32 = 4.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalaxyPhase {
    Stable,
    Exploding,
    Reforming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub particle_count: usize,
    pub arm_count: usize,
    pub parallax: f32,
    /// Swirl advance per frame.
    pub rotation_speed: f32,
    pub explode_frames: u32,
    pub reform_frames: u32,
    /// Debris sparks thrown out on each explosion.
    pub debris_count: usize,
    /// Space and Enter also set off the explosion.
    pub keyboard_trigger: bool,
    pub color: Color,
    /// Inner highlight of the core.
    pub core_highlight: Color,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            particle_count: 340,
            arm_count: 5,
            parallax: 12.0,
            rotation_speed: 0.004,
            explode_frames: 85,
            reform_frames: 330,
            debris_count: 48,
            keyboard_trigger: true,
            color: Color::INK,
            core_highlight: Color::rgba8(245, 245, 240, 0.22),
        }
    }
}

#[derive(Debug, Clone)]
struct GalaxyParticle {
    base_r: f32,
    base_theta: f32,
    arm_jitter: f32,
    size: f32,
    alpha: f32,
    target_alpha: f32,
    twinkle: f32,
    speed: f32,
    pos: Vec2,
    vel: Vec2,
}

impl GalaxyParticle {
    fn spawn(rng: &mut Rng, index: usize, arm_count: usize, max_r: f32) -> Self {
        let arm = (index % arm_count.max(1)) as f32;
        let base_r = rng.next_f32().powf(0.72) * max_r;
        let base_theta = arm * (TAU / arm_count.max(1) as f32) + base_r * 0.043 + rng.centered(0.45);
        let target_alpha = 0.35 + rng.next_f32() * 0.5;
        let depth = base_r / max_r;
        Self {
            base_r,
            base_theta,
            arm_jitter: rng.centered(8.0),
            size: (2.4 - depth * 1.45 + rng.next_f32() * 0.9).max(0.5),
            alpha: target_alpha,
            target_alpha,
            twinkle: rng.angle(),
            speed: 0.0004 + (1.0 - depth) * 0.0024 + rng.next_f32() * 0.0007,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
        }
    }

    /// Resting position and twinkle at a given rotation.
    fn target(&self, rotation: f32) -> (Vec2, f32) {
        let swirl = self.base_theta + rotation * (0.5 + self.speed * 15.0);
        let twinkle = (rotation * 6.0 + self.twinkle).sin() * 0.12;
        let warp = (rotation * 2.0 + self.base_r * 0.02).sin() * self.arm_jitter;
        let pos = Vec2::new(
            swirl.cos() * self.base_r + (swirl + FRAC_PI_2).cos() * warp,
            swirl.sin() * self.base_r * VERTICAL_SQUASH + (swirl + FRAC_PI_2).sin() * warp * 0.5,
        );
        (pos, twinkle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Wave {
    radius: f32,
    alpha: f32,
    width: f32,
}

pub struct Galaxy {
    config: GalaxyConfig,
    particles: Vec<GalaxyParticle>,
    waves: Vec<Wave>,
    debris: SparkField,
    clock: PhaseClock<GalaxyPhase>,
    rotation: f32,
    burst: f32,
}

/// `max(180, min_side * 0.42)`.
pub fn max_radius(viewport: Viewport) -> f32 {
    MIN_MAX_RADIUS.max(viewport.min_side() * RADIUS_FRACTION)
}

impl Galaxy {
    pub fn new(config: GalaxyConfig) -> Self {
        Self {
            config,
            particles: Vec::new(),
            waves: Vec::new(),
            debris: SparkField::new(SparkDynamics::DEBRIS),
            clock: PhaseClock::new(GalaxyPhase::Stable),
            rotation: 0.0,
            burst: 0.0,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FxError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn phase(&self) -> GalaxyPhase {
        self.clock.phase()
    }

    /// Frames spent in the current phase.
    pub fn phase_frames(&self) -> u32 {
        self.clock.frames()
    }

    pub fn burst(&self) -> f32 {
        self.burst
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Built once, the first time the viewport has an area. Later resizes keep
    /// the existing layout.
    fn ensure_particles(&mut self, viewport: Viewport, rng: &mut Rng) {
        if !self.particles.is_empty() || viewport.is_empty() {
            return;
        }
        let max_r = max_radius(viewport);
        let arms = self.config.arm_count;
        let rotation = self.rotation;
        self.particles = (0..self.config.particle_count)
            .map(|i| {
                let mut p = GalaxyParticle::spawn(rng, i, arms, max_r);
                p.pos = p.target(rotation).0;
                p
            })
            .collect();
        log::info!("galaxy: {} particles, max radius {:.1}", self.particles.len(), max_r);
    }

    /// Click hit test against the un-parallaxed center.
    fn hits_core(viewport: Viewport, at: Vec2) -> bool {
        at.distance(viewport.center()) <= viewport.min_side() * RADIUS_FRACTION
    }

    /// Start the explosion. Allowed from `Stable` and from `Reforming`;
    /// ignored while already exploding.
    pub fn explode(&mut self, ctx: &mut EffectContext) -> bool {
        if self
            .clock
            .trigger(GalaxyPhase::Exploding, |p| p != GalaxyPhase::Exploding)
            .is_none()
        {
            return false;
        }
        self.burst = 1.0;
        self.waves.push(Wave { radius: 32.0, alpha: 0.45, width: 2.4 });

        let rng = &mut ctx.rng;
        for p in &mut self.particles {
            let dist = p.pos.length();
            let dist = if dist > 0.0 { dist } else { 1.0 };
            let spread = 1.5 + rng.next_f32() * 2.6 + dist * 0.008;
            p.vel = p.pos / dist * spread + Vec2::new(rng.centered(0.65), rng.centered(0.65));
        }
        self.debris.emit_radial(rng, Vec2::ZERO, (2.0, 6.0), self.config.debris_count);

        ctx.emit(FxEvent::Supernova);
        log::debug!("galaxy exploding");
        true
    }

    fn triggered(&self, input: &InputQueue, viewport: Viewport) -> bool {
        let clicked = input
            .clicks()
            .any(|(x, y)| Self::hits_core(viewport, Vec2::new(x, y)));
        let keyed = self.config.keyboard_trigger
            && input
                .iter()
                .any(|e| matches!(e, InputEvent::KeyDown { .. }) && e.is_activation());
        clicked || keyed
    }

    fn step_particles(&mut self) {
        let phase = self.clock.phase();
        let reform = self.clock.progress(self.config.reform_frames);
        let rotation = self.rotation;
        for p in &mut self.particles {
            let (target, twinkle) = p.target(rotation);
            match phase {
                GalaxyPhase::Stable => {
                    p.pos = target;
                    p.alpha = (p.target_alpha + twinkle).min(1.0);
                }
                GalaxyPhase::Exploding => {
                    p.pos += p.vel;
                    p.vel *= EXPLODE_DRAG;
                    p.alpha *= EXPLODE_FADE;
                }
                GalaxyPhase::Reforming => {
                    p.pos = approach_vec2(p.pos, target, REFORM_PULL);
                    let goal = ease(0.0, p.target_alpha + twinkle, reform, Easing::CubicOut);
                    p.alpha = approach(p.alpha, goal, REFORM_ALPHA_SMOOTHING);
                }
            }
        }
    }

    fn step_waves(&mut self, max_r: f32) {
        for w in &mut self.waves {
            w.radius += WAVE_GROWTH;
            w.alpha *= WAVE_FADE;
        }
        self.waves
            .retain(|w| w.alpha > WAVE_MIN_ALPHA && w.radius < max_r * WAVE_MAX_RADIUS_FACTOR);
    }
}

impl Default for Galaxy {
    fn default() -> Self {
        Self::new(GalaxyConfig::default())
    }
}

impl Effect for Galaxy {
    fn init(&mut self, ctx: &mut EffectContext) {
        self.ensure_particles(ctx.viewport, &mut ctx.rng);
        if self.particles.is_empty() {
            log::warn!("galaxy waiting for a non-empty viewport");
        }
    }

    fn update(&mut self, ctx: &mut EffectContext, input: &InputQueue) {
        self.ensure_particles(ctx.viewport, &mut ctx.rng);

        let viewport = ctx.viewport;
        if self.triggered(input, viewport) {
            self.explode(ctx);
        }

        self.rotation += self.config.rotation_speed;
        self.clock.tick();

        self.burst *= BURST_DECAY;
        if self.burst < BURST_CUTOFF {
            self.burst = 0.0;
        }

        self.step_waves(max_radius(viewport));
        self.step_particles();
        self.debris.advance(None);

        let (explode, reform) = (self.config.explode_frames, self.config.reform_frames);
        let change = self.clock.expire(|p| match p {
            GalaxyPhase::Stable => None,
            GalaxyPhase::Exploding => Some((explode, GalaxyPhase::Reforming)),
            GalaxyPhase::Reforming => Some((reform, GalaxyPhase::Stable)),
        });
        if let Some(t) = change {
            log::debug!("galaxy {:?} -> {:?}", t.from, t.to);
        }
    }

    fn render(&self, surface: &mut dyn Surface, ctx: &EffectContext) {
        let vp = ctx.viewport;
        surface.clear(vp.width, vp.height);
        if vp.is_empty() {
            return;
        }
        let color = self.config.color;
        let center = vp.center() + ctx.pointer.parallax(vp, self.config.parallax);
        let max_r = max_radius(vp);

        for i in 0..DUST_DOTS {
            let angle = i as f32 / DUST_DOTS as f32 * TAU + self.rotation * 0.2;
            let radius = max_r * (0.55 + (i % 7) as f32 * 0.07);
            let at = center + Vec2::new(angle.cos() * radius, angle.sin() * radius * 0.5);
            surface.fill_circle(at, DUST_RADIUS, color.with_alpha(DUST_ALPHA).into());
        }

        for w in &self.waves {
            surface.stroke_circle(center, w.radius, w.width, color.with_alpha(w.alpha));
        }

        for p in &self.particles {
            let at = center + p.pos;
            let glow = p.size * PARTICLE_GLOW_SCALE;
            surface.fill_circle(
                at,
                glow,
                Fill::radial(
                    at,
                    glow,
                    &[
                        GradientStop::new(0.0, color.with_alpha(p.alpha.min(0.75))),
                        GradientStop::new(1.0, color.with_alpha(0.0)),
                    ],
                ),
            );
            surface.fill_circle(at, p.size, color.with_alpha((p.alpha + 0.15).min(0.95)).into());
        }

        self.debris.render_offset(surface, color, center);

        let core = CORE_RADIUS + self.burst * CORE_BURST_GROWTH;
        let core_glow = core * CORE_GLOW_SCALE;
        surface.fill_circle(
            center,
            core_glow,
            Fill::radial(
                center,
                core_glow,
                &[
                    GradientStop::new(0.0, color.with_alpha(0.9 - self.burst * 0.2)),
                    GradientStop::new(0.45, color.with_alpha(0.28 + self.burst * 0.14)),
                    GradientStop::new(1.0, color.with_alpha(0.0)),
                ],
            ),
        );
        surface.fill_circle(center, core, color.with_alpha(0.95).into());
        surface.fill_circle(center, core * 0.55, self.config.core_highlight.into());
    }
}
