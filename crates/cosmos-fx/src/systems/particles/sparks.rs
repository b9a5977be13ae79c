//! Short-lived spark particles: rocket exhaust and supernova debris.

use glam::Vec2;

use crate::renderer::surface::{Color, Surface};
use crate::systems::rng::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// 1.0 at spawn, dead at 0.
    pub life: f32,
}

impl Spark {
    pub fn radius(&self) -> f32 {
        self.size * self.life.max(0.0)
    }
}

/// Per-frame update rules shared by every spark of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkDynamics {
    /// Life lost per frame.
    pub decay: f32,
    /// Multiplier on vertical velocity per frame.
    pub vertical_gain: f32,
    /// Multiplier on the whole velocity per frame.
    pub drag: f32,
    /// Peak opacity at full life.
    pub opacity: f32,
}

impl SparkDynamics {
    /// Accelerating downward plume.
    pub const EXHAUST: Self = Self { decay: 0.03, vertical_gain: 1.05, drag: 1.0, opacity: 0.7 };
    /// Slowing outward debris.
    pub const DEBRIS: Self = Self { decay: 0.02, vertical_gain: 1.0, drag: 0.96, opacity: 0.6 };
}

/// Fires every `every` frames, `count` particles at a time.
#[derive(Debug, Clone)]
pub struct BurstEmitter {
    pub active: bool,
    pub count: usize,
    pub every: u64,
    frames: u64,
}

impl Default for BurstEmitter {
    fn default() -> Self {
        Self {
            active: true,
            count: 8,
            every: 2,
            frames: 0,
        }
    }
}

impl BurstEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_every(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    /// Advance one frame. Returns the number of particles to spawn.
    pub fn tick(&mut self) -> usize {
        if !self.active {
            return 0;
        }
        self.frames += 1;
        if self.frames % self.every == 0 {
            self.count
        } else {
            0
        }
    }
}

#[derive(Debug, Clone)]
pub struct SparkField {
    sparks: Vec<Spark>,
    dynamics: SparkDynamics,
}

impl SparkField {
    pub fn new(dynamics: SparkDynamics) -> Self {
        Self {
            sparks: Vec::with_capacity(256),
            dynamics,
        }
    }

    /// Downward plume from a nozzle at `origin`, spread `±half_width` horizontally.
    pub fn emit_plume(&mut self, rng: &mut Rng, origin: Vec2, half_width: f32, count: usize) {
        for _ in 0..count {
            self.sparks.push(Spark {
                pos: Vec2::new(origin.x + rng.centered(half_width), origin.y),
                vel: Vec2::new(rng.centered(1.5), rng.range(2.0, 7.0)),
                size: rng.range(1.0, 5.0),
                life: 1.0,
            });
        }
    }

    /// Outward burst in every direction from `origin`.
    pub fn emit_radial(&mut self, rng: &mut Rng, origin: Vec2, speed: (f32, f32), count: usize) {
        for _ in 0..count {
            let dir = Vec2::from_angle(rng.angle());
            self.sparks.push(Spark {
                pos: origin,
                vel: dir * rng.range(speed.0, speed.1),
                size: rng.range(0.8, 2.6),
                life: 1.0,
            });
        }
    }

    /// Move, age and cull. With a `floor`, sparks that sink below it are dropped.
    pub fn advance(&mut self, floor: Option<f32>) {
        let d = self.dynamics;
        let floor = floor.unwrap_or(f32::INFINITY);
        self.sparks.retain_mut(|s| {
            s.pos += s.vel;
            s.life -= d.decay;
            s.vel.y *= d.vertical_gain;
            s.vel *= d.drag;
            s.life > 0.0 && s.pos.y - s.radius() <= floor
        });
    }

    /// Draw each spark; `color.a` scales the life-based opacity.
    pub fn render(&self, surface: &mut dyn Surface, color: Color) {
        self.render_offset(surface, color, Vec2::ZERO);
    }

    /// Same as [`render`](Self::render) but with positions shifted by `offset`.
    pub fn render_offset(&self, surface: &mut dyn Surface, color: Color, offset: Vec2) {
        for s in &self.sparks {
            let alpha = color.a * s.life * self.dynamics.opacity;
            surface.fill_circle(s.pos + offset, s.radius(), color.with_alpha(alpha).into());
        }
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn len(&self) -> usize {
        self.sparks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emitter_fires_every_second_frame() {
        let mut e = BurstEmitter::new();
        let counts: Vec<usize> = (0..4).map(|_| e.tick()).collect();
        assert_eq!(counts, vec![0, 8, 0, 8]);
        e.active = false;
        assert_eq!(e.tick(), 0);
    }

    #[test]
    fn builder_pattern() {
        let e = BurstEmitter::new().with_count(3).with_every(0);
        assert_eq!(e.count, 3);
        assert_eq!(e.every, 1);
    }

    #[test]
    fn plume_ranges() {
        let mut rng = Rng::new(4);
        let mut f = SparkField::new(SparkDynamics::EXHAUST);
        f.emit_plume(&mut rng, Vec2::new(100.0, 400.0), 15.0, 200);
        for s in f.sparks() {
            assert!((85.0..115.0).contains(&s.pos.x));
            assert!((-1.5..1.5).contains(&s.vel.x));
            assert!((2.0..7.0).contains(&s.vel.y));
            assert!((1.0..5.0).contains(&s.size));
            assert_eq!(s.life, 1.0);
        }
    }

    #[test]
    fn exhaust_dies_after_life_runs_out() {
        let mut rng = Rng::new(4);
        let mut f = SparkField::new(SparkDynamics::EXHAUST);
        f.emit_plume(&mut rng, Vec2::new(100.0, 10.0), 15.0, 8);
        let floor = Some(100_000.0);
        f.advance(floor);
        assert_eq!(f.len(), 8);
        assert!((f.sparks()[0].life - 0.97).abs() < 1e-6);
        for _ in 0..40 {
            f.advance(floor);
        }
        assert!(f.is_empty());
    }

    #[test]
    fn sparks_below_canvas_removed() {
        let mut f = SparkField::new(SparkDynamics::EXHAUST);
        f.sparks.push(Spark { pos: Vec2::new(0.0, 95.0), vel: Vec2::new(0.0, 20.0), size: 1.0, life: 1.0 });
        f.advance(Some(100.0));
        assert!(f.is_empty());
    }

    #[test]
    fn radial_burst_spreads_outward() {
        let mut rng = Rng::new(8);
        let mut f = SparkField::new(SparkDynamics::DEBRIS);
        f.emit_radial(&mut rng, Vec2::ZERO, (1.0, 3.0), 50);
        f.advance(None);
        assert!(f.sparks().iter().all(|s| s.pos.length() > 0.9));
    }
}
