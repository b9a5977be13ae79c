//! Falling, twinkling star field.

use serde::{Deserialize, Serialize};

use crate::api::types::Viewport;
use crate::renderer::surface::{Color, Surface};
use crate::systems::rng::Rng;

use super::star::Star;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Canvas area per star.
    pub density: f32,
    /// Share of stars drawn from the bright population.
    pub bright_fraction: f32,
    /// Stars drift downward and wrap.
    pub falling: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: 3500.0,
            bright_fraction: 0.15,
            falling: true,
        }
    }
}

/// Owns the stars of one effect instance.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    stars: Vec<Star>,
    viewport: Viewport,
    config: FieldConfig,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            stars: Vec::new(),
            viewport: Viewport::default(),
            config,
        }
    }

    /// Star count for a viewport: `floor(area / density)`, 0 when degenerate.
    pub fn star_count(viewport: Viewport, density: f32) -> usize {
        if viewport.is_empty() || !(density.is_finite() && density > 0.0) {
            return 0;
        }
        (viewport.area() / density).floor() as usize
    }

    /// Rebuild every star for `viewport`. An empty viewport leaves the field empty.
    pub fn initialize(&mut self, viewport: Viewport, rng: &mut Rng) {
        self.stars.clear();
        self.viewport = viewport;
        let count = Self::star_count(viewport, self.config.density);
        if count == 0 {
            log::warn!(
                "star field skipped: viewport {}x{}, density {}",
                viewport.width,
                viewport.height,
                self.config.density
            );
            return;
        }
        self.stars.reserve(count);
        for _ in 0..count {
            self.stars.push(Star::spawn(rng, viewport, self.config.bright_fraction));
        }
        log::debug!("star field initialized with {} stars", count);
    }

    /// Twinkle every star and, when falling, drift and wrap.
    pub fn advance(&mut self, tick: u64, rng: &mut Rng) {
        let viewport = self.viewport;
        for star in &mut self.stars {
            star.twinkle(tick);
            if self.config.falling {
                star.fall(rng, viewport);
            }
        }
    }

    /// Draw back to front in storage order.
    pub fn render(&self, surface: &mut dyn Surface, color: Color) {
        for star in &self.stars {
            star.render(surface, color);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
