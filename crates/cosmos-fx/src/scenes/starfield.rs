//! Star field: falling, twinkling stars with constellation lines near the pointer.

use serde::{Deserialize, Serialize};

use crate::api::effect::{Effect, EffectContext};
use crate::core::error::FxError;
use crate::input::queue::InputQueue;
use crate::renderer::surface::{Color, Surface};
use crate::systems::particles::{self, FieldConfig, LinkConfig, ParticleField};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    #[serde(flatten)]
    pub field: FieldConfig,
    pub links: LinkConfig,
    /// Draw constellation lines around the pointer.
    pub show_links: bool,
    pub color: Color,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            links: LinkConfig::default(),
            show_links: true,
            color: Color::rgb8(10, 15, 30),
        }
    }
}

pub struct StarField {
    config: StarFieldConfig,
    field: ParticleField,
}

impl StarField {
    pub fn new(config: StarFieldConfig) -> Self {
        let field = ParticleField::new(config.field.clone());
        Self { config, field }
    }

    /// Build from a JSON config; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, FxError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

impl Default for StarField {
    fn default() -> Self {
        Self::new(StarFieldConfig::default())
    }
}

impl Effect for StarField {
    fn init(&mut self, ctx: &mut EffectContext) {
        self.field.initialize(ctx.viewport, &mut ctx.rng);
        log::info!(
            "star field: {} stars for {}x{}",
            self.field.len(),
            ctx.viewport.width,
            ctx.viewport.height
        );
    }

    fn resize(&mut self, ctx: &mut EffectContext) {
        self.field.initialize(ctx.viewport, &mut ctx.rng);
        log::info!("star field resized: {} stars", self.field.len());
    }

    fn update(&mut self, ctx: &mut EffectContext, _input: &InputQueue) {
        self.field.advance(ctx.tick, &mut ctx.rng);
    }

    fn render(&self, surface: &mut dyn Surface, ctx: &EffectContext) {
        surface.clear(ctx.viewport.width, ctx.viewport.height);

        // Lines sit under the stars.
        if self.config.show_links {
            if let Some(pointer) = ctx.pointer.position() {
                let links = particles::proximity_links(
                    self.field.stars().iter().map(|s| s.pos),
                    pointer,
                    &self.config.links,
                );
                particles::render_links(&links, surface, self.config.color, self.config.links.line_width);
            }
        }

        self.field.render(surface, self.config.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Viewport;
    use crate::renderer::recorder::{DrawCommand, RecordingSurface};

    fn ctx(w: f32, h: f32) -> EffectContext {
        EffectContext::new(Viewport::new(w, h), 7)
    }

    #[test]
    fn init_populates_from_viewport() {
        let mut ctx = ctx(700.0, 500.0);
        let mut fx = StarField::default();
        fx.init(&mut ctx);
        assert_eq!(fx.field().len(), 100);
    }

    #[test]
    fn empty_viewport_renders_only_clear() {
        let mut ctx = ctx(0.0, 0.0);
        let mut fx = StarField::default();
        fx.init(&mut ctx);
        ctx.begin_frame(1, 16.0);
        fx.update(&mut ctx, &InputQueue::new());
        let mut s = RecordingSurface::new();
        fx.render(&mut s, &ctx);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn no_links_without_pointer() {
        let mut ctx = ctx(400.0, 400.0);
        let mut fx = StarField::new(StarFieldConfig {
            field: FieldConfig { density: 400.0, ..Default::default() },
            ..Default::default()
        });
        fx.init(&mut ctx);
        let mut s = RecordingSurface::new();
        fx.render(&mut s, &ctx);
        let sparkles = fx.field().stars().iter().filter(|st| st.radius > 1.8).count();
        assert_eq!(s.lines().count(), sparkles * 2);
    }

    #[test]
    fn links_drawn_before_stars() {
        let mut ctx = ctx(400.0, 400.0);
        let mut fx = StarField::new(StarFieldConfig {
            field: FieldConfig { density: 400.0, ..Default::default() },
            ..Default::default()
        });
        fx.init(&mut ctx);
        ctx.pointer.set(200.0, 200.0);
        let mut s = RecordingSurface::new();
        fx.render(&mut s, &ctx);
        let first_fill = s
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .unwrap_or(usize::MAX);
        let first_line = s
            .commands()
            .iter()
            .position(|c| matches!(c, DrawCommand::Line { .. }))
            .unwrap_or(usize::MAX);
        assert!(first_line < first_fill);
    }

    #[test]
    fn resize_rebuilds_field() {
        let mut ctx = ctx(700.0, 500.0);
        let mut fx = StarField::default();
        fx.init(&mut ctx);
        ctx.viewport = Viewport::new(350.0, 500.0);
        fx.resize(&mut ctx);
        assert_eq!(fx.field().len(), 50);
    }

    #[test]
    fn config_from_json() {
        let fx = StarField::from_json(r#"{"density": 1000, "show_links": false}"#).unwrap();
        assert_eq!(fx.config.field.density, 1000.0);
        assert!(!fx.config.show_links);
        assert!(StarField::from_json("{").is_err());
    }
}
