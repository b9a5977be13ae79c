use crate::api::types::{FxEvent, Viewport};
use crate::input::pointer::PointerState;
use crate::input::queue::InputQueue;
use crate::renderer::surface::Surface;
use crate::systems::rng::Rng;

/// The contract every animated effect fulfils.
///
/// The runner calls `init` once, then `update` and `render` once per frame.
/// Discrete input arrives through the queue; the pointer is read from the
/// context.
pub trait Effect {
    /// Build initial state. The viewport may still be empty here.
    fn init(&mut self, ctx: &mut EffectContext);

    /// The viewport changed; `ctx.viewport` already holds the new size.
    fn resize(&mut self, _ctx: &mut EffectContext) {}

    /// Advance one frame.
    fn update(&mut self, ctx: &mut EffectContext, input: &InputQueue);

    /// Draw the current state. Read-only.
    fn render(&self, surface: &mut dyn Surface, ctx: &EffectContext);
}

/// Mutable per-instance state shared with the effect each frame.
pub struct EffectContext {
    pub viewport: Viewport,
    pub pointer: PointerState,
    pub rng: Rng,
    pub events: Vec<FxEvent>,
    /// Frames since start.
    pub tick: u64,
    /// Milliseconds since start (clamped per frame).
    pub elapsed_ms: f64,
    /// Clamped duration of the current frame.
    pub dt_ms: f32,
}

impl EffectContext {
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        Self {
            viewport,
            pointer: PointerState::new(),
            rng: Rng::new(seed),
            events: Vec::new(),
            tick: 0,
            elapsed_ms: 0.0,
            dt_ms: 0.0,
        }
    }

    /// Stamp frame timing before `update`.
    pub fn begin_frame(&mut self, tick: u64, dt_ms: f32) {
        self.tick = tick;
        self.dt_ms = dt_ms;
        self.elapsed_ms += dt_ms as f64;
    }

    /// Emit an event to be forwarded to the host.
    pub fn emit(&mut self, event: FxEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EffectContext {
    fn default() -> Self {
        Self::new(Viewport::default(), 42)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_frame_accumulates_time() {
        let mut ctx = EffectContext::new(Viewport::new(10.0, 10.0), 1);
        ctx.begin_frame(1, 16.0);
        ctx.begin_frame(2, 17.0);
        assert_eq!(ctx.tick, 2);
        assert_eq!(ctx.dt_ms, 17.0);
        assert!((ctx.elapsed_ms - 33.0).abs() < 1e-9);
    }

    #[test]
    fn events_cleared_per_frame() {
        let mut ctx = EffectContext::default();
        ctx.emit(FxEvent::Liftoff);
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }
}
