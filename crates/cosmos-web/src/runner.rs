use cosmos_fx::core::time::clamp_frame_ms;
use cosmos_fx::{
    Effect, EffectContext, FrameClock, FxEvent, InputEvent, InputQueue, Surface, Viewport,
};

/// Runner-level settings: where the effect starts and how it is seeded.
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    pub seed: u64,
    pub viewport: Viewport,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            viewport: Viewport::default(),
        }
    }
}

/// Generic runner that wires one effect to its clock, pointer and input queue.
///
/// The browser side keeps one runner per mounted canvas behind an `Rc<RefCell>`
/// and drives `tick` + `render` from `requestAnimationFrame`. Headless hosts
/// call the same two methods with their own frame deltas.
pub struct EffectRunner<E: Effect> {
    effect: E,
    ctx: EffectContext,
    input: InputQueue,
    clock: FrameClock,
    initialized: bool,
}

impl<E: Effect> EffectRunner<E> {
    pub fn new(effect: E, config: RunnerConfig) -> Self {
        Self {
            effect,
            ctx: EffectContext::new(config.viewport, config.seed),
            input: InputQueue::new(),
            clock: FrameClock::new(),
            initialized: false,
        }
    }

    /// Initialize the effect. Call once after construction.
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.effect.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Record a pointer sample. Last write wins; nothing is queued.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.ctx.pointer.set(x, y);
    }

    /// The pointer left the canvas.
    pub fn pointer_leave(&mut self) {
        self.ctx.pointer.clear();
    }

    /// Push a discrete input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of simulation.
    ///
    /// Returns false once the runner is cancelled (or before `init`), in which
    /// case nothing changed and the caller should not schedule another frame.
    pub fn tick(&mut self, frame_dt_ms: f32) -> bool {
        if !self.initialized {
            return false;
        }
        let Some(tick) = self.clock.advance(frame_dt_ms) else {
            return false;
        };

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.begin_frame(tick, clamp_frame_ms(frame_dt_ms));

        // Resizes apply before update so the frame sees the new viewport
        let resizes: Vec<Viewport> = self
            .input
            .iter()
            .filter_map(|e| match e {
                InputEvent::Resize { width, height } => Some(Viewport::new(*width, *height)),
                _ => None,
            })
            .collect();
        for viewport in resizes {
            self.apply_resize(viewport);
        }

        self.effect.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();
        true
    }

    fn apply_resize(&mut self, viewport: Viewport) {
        if viewport == self.ctx.viewport {
            return;
        }
        if let Err(err) = viewport.validate() {
            log::warn!("resize: {err}");
        }
        self.ctx.viewport = viewport;
        self.effect.resize(&mut self.ctx);
    }

    /// Draw the current state into `surface`.
    pub fn render(&self, surface: &mut dyn Surface) {
        if !self.initialized || self.clock.is_cancelled() {
            return;
        }
        self.effect.render(surface, &self.ctx);
    }

    /// Take the events emitted by the last tick.
    pub fn drain_events(&mut self) -> Vec<FxEvent> {
        std::mem::take(&mut self.ctx.events)
    }

    /// Stop the runner. Every later `tick` returns false.
    pub fn cancel(&mut self) {
        self.clock.cancel();
        self.input.drain();
    }

    pub fn is_cancelled(&self) -> bool {
        self.clock.is_cancelled()
    }

    pub fn viewport(&self) -> Viewport {
        self.ctx.viewport
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn context(&self) -> &EffectContext {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmos_fx::{LaunchSequence, RecordingSurface, StarField};

    fn runner<E: Effect>(effect: E, width: f32, height: f32) -> EffectRunner<E> {
        let mut r = EffectRunner::new(
            effect,
            RunnerConfig {
                seed: 7,
                viewport: Viewport::new(width, height),
            },
        );
        r.init();
        r
    }

    #[test]
    fn tick_before_init_is_ignored() {
        let mut r = EffectRunner::new(StarField::default(), RunnerConfig::default());
        assert!(!r.tick(16.0));
        assert_eq!(r.context().tick, 0);
    }

    #[test]
    fn cancel_stops_ticking_and_drawing() {
        let mut r = runner(StarField::default(), 700.0, 500.0);
        assert!(r.tick(16.0));
        r.cancel();
        assert!(r.is_cancelled());
        assert!(!r.tick(16.0));
        assert_eq!(r.context().tick, 1);

        let mut surface = RecordingSurface::new();
        r.render(&mut surface);
        assert!(surface.is_empty());
    }

    #[test]
    fn pointer_is_last_write_wins() {
        let mut r = runner(StarField::default(), 700.0, 500.0);
        r.pointer_move(10.0, 10.0);
        r.pointer_move(20.0, 30.0);
        r.pointer_move(f32::NAN, 0.0);
        let p = r.context().pointer.position().map(|p| (p.x, p.y));
        assert_eq!(p, Some((20.0, 30.0)));
        r.pointer_leave();
        assert!(!r.context().pointer.is_present());
    }

    #[test]
    fn resize_applies_within_the_frame() {
        let mut r = runner(StarField::default(), 700.0, 500.0);
        assert_eq!(r.effect().field().len(), 100);
        r.push_input(InputEvent::Resize { width: 350.0, height: 500.0 });
        assert!(r.tick(16.0));
        assert_eq!(r.viewport(), Viewport::new(350.0, 500.0));
        assert_eq!(r.effect().field().len(), 50);
    }

    #[test]
    fn input_is_drained_each_frame() {
        let mut r = runner(StarField::default(), 700.0, 500.0);
        r.push_input(InputEvent::Click { x: 1.0, y: 1.0 });
        r.tick(16.0);
        r.tick(16.0);
        assert!(r.input.is_empty());
    }

    #[test]
    fn launch_completes_exactly_once() {
        let mut r = runner(LaunchSequence::default(), 800.0, 600.0);
        let mut completions = 0;
        let mut liftoffs = 0;
        let mut fades = 0;
        let mut steps = Vec::new();
        // 10 s of 16 ms frames is well past the full sequence.
        for _ in 0..625 {
            r.tick(16.0);
            for event in r.drain_events() {
                match event {
                    FxEvent::SequenceComplete => completions += 1,
                    FxEvent::Liftoff => liftoffs += 1,
                    FxEvent::FadeStarted => fades += 1,
                    FxEvent::CountdownStep { step } => steps.push(step),
                    FxEvent::Supernova => {}
                }
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(liftoffs, 1);
        assert_eq!(fades, 1);
        assert_eq!(steps.len(), 10);
        assert!(r.effect().countdown().is_done());
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn renders_into_vector_buffer() {
        let mut r = runner(cosmos_fx::Galaxy::default(), 800.0, 600.0);
        r.tick(16.0);
        let mut surface = cosmos_fx::TessellatingSurface::new();
        r.render(&mut surface);
        assert!(surface.vertex_count() > 0);
    }

    #[test]
    fn huge_frame_deltas_are_clamped() {
        let mut r = runner(LaunchSequence::default(), 800.0, 600.0);
        r.tick(60_000.0);
        assert_eq!(r.context().dt_ms, cosmos_fx::MAX_FRAME_MS);
        assert!(r.drain_events().iter().all(|e| *e != FxEvent::SequenceComplete));
    }
}
