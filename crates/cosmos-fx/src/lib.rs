pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod extensions;
pub mod scenes;

// Re-export key types at crate root for convenience
pub use api::effect::{Effect, EffectContext};
pub use api::types::{FxEvent, Viewport};
pub use core::error::FxError;
pub use core::time::{FrameClock, StageTimer, MAX_FRAME_MS};
pub use input::queue::{InputEvent, InputQueue};
pub use input::pointer::PointerState;
pub use input::heading::HeadingFollower;
pub use renderer::surface::{Color, Fill, Gradient, GradientStop, Surface};
pub use renderer::recorder::{DrawCommand, RecordingSurface};
pub use systems::rng::Rng;
pub use systems::orbit::{Decoration, Moon, Orbit, OrbitStyle, OrbitingBody};
pub use systems::phase::{PhaseClock, Transition};
pub use systems::countdown::{Countdown, CountdownConfig, CountdownSignal, LaunchStage, StepLabel};
pub use systems::particles::{FieldConfig, LinkConfig, ParticleField, SparkField};
pub use scenes::{
    CursorShip, CursorShipConfig, Galaxy, GalaxyConfig, GalaxyPhase, LaunchConfig,
    LaunchSequence, SolarSystem, SolarSystemConfig, StarField, StarFieldConfig,
};

#[cfg(feature = "vectors")]
pub use renderer::tessellate::{TessellatingSurface, VectorVertex};

// Extensions: easing helpers
pub use extensions::{Easing, ease, approach, approach_vec2, shortest_angle_delta};
