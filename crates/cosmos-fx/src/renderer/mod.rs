pub mod surface;
pub mod recorder;
#[cfg(feature = "vectors")]
pub mod tessellate;

pub use surface::{Color, Fill, Gradient, GradientStop, Surface};
pub use recorder::{DrawCommand, RecordingSurface};
#[cfg(feature = "vectors")]
pub use tessellate::{TessellatingSurface, VectorVertex};
