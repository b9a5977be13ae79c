pub mod queue;
pub mod pointer;
pub mod heading;

pub use queue::{InputEvent, InputQueue};
pub use pointer::PointerState;
pub use heading::HeadingFollower;
