//! Optional helpers layered on top of the core engine.

pub mod easing;

pub use easing::{Easing, ease, approach, approach_vec2, shortest_angle_delta};
