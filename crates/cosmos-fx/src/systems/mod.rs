pub mod rng;
pub mod particles;
pub mod orbit;
pub mod phase;
pub mod countdown;
