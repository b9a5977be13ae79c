pub mod star;
pub mod field;
pub mod links;
pub mod sparks;

pub use star::{Star, Population, glow_radius};
pub use field::{FieldConfig, ParticleField};
pub use links::{Link, LinkConfig, link_alpha, proximity_links, render_links};
pub use sparks::{BurstEmitter, Spark, SparkDynamics, SparkField};
