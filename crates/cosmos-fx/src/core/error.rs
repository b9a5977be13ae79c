/// Errors surfaced while mounting an effect or loading its configuration.
///
/// The per-frame path never produces these: a decorative effect skips work
/// instead of failing.
#[derive(thiserror::Error, Debug)]
pub enum FxError {
    #[error("viewport is empty ({width}x{height})")]
    EmptyViewport { width: f32, height: f32 },

    #[error("2d rendering context unavailable")]
    MissingContext,

    #[error("element `{0}` not found")]
    ElementNotFound(String),

    #[error("invalid effect configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}
