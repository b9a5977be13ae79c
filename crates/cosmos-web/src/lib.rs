pub mod bindings;
pub mod canvas;
pub mod frame_loop;
pub mod listeners;
pub mod mount;
pub mod runner;

pub use canvas::Canvas2dSurface;
pub use frame_loop::FrameLoop;
pub use listeners::ListenerGuard;
pub use mount::{init_logging, mount, MountedEffect};
pub use runner::{EffectRunner, RunnerConfig};

use cosmos_fx::FxError;
use wasm_bindgen::JsValue;

pub(crate) fn js_error(value: JsValue) -> FxError {
    FxError::Js(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// Convert an engine error into a thrown JS `Error`.
pub fn to_js(err: FxError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Generate a `#[wasm_bindgen]` class that mounts one effect on a canvas.
///
/// The effect type must provide `Default` and `from_json(&str)`.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// cosmos_web::export_effect!(StarField, cosmos_fx::StarField, "star-field");
/// ```
///
/// From JS:
///
/// ```text
/// const fx = new StarField("bg", null, 42, (name, value) => { ... });
/// fx.stop();
/// ```
///
/// # Arguments
///
/// - `$class`: name of the generated JS class
/// - `$effect_type`: type implementing `cosmos_fx::Effect`
/// - `$label`: string literal used in log messages
/// - optional `default = <expr>`: effect used when no JSON config is given
#[macro_export]
macro_rules! export_effect {
    ($class:ident, $effect_type:ty, $label:literal) => {
        $crate::export_effect!($class, $effect_type, $label, default = <$effect_type>::default());
    };

    ($class:ident, $effect_type:ty, $label:literal, default = $default:expr) => {
        #[wasm_bindgen]
        pub struct $class {
            inner: $crate::MountedEffect<$effect_type>,
        }

        #[wasm_bindgen]
        impl $class {
            /// Mount on the canvas with id `canvas_id`. `config_json` overrides
            /// the defaults; `on_event(name, value)` receives engine events.
            #[wasm_bindgen(constructor)]
            pub fn new(
                canvas_id: &str,
                config_json: Option<String>,
                seed: u32,
                on_event: Option<js_sys::Function>,
            ) -> Result<$class, wasm_bindgen::JsValue> {
                let effect: $effect_type = match config_json.as_deref() {
                    Some(json) => <$effect_type>::from_json(json).map_err($crate::to_js)?,
                    None => $default,
                };
                let inner = $crate::mount(canvas_id, effect, seed as u64, on_event)
                    .map_err($crate::to_js)?;
                log::info!("{}: started on #{}", $label, canvas_id);
                Ok(Self { inner })
            }

            /// Stop the animation. Listeners are removed when the object is freed.
            pub fn stop(&self) {
                self.inner.stop();
            }

            #[wasm_bindgen(getter)]
            pub fn running(&self) -> bool {
                self.inner.is_running()
            }
        }
    };
}
