//! Attaching an effect to a page canvas.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use cosmos_fx::{Effect, FxError, FxEvent, InputEvent};
use js_sys::Function;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

use crate::canvas::{fit_canvas, to_canvas, Canvas2dSurface};
use crate::frame_loop::FrameLoop;
use crate::listeners::ListenerGuard;
use crate::runner::{EffectRunner, RunnerConfig};

static LOGGING: Once = Once::new();

/// Install the panic hook and console logger. Safe to call repeatedly.
pub fn init_logging() {
    LOGGING.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

/// A running effect bound to a canvas.
///
/// Dropping it removes every listener and cancels the frame loop.
pub struct MountedEffect<E: Effect + 'static> {
    runner: Rc<RefCell<EffectRunner<E>>>,
    frame_loop: FrameLoop,
    _listeners: Vec<ListenerGuard>,
}

impl<E: Effect + 'static> MountedEffect<E> {
    /// Stop drawing and ignore further input. Listeners stay registered until drop.
    pub fn stop(&self) {
        self.frame_loop.stop();
        // Skipped if the runner is mid-frame; the stopped loop ends it anyway.
        if let Ok(mut runner) = self.runner.try_borrow_mut() {
            runner.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }
}

/// Mount `effect` on the canvas with id `canvas_id`.
///
/// `on_event` receives `(name, value)` for every engine event; `value` is
/// `undefined` for events without a payload.
pub fn mount<E: Effect + 'static>(
    canvas_id: &str,
    effect: E,
    seed: u64,
    on_event: Option<Function>,
) -> Result<MountedEffect<E>, FxError> {
    init_logging();

    let window = web_sys::window().ok_or_else(|| FxError::Js("no global window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| FxError::Js("no document".into()))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| FxError::ElementNotFound(canvas_id.to_string()))?
        .dyn_into()
        .map_err(|_| FxError::ElementNotFound(canvas_id.to_string()))?;

    let mut surface = Canvas2dSurface::from_canvas(&canvas)?;
    let viewport = fit_canvas(&canvas);
    if let Err(err) = viewport.validate() {
        log::warn!("{canvas_id}: {err}; waiting for a resize");
    }

    let mut runner = EffectRunner::new(effect, RunnerConfig { seed, viewport });
    runner.init();
    let runner = Rc::new(RefCell::new(runner));

    let listeners = register_listeners(&window, &canvas, &runner)?;

    let frame_runner = runner.clone();
    let frame_loop = FrameLoop::start(&window, move |dt_ms| {
        let events = {
            let mut r = frame_runner.borrow_mut();
            if !r.tick(dt_ms) {
                return false;
            }
            r.render(&mut surface);
            r.drain_events()
        };
        if let Some(callback) = &on_event {
            dispatch(callback, &events);
        }
        true
    })?;

    log::info!("{canvas_id}: mounted at {}x{}", viewport.width, viewport.height);
    Ok(MountedEffect {
        runner,
        frame_loop,
        _listeners: listeners,
    })
}

fn register_listeners<E: Effect + 'static>(
    window: &Window,
    canvas: &HtmlCanvasElement,
    runner: &Rc<RefCell<EffectRunner<E>>>,
) -> Result<Vec<ListenerGuard>, FxError> {
    let mut guards = Vec::with_capacity(5);

    // ── Pointer (last write wins) ──
    {
        let (runner, canvas) = (runner.clone(), canvas.clone());
        guards.push(ListenerGuard::new(window, "mousemove", move |e: Event| {
            if let Some(m) = e.dyn_ref::<MouseEvent>() {
                let p = to_canvas(&canvas, m.client_x(), m.client_y());
                runner.borrow_mut().pointer_move(p.x, p.y);
            }
        })?);
    }
    {
        let runner = runner.clone();
        guards.push(ListenerGuard::new(window, "mouseout", move |e: Event| {
            // Only when leaving the page itself.
            let left_page = e
                .dyn_ref::<MouseEvent>()
                .is_some_and(|m| m.related_target().is_none());
            if left_page {
                runner.borrow_mut().pointer_leave();
            }
        })?);
    }

    // ── Queued input ──
    {
        let (runner, target) = (runner.clone(), canvas.clone());
        guards.push(ListenerGuard::new(canvas, "click", move |e: Event| {
            if let Some(m) = e.dyn_ref::<MouseEvent>() {
                let p = to_canvas(&target, m.client_x(), m.client_y());
                runner.borrow_mut().push_input(InputEvent::Click { x: p.x, y: p.y });
            }
        })?);
    }
    {
        let runner = runner.clone();
        guards.push(ListenerGuard::new(window, "keydown", move |e: Event| {
            if let Some(k) = e.dyn_ref::<KeyboardEvent>() {
                runner.borrow_mut().push_input(InputEvent::KeyDown { key_code: k.key_code() });
            }
        })?);
    }
    {
        let (runner, canvas) = (runner.clone(), canvas.clone());
        guards.push(ListenerGuard::new(window, "resize", move |_e: Event| {
            let vp = fit_canvas(&canvas);
            runner.borrow_mut().push_input(InputEvent::Resize {
                width: vp.width,
                height: vp.height,
            });
        })?);
    }

    Ok(guards)
}

fn dispatch(callback: &Function, events: &[FxEvent]) {
    for event in events {
        let name = JsValue::from_str(event.name());
        let value = event.value().map_or(JsValue::UNDEFINED, JsValue::from_f64);
        if let Err(err) = callback.call2(&JsValue::NULL, &name, &value) {
            log::warn!("event callback for '{}' threw: {:?}", event.name(), err);
        }
    }
}
