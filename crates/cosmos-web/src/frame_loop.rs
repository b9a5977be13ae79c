use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cosmos_fx::FxError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::js_error;

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` loop.
///
/// The frame closure receives the delta since the previous callback in
/// milliseconds (0 on the first frame) and returns whether to keep running.
/// The loop reschedules itself until the closure returns false, `stop` is
/// called, or the loop is dropped.
pub struct FrameLoop {
    window: Window,
    callback: Rc<RefCell<Option<FrameCallback>>>,
    handle: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start(window: &Window, mut frame: impl FnMut(f32) -> bool + 'static) -> Result<Self, FxError> {
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let last = Cell::new(None::<f64>);
        let (cb, h, run, win) = (callback.clone(), handle.clone(), running.clone(), window.clone());
        let closure = Closure::wrap(Box::new(move |now: f64| {
            h.set(None);
            if !run.get() {
                return;
            }
            let dt = last.replace(Some(now)).map_or(0.0, |prev| now - prev);
            if !frame(dt as f32) {
                run.set(false);
                return;
            }
            // `frame` may have stopped the loop through a host callback.
            if !run.get() {
                return;
            }
            if let Some(cb) = cb.borrow().as_ref() {
                match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => h.set(Some(id)),
                    Err(err) => {
                        log::warn!("frame loop halted: {:?}", err);
                        run.set(false);
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        handle.set(Some(id));
        *callback.borrow_mut() = Some(closure);

        Ok(Self {
            window: window.clone(),
            callback,
            handle,
            running,
        })
    }

    /// Cancel the pending frame. The loop cannot be restarted.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.handle.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::debug!("cancel_animation_frame failed: {:?}", err);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        // Break the closure's reference back to its own slot.
        self.callback.borrow_mut().take();
    }
}
