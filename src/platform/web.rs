//! Browser glue (WASM only)
//!
//! requestAnimationFrame scheduling and DOM event adapters.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use super::input::{PointerSample, SurfaceRect};
use crate::game_loop::{FrameHandle, FrameScheduler};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Scheduler backed by `window.requestAnimationFrame`.
///
/// Every request reuses one callback, installed once with
/// [`AnimationFrames::set_callback`].
pub struct AnimationFrames {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrames {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Install the per-frame callback. Receives the frame timestamp.
    pub fn set_callback<F>(&self, f: F)
    where
        F: FnMut(f64) + 'static,
    {
        *self.callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(f));
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let callback = self.callback.borrow();
        let Some(closure) = callback.as_ref() else {
            log::error!("Frame requested before a callback was installed");
            return None;
        };

        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame({}) failed: {:?}", handle.0, e);
        }
    }
}

/// Sample from a `mousemove` event
pub fn mouse_sample(event: &MouseEvent) -> PointerSample {
    PointerSample::from_mouse(event.client_x() as f64, event.client_y() as f64)
}

/// Sample from a `touchmove` event's first touch
pub fn touch_sample(event: &TouchEvent) -> Option<PointerSample> {
    let touches = event.touches();
    PointerSample::from_touches(
        (0..touches.length())
            .filter_map(|i| touches.get(i))
            .map(|t| (t.client_x() as f64, t.client_y() as f64)),
    )
}

/// Canvas bounding box in page coordinates
pub fn surface_rect(canvas: &HtmlCanvasElement) -> SurfaceRect {
    let rect = canvas.get_bounding_client_rect();
    SurfaceRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

/// `window.innerWidth`, or 0 if unavailable
pub fn viewport_width(window: &Window) -> f32 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

/// Whether the browser exposes `navigator.gpu`
pub fn webgpu_available(window: &Window) -> bool {
    js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("gpu"))
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}
