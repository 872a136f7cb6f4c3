use folio_core::Host;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

use crate::surface::CanvasSurface;

/// Callbacks the host hands to the browser. Built by the owner of the driver,
/// since each one has to reach back into it.
pub struct Callbacks {
    pub on_frame: Closure<dyn FnMut()>,
    pub on_resize: Closure<dyn FnMut()>,
    pub on_pointer: Closure<dyn FnMut(MouseEvent)>,
}

/// [`Host`] for a browser window: `requestAnimationFrame` scheduling and
/// window-level `resize` / `mousemove` listeners.
pub struct BrowserHost {
    window: Window,
    surface: CanvasSurface,
    callbacks: Option<Callbacks>,
    listening: bool,
}

impl BrowserHost {
    pub fn new(window: Window, surface: CanvasSurface) -> Self {
        Self {
            window,
            surface,
            callbacks: None,
            listening: false,
        }
    }

    pub fn bind(&mut self, callbacks: Callbacks) {
        self.callbacks = Some(callbacks);
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    fn dimension(value: Result<JsValue, JsValue>) -> f64 {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    }
}

impl Host for BrowserHost {
    type Frame = i32;
    type Surface = CanvasSurface;

    fn viewport(&self) -> (f64, f64) {
        (
            Self::dimension(self.window.inner_width()),
            Self::dimension(self.window.inner_height()),
        )
    }

    fn surface(&mut self) -> &mut CanvasSurface {
        &mut self.surface
    }

    fn request_frame(&mut self) -> i32 {
        let Some(callbacks) = &self.callbacks else {
            return 0;
        };

        match self
            .window
            .request_animation_frame(callbacks.on_frame.as_ref().unchecked_ref())
        {
            Ok(handle) => handle,
            Err(err) => {
                console_log!("requestAnimationFrame failed: {:?}", err);
                0
            }
        }
    }

    fn cancel_frame(&mut self, frame: i32) {
        if let Err(err) = self.window.cancel_animation_frame(frame) {
            console_log!("cancelAnimationFrame failed: {:?}", err);
        }
    }

    fn attach_listeners(&mut self) {
        let Some(callbacks) = &self.callbacks else {
            return;
        };
        if self.listening {
            return;
        }

        let resize = self.window.add_event_listener_with_callback(
            "resize",
            callbacks.on_resize.as_ref().unchecked_ref(),
        );
        let pointer = self.window.add_event_listener_with_callback(
            "mousemove",
            callbacks.on_pointer.as_ref().unchecked_ref(),
        );

        if let Err(err) = resize.and(pointer) {
            console_log!("failed to attach listeners: {:?}", err);
        }
        self.listening = true;
    }

    fn detach_listeners(&mut self) {
        let Some(callbacks) = &self.callbacks else {
            return;
        };
        if !self.listening {
            return;
        }

        let resize = self.window.remove_event_listener_with_callback(
            "resize",
            callbacks.on_resize.as_ref().unchecked_ref::<js_sys::Function>(),
        );
        let pointer = self.window.remove_event_listener_with_callback(
            "mousemove",
            callbacks.on_pointer.as_ref().unchecked_ref::<js_sys::Function>(),
        );

        if let Err(err) = resize.and(pointer) {
            console_log!("failed to detach listeners: {:?}", err);
        }
        self.listening = false;
    }
}
