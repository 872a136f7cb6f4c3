use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::{Driver, FieldConfig};
use rand::rngs::ThreadRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (crate::log(&format_args!($($t)*).to_string()))
}

pub mod host;
pub mod surface;

use host::{BrowserHost, Callbacks};
use surface::CanvasSurface;

type FieldDriver = Driver<BrowserHost, ThreadRng>;

/// Animated particle background drawn on a full-viewport canvas.
///
/// `start()` on mount, `stop()` on unmount. Once stopped the background stays
/// inert; mount a new instance to show it again.
#[wasm_bindgen]
pub struct ParticleBackground {
    driver: Rc<RefCell<FieldDriver>>,
}

#[wasm_bindgen]
impl ParticleBackground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<ParticleBackground, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        // Fixed backdrop layer that never takes pointer input.
        let style = canvas.style();
        style.set_property("position", "fixed")?;
        style.set_property("inset", "0")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("z-index", "0")?;
        style.set_property("opacity", "0.6")?;

        let surface = CanvasSurface::new(canvas)?;
        let host = BrowserHost::new(window, surface);
        let driver = Rc::new(RefCell::new(Driver::new(
            host,
            rand::thread_rng(),
            FieldConfig::default(),
        )));

        let callbacks = callbacks(Rc::downgrade(&driver));
        driver.borrow_mut().host_mut().bind(callbacks);

        Ok(ParticleBackground { driver })
    }

    pub fn start(&self) -> bool {
        let mut driver = self.driver.borrow_mut();
        let started = driver.start();
        if started {
            console_log!(
                "Particle background started with {} agents",
                driver.agents().len()
            );
        }
        started
    }

    pub fn stop(&self) -> bool {
        let mut driver = self.driver.borrow_mut();
        let frames = driver.frame_count();
        let stopped = driver.stop();
        if stopped {
            console_log!("Particle background stopped after {} frames", frames);
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.driver.borrow().is_running()
    }

    pub fn is_listening(&self) -> bool {
        self.driver.borrow().host().is_listening()
    }

    pub fn agent_count(&self) -> usize {
        self.driver.borrow().agents().len()
    }

    pub fn frame_count(&self) -> u64 {
        self.driver.borrow().frame_count()
    }
}

/// Browser callbacks holding only a weak handle, so a dropped background
/// cannot be revived by a late event.
fn callbacks(driver: Weak<RefCell<FieldDriver>>) -> Callbacks {
    let frame_driver = driver.clone();
    let on_frame = Closure::<dyn FnMut()>::new(move || {
        if let Some(driver) = frame_driver.upgrade() {
            driver.borrow_mut().tick();
        }
    });

    let resize_driver = driver.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        if let Some(driver) = resize_driver.upgrade() {
            let mut driver = driver.borrow_mut();
            driver.resize();
            console_log!("Resized, {} agents", driver.agents().len());
        }
    });

    let on_pointer = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
        if let Some(driver) = driver.upgrade() {
            driver
                .borrow_mut()
                .pointer_moved(event.client_x() as f64, event.client_y() as f64);
        }
    });

    Callbacks {
        on_frame,
        on_resize,
        on_pointer,
    }
}
