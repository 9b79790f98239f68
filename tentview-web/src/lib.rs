//! Tentview Web - canvas embed for the tent illustration.
//!
//! Mounts on a 2D canvas, wires pointer listeners, and drives a
//! self-rescheduling requestAnimationFrame loop. Teardown is explicit:
//! `unmount` cancels the pending frame and removes the listeners, so no
//! callback ever runs against a surface that is gone.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use tentview_core::{DrawSurface, Rgba, TentViewer, ViewerConfig};

/// Elapsed milliseconds equal to one nominal tick
const FRAME_MS: f64 = 1000.0 / 60.0;

/// 2D canvas implementation of the core draw surface
struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl CanvasSurface {
    fn trace(&self, points: &[(f32, f32)], close: bool) {
        self.context.begin_path();
        self.context.move_to(points[0].0 as f64, points[0].1 as f64);
        for &(x, y) in &points[1..] {
            self.context.line_to(x as f64, y as f64);
        }
        if close {
            self.context.close_path();
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.context
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        self.trace(points, true);
        self.context.set_fill_style_str(&color.css());
        self.context.fill();
    }

    fn stroke_path(&mut self, points: &[(f32, f32)], color: Rgba, width: f32, closed: bool) {
        if points.len() < 2 {
            return;
        }
        self.trace(points, closed);
        self.context.set_stroke_style_str(&color.css());
        self.context.set_line_width(width as f64);
        self.context.stroke();
    }
}

/// State shared between the frame loop and the pointer listeners.
/// Everything runs on the browser's single main thread.
struct Inner {
    viewer: TentViewer,
    surface: Option<CanvasSurface>,
    raf_id: Option<i32>,
    last_timestamp: Option<f64>,
    active: bool,
}

#[wasm_bindgen]
pub struct TentWidget {
    inner: Rc<RefCell<Inner>>,
    canvas: Option<HtmlCanvasElement>,
    frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
    listeners: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
}

#[wasm_bindgen]
impl TentWidget {
    /// Create a widget from a named preset (defaults to "classic")
    #[wasm_bindgen(constructor)]
    pub fn new(preset: Option<String>) -> Result<TentWidget, JsValue> {
        let name = preset.unwrap_or_else(|| "classic".to_string());
        let config = ViewerConfig::preset(&name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown preset: {name}")))?;

        Ok(TentWidget {
            inner: Rc::new(RefCell::new(Inner {
                viewer: TentViewer::new(config),
                surface: None,
                raf_id: None,
                last_timestamp: None,
                active: false,
            })),
            canvas: None,
            frame: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        })
    }

    /// Names of the shipped presets, for host toolbars
    pub fn preset_names() -> Vec<String> {
        ViewerConfig::PRESET_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Attach to the canvas with the given id and start the frame loop.
    ///
    /// Quietly does nothing when the element is not in the document yet;
    /// the host simply calls again on its next mount pass.
    pub fn mount(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        if self.canvas.is_some() {
            return Ok(());
        }
        let Some(window) = web_sys::window() else {
            return Ok(());
        };
        let Some(document) = window.document() else {
            return Ok(());
        };
        let Some(element) = document.get_element_by_id(canvas_id) else {
            return Ok(());
        };

        let canvas: HtmlCanvasElement = element
            .dyn_into()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        {
            let mut inner = self.inner.borrow_mut();
            inner.surface = Some(CanvasSurface {
                context,
                width: canvas.width() as f32,
                height: canvas.height() as f32,
            });
            inner.active = true;
            inner.last_timestamp = None;
        }

        self.wire_pointer_listeners(&canvas)?;
        self.canvas = Some(canvas);
        self.start_loop()
    }

    /// Stop the frame loop and detach from the canvas. After this returns,
    /// no frame callback or listener will run again.
    pub fn unmount(&mut self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.active = false;
            inner.surface = None;
            if let Some(id) = inner.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
        }
        if let Some(canvas) = self.canvas.take() {
            for (name, closure) in self.listeners.drain(..) {
                let _ = canvas
                    .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
        }
        self.frame.borrow_mut().take();
    }

    pub fn toggle_auto_rotate(&self) {
        self.inner.borrow_mut().viewer.toggle_auto_rotate();
    }

    pub fn reset_view(&self) {
        self.inner.borrow_mut().viewer.reset_view();
    }

    /// Read-only spin flag for the host's pause/play icon
    #[wasm_bindgen(getter)]
    pub fn is_auto_rotating(&self) -> bool {
        self.inner.borrow().viewer.is_auto_rotating()
    }

    fn wire_pointer_listeners(&mut self, canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
        let on_down = {
            let inner = self.inner.clone();
            Closure::wrap(Box::new(move |ev: MouseEvent| {
                inner
                    .borrow_mut()
                    .viewer
                    .pointer_down(ev.client_x() as f32, ev.client_y() as f32);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let on_move = {
            let inner = self.inner.clone();
            Closure::wrap(Box::new(move |ev: MouseEvent| {
                inner
                    .borrow_mut()
                    .viewer
                    .pointer_move(ev.client_x() as f32, ev.client_y() as f32);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let on_up = {
            let inner = self.inner.clone();
            Closure::wrap(Box::new(move |_: MouseEvent| {
                inner.borrow_mut().viewer.pointer_up();
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let on_leave = {
            let inner = self.inner.clone();
            Closure::wrap(Box::new(move |_: MouseEvent| {
                inner.borrow_mut().viewer.pointer_leave();
            }) as Box<dyn FnMut(MouseEvent)>)
        };

        for (name, closure) in [
            ("mousedown", on_down),
            ("mousemove", on_move),
            ("mouseup", on_up),
            ("mouseleave", on_leave),
        ] {
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            self.listeners.push((name, closure));
        }
        Ok(())
    }

    fn start_loop(&mut self) -> Result<(), JsValue> {
        let inner = self.inner.clone();
        let frame = self.frame.clone();

        *self.frame.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            let mut state = inner.borrow_mut();
            if !state.active {
                return;
            }

            // Scale elapsed time to nominal-frame units so the spin speed
            // does not depend on the display refresh rate
            let dt = match state.last_timestamp {
                Some(previous) => ((timestamp - previous) / FRAME_MS) as f32,
                None => 1.0,
            };
            state.last_timestamp = Some(timestamp);

            state.viewer.tick(dt);
            let Inner {
                viewer, surface, ..
            } = &mut *state;
            if let Some(surface) = surface {
                viewer.render(surface);
            }

            // Re-arm; the id is kept so teardown can cancel the pending frame
            if let Some(window) = web_sys::window() {
                if let Some(callback) = frame.borrow().as_ref() {
                    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                        Ok(id) => state.raf_id = Some(id),
                        Err(_) => state.active = false,
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let frame_ref = self.frame.borrow();
        let callback = frame_ref
            .as_ref()
            .ok_or_else(|| JsValue::from_str("frame closure missing"))?;
        let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        drop(frame_ref);
        self.inner.borrow_mut().raf_id = Some(id);
        Ok(())
    }
}
