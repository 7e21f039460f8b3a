//! Browser glue: canvas surface, listeners and the frame loop.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window, window};

use crate::canvas::ZenCanvas;
use crate::config::InkConfig;
use crate::error::{MountError, describe_js};
use crate::oracle::InsightHistory;
use crate::rng::InkRng;
use crate::surface::{InkSurface, Point, QuadCurve, Rgba};

/// Trail text shown before the first insight arrives.
pub const DEFAULT_TRAIL_TEXT: &str = "一花一世界，一叶一菩提。春来花自青，秋至叶飘零。无穷般若心，自在观自在。";
/// Trail text after "clear void".
pub const VOID_TEXT: &str = "虚空。";

const CANVAS_ID: &str = "mz-ink-canvas";

fn warn_on_err(op: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("canvas {op} failed: {}", describe_js(&e));
    }
}

// --- Surface ------------------------------------------------------------------

/// [`InkSurface`] over a 2D canvas context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(MountError::NoContext)?
            .dyn_into()
            .map_err(|_| MountError::NoContext)?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl InkSurface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        warn_on_err("translate", self.ctx.translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        warn_on_err("rotate", self.ctx.rotate(angle));
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        warn_on_err("scale", self.ctx.scale(sx, sy));
    }

    fn set_glow(&mut self, color: Rgba, blur: f64) {
        self.ctx.set_shadow_color(&color.to_css());
        self.ctx.set_shadow_blur(blur);
    }

    fn fill_text(&mut self, text: &str, font: &str, color: Rgba) {
        self.ctx.set_font(font);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_css());
        warn_on_err("fill_text", self.ctx.fill_text(text, 0.0, 0.0));
    }

    fn fill_ellipse(&mut self, center: Point, rx: f64, ry: f64, color: Rgba) {
        self.ctx.begin_path();
        warn_on_err("ellipse", self.ctx.ellipse(center.x, center.y, rx, ry, 0.0, 0.0, TAU));
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba) {
        self.ctx.begin_path();
        warn_on_err("arc", self.ctx.arc(center.x, center.y, radius, 0.0, TAU));
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_curves(&mut self, start: Point, curves: &[QuadCurve], color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(start.x, start.y);
        for c in curves {
            self.ctx.quadratic_curve_to(c.ctrl.x, c.ctrl.y, c.to.x, c.to.y);
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }
}

type SharedCanvas = Rc<RefCell<ZenCanvas<CanvasSurface>>>;

fn viewport_size(win: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    (dim(win.inner_width()), dim(win.inner_height()))
}

// --- Frame loop ---------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling `requestAnimationFrame` task that can be stopped.
struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    fn start(state: SharedCanvas) -> Result<Self, MountError> {
        let win = window().ok_or(MountError::NoWindow)?;
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let next = f.clone();
        let next_handle = handle.clone();
        let alive = running.clone();
        *f.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
            if !alive.get() {
                return;
            }
            state.borrow_mut().tick();
            let Some(w) = window() else { return };
            if let Some(cb) = next.borrow().as_ref() {
                match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => next_handle.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {}", describe_js(&e)),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let id = match f.borrow().as_ref() {
            Some(cb) => win.request_animation_frame(cb.as_ref().unchecked_ref())?,
            None => return Err(MountError::Js("frame callback missing".into())),
        };
        handle.set(Some(id));
        Ok(Self { callback: f, handle, running })
    }

    /// Cancel the pending frame and break the closure's self-reference.
    fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.handle.take(), window()) {
            warn_on_err("cancelAnimationFrame", w.cancel_animation_frame(id));
        }
        self.callback.borrow_mut().take();
    }
}

// --- Mounted canvas -----------------------------------------------------------

/// A live ink canvas bound to a page element.
///
/// Dropping it (or calling `unmount`) removes the listeners and stops the
/// frame loop; mounting again starts a fresh loop.
#[wasm_bindgen]
pub struct InkCanvas {
    state: SharedCanvas,
    history: InsightHistory,
    frame: Option<FrameLoop>,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    canvas: HtmlCanvasElement,
}

#[wasm_bindgen]
impl InkCanvas {
    /// Mount on `#canvas_id`, creating a full-viewport canvas if it does not exist.
    pub fn mount(canvas_id: Option<String>) -> Result<InkCanvas, JsValue> {
        Ok(Self::mount_inner(canvas_id.as_deref(), InkConfig::default())?)
    }

    /// Like `mount`, with tunables overridden from a JSON object string.
    pub fn mount_with_config(canvas_id: Option<String>, config_json: &str) -> Result<InkCanvas, JsValue> {
        let config = InkConfig::from_json(config_json).map_err(MountError::from)?;
        Ok(Self::mount_inner(canvas_id.as_deref(), config)?)
    }

    /// Replace the trail text.
    pub fn set_text(&self, text: &str) {
        self.state.borrow_mut().set_text(text);
    }

    pub fn text(&self) -> String {
        self.state.borrow().text().to_owned()
    }

    /// Replace the trail text with the near-empty void phrase.
    pub fn clear_void(&self) {
        self.set_text(VOID_TEXT);
    }

    /// Remember a freshly generated insight and brush with it.
    pub fn record_insight(&mut self, text: &str) {
        self.history.record(text);
        self.set_text(text);
    }

    /// Insight `index` (0 = newest), if remembered.
    pub fn insight(&self, index: usize) -> Option<String> {
        self.history.get(index).map(str::to_owned)
    }

    pub fn insight_count(&self) -> usize {
        self.history.len()
    }

    /// Brush with a remembered insight again. Returns false if `index` is unknown.
    pub fn apply_insight(&self, index: usize) -> bool {
        match self.history.get(index) {
            Some(text) => {
                self.state.borrow_mut().set_text(text);
                true
            }
            None => false,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.state.borrow().particles().len()
    }

    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    /// Remove listeners and stop the frame loop. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.stop();
            log::info!("ink canvas unmounted");
        }
        if let Some(win) = window() {
            if let Some(cb) = self.on_resize.take() {
                warn_on_err(
                    "removeEventListener(resize)",
                    win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref()),
                );
            }
        }
        if let Some(cb) = self.on_move.take() {
            warn_on_err(
                "removeEventListener(mousemove)",
                self.canvas.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref()),
            );
        }
    }
}

impl InkCanvas {
    fn mount_inner(canvas_id: Option<&str>, config: InkConfig) -> Result<Self, MountError> {
        let win = window().ok_or(MountError::NoWindow)?;
        let doc = win.document().ok_or(MountError::NoDocument)?;
        let id = canvas_id.unwrap_or(CANVAS_ID);

        // Create / reuse the canvas element
        let canvas: HtmlCanvasElement = match doc.get_element_by_id(id) {
            Some(el) => el.dyn_into().map_err(|_| MountError::NotACanvas(id.to_owned()))?,
            None => {
                let c: HtmlCanvasElement = doc
                    .create_element("canvas")?
                    .dyn_into()
                    .map_err(|_| MountError::NotACanvas(id.to_owned()))?;
                c.set_id(id);
                c.set_attribute("style", "position:fixed; inset:0; z-index:0; touch-action:none; background:#050505;")?;
                let body = doc.body().ok_or(MountError::NoDocument)?;
                body.append_child(&c)?;
                c
            }
        };

        let mut core = ZenCanvas::new(CanvasSurface::new(canvas.clone())?, InkRng::from_entropy(), config, DEFAULT_TRAIL_TEXT);
        let (w, h) = viewport_size(&win);
        core.resize(w, h);
        let state: SharedCanvas = Rc::new(RefCell::new(core));

        // Viewport resize keeps the backing store matched to the window
        let on_resize = {
            let state = state.clone();
            Closure::wrap(Box::new(move || {
                if let Some(win) = window() {
                    let (w, h) = viewport_size(&win);
                    state.borrow_mut().resize(w, h);
                }
            }) as Box<dyn FnMut()>)
        };
        win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        // Pointer trail. The canvas covers the viewport, so client coordinates are surface coordinates.
        let on_move = {
            let state = state.clone();
            Closure::wrap(Box::new(move |evt: MouseEvent| {
                state.borrow_mut().pointer_moved(evt.client_x() as f64, evt.client_y() as f64);
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;

        let frame = FrameLoop::start(state.clone())?;
        log::info!("ink canvas mounted on #{id} at {w}x{h}");

        Ok(Self {
            state,
            history: InsightHistory::default(),
            frame: Some(frame),
            on_resize: Some(on_resize),
            on_move: Some(on_move),
            canvas,
        })
    }
}

impl Drop for InkCanvas {
    fn drop(&mut self) {
        self.unmount();
    }
}
