use crate::assets::AssetStore;
use crate::background::MaskedElementLayer;
use crate::canvas::CanvasSurface;
use crate::constants::SECONDARY_KEY;
use crate::dom;
use crate::input;
use instant::Instant;
use reveal_core::{FaultBoundary, LayerFrame, RevealEngine};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<RevealEngine>>,
    pub container: web::HtmlElement,
    pub overlay: CanvasSurface,
    pub mask: Option<CanvasSurface>,
    pub assets: Rc<RefCell<AssetStore>>,
    pub background: Option<FaultBoundary<MaskedElementLayer>>,
    pub cursor: Option<web::HtmlElement>,
    pub resize_pending: Rc<Cell<bool>>,
    pub last_instant: Instant,
    pub elapsed: f32,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if self.resize_pending.replace(false) {
            self.sync_size();
        }

        let fresh = self.assets.borrow_mut().newly_ready();
        let mut engine = self.engine.borrow_mut();
        for (key, aspect) in &fresh {
            engine.set_image_aspect(key, *aspect);
        }

        let report = engine.tick(dt_sec);
        self.elapsed += reveal_core::lag_smooth(dt_sec);
        if report.intro.secondary_started {
            self.assets.borrow().play(SECONDARY_KEY);
        }
        if report.intro.caret_hidden {
            log::debug!("[frame] caret hidden at {:.2}s", self.elapsed);
        }

        engine.render(&mut self.overlay, self.mask.as_mut());

        if let Some(bg) = &mut self.background {
            let (width, height) = engine.size();
            bg.render(&LayerFrame {
                time: self.elapsed,
                width,
                height,
            });
        }

        if let Some(cursor) = &self.cursor {
            let pointer = engine.pointer();
            if pointer.initialized {
                dom::set_style(cursor, "transform", &input::cursor_transform(pointer.smooth));
            }
        }
    }

    /// Re-read the container size and match every canvas to it.
    pub fn sync_size(&mut self) {
        let css = dom::css_size(&self.container);
        let dpr = dom::sync_canvas_backing_size(&self.overlay.canvas, css);
        self.overlay.set_device_pixel_ratio(dpr);
        if let Some(mask) = &mut self.mask {
            let dpr = dom::sync_canvas_backing_size(&mask.canvas, css);
            mask.set_device_pixel_ratio(dpr);
        }
        self.engine.borrow_mut().resize(css.0, css.1);
        log::debug!("[frame] resized to {}x{} @{:.2}", css.0, css.1, dpr);
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running requestAnimationFrame loop. `cancel` stops it and releases the
/// frame context.
pub struct FrameLoop {
    handle: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
    running: Rc<Cell<bool>>,
}

fn request_frame(tick: &TickClosure) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let closure = tick.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

pub fn start_loop(frame_ctx: FrameContext) -> FrameLoop {
    let frame_ctx = Rc::new(RefCell::new(frame_ctx));
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(None));
    let running = Rc::new(Cell::new(true));

    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    let running_clone = running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_clone.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        handle_clone.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));

    handle.set(request_frame(&tick));
    FrameLoop {
        handle,
        tick,
        running,
    }
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the pending frame and drop the tick closure, which also drops
    /// the frame context it owns. Safe to call more than once.
    pub fn cancel(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(window)) = (self.handle.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}
