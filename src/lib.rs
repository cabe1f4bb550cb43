#![cfg(target_arch = "wasm32")]
use anyhow::anyhow;
use instant::Instant;
use reveal_core::{FaultBoundary, MaskStrategy, RevealConfig, RevealEngine};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod assets;
mod background;
mod canvas;
mod constants;
mod dataset;
mod dom;
mod events;
mod frame;
mod input;

use assets::AssetStore;
use background::MaskedElementLayer;
use canvas::CanvasSurface;
use constants::*;
use events::Listener;
use frame::{FrameContext, FrameLoop};

thread_local! {
    static ACTIVE: RefCell<Vec<Rc<RefCell<Session>>>> = RefCell::new(Vec::new());
}

/// Everything a mount created, so teardown can undo it in any state of
/// partial setup.
struct Session {
    container: web::HtmlElement,
    engine: Rc<RefCell<RevealEngine>>,
    assets: Rc<RefCell<AssetStore>>,
    listeners: Vec<Listener>,
    frame_loop: Option<FrameLoop>,
    background: Option<MaskedElementLayer>,
    canvases: Vec<web::HtmlCanvasElement>,
    torn_down: bool,
}

impl Session {
    fn new(container: web::HtmlElement, engine: RevealEngine) -> Self {
        Self {
            container,
            engine: Rc::new(RefCell::new(engine)),
            assets: Rc::new(RefCell::new(AssetStore::default())),
            listeners: Vec::new(),
            frame_loop: None,
            background: None,
            canvases: Vec::new(),
            torn_down: false,
        }
    }

    fn setup(&mut self, document: &web::Document, auto_mounted: bool) -> anyhow::Result<()> {
        _ = self.container.set_attribute(MOUNTED_ATTR, "true");
        let reset_attr = self.container.get_attribute(RESET_LAYOUT_ATTR);
        if dataset::wants_layout_reset(auto_mounted, reset_attr.as_deref()) {
            for (property, value) in CONTAINER_RESET {
                dom::set_style(&self.container, property, value);
            }
        }
        let position = dom::computed_style(&self.container, "position").unwrap_or_default();
        if dataset::needs_relative_position(&position) {
            dom::set_style(&self.container, "position", "relative");
        }
        dom::set_style(&self.container, "overflow", "hidden");

        let strategy = self.engine.borrow().config().mask.strategy;
        let background_el = self
            .container
            .get_attribute(BACKGROUND_ID_ATTR)
            .and_then(|id| dom::html_element_by_id(document, &id));

        let mut mask = None;
        if strategy == MaskStrategy::FilterMask {
            match &background_el {
                Some(el) => {
                    let canvas = dom::create_canvas(document, &self.container, MASK_CANVAS_STYLE)?;
                    self.canvases.push(canvas.clone());
                    let ctx = dom::context_2d(&canvas)
                        .ok_or_else(|| anyhow!("mask canvas has no 2d context"))?;
                    let layer = MaskedElementLayer::new(el.clone(), canvas.clone());
                    self.background = Some(layer);
                    mask = Some(CanvasSurface::new(canvas, ctx, self.assets.clone()));
                }
                None => log::warn!(
                    "[reveal] filter strategy without {}; erasing instead",
                    BACKGROUND_ID_ATTR
                ),
            }
        }

        let overlay_canvas = dom::create_canvas(document, &self.container, OVERLAY_CANVAS_STYLE)?;
        self.canvases.push(overlay_canvas.clone());
        let z_index = if mask.is_some() {
            UNDERLAY_Z_INDEX
        } else {
            OVERLAY_Z_INDEX
        };
        dom::set_style(&overlay_canvas, "z-index", z_index);
        let ctx = dom::context_2d(&overlay_canvas)
            .ok_or_else(|| anyhow!("overlay canvas has no 2d context"))?;
        let overlay = CanvasSurface::new(overlay_canvas, ctx, self.assets.clone());

        self.load_assets(document);

        let cursor = self
            .container
            .get_attribute(CURSOR_ID_ATTR)
            .and_then(|id| dom::html_element_by_id(document, &id));

        let resize_pending = Rc::new(Cell::new(false));
        self.listeners = events::pointer::wire_input_handlers(&events::pointer::InputWiring {
            container: self.container.clone(),
            engine: self.engine.clone(),
            resize_pending: resize_pending.clone(),
        });

        let mut frame_ctx = FrameContext {
            engine: self.engine.clone(),
            container: self.container.clone(),
            overlay,
            mask,
            assets: self.assets.clone(),
            background: self
                .background
                .clone()
                .map(|layer| FaultBoundary::new("background", layer)),
            cursor,
            resize_pending,
            last_instant: Instant::now(),
            elapsed: 0.0,
        };
        frame_ctx.sync_size();
        self.frame_loop = Some(frame::start_loop(frame_ctx));
        Ok(())
    }

    fn load_assets(&mut self, document: &web::Document) {
        let mut assets = self.assets.borrow_mut();
        if let Some(src) = self.container.get_attribute(LOGO_SRC_ATTR) {
            if let Err(e) = assets.load_image(LOGO_KEY, &src) {
                log::warn!("[reveal] {:?}", e);
            }
        }
        let secondary = match self.container.get_attribute(VIDEO_SRC_ATTR) {
            Some(src) => assets.load_video(document, SECONDARY_KEY, &src),
            None => match self.container.get_attribute(SECONDARY_SRC_ATTR) {
                Some(src) => assets.load_image(SECONDARY_KEY, &src),
                None => Ok(()),
            },
        };
        if let Err(e) = secondary {
            log::warn!("[reveal] {:?}", e);
        }
    }

    /// Undo the mount. Returns `false` when already torn down.
    fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.listeners.clear();
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.cancel();
        }
        self.engine.borrow_mut().teardown();
        self.assets.borrow_mut().release();
        if let Some(layer) = self.background.take() {
            layer.clear();
        }
        for canvas in self.canvases.drain(..) {
            canvas.remove();
        }
        _ = self.container.remove_attribute(MOUNTED_ATTR);
        log::info!("[reveal] destroyed");
        true
    }
}

/// Handle returned to JavaScript by `mountReveal`.
#[wasm_bindgen]
pub struct RevealHandle {
    session: Rc<RefCell<Session>>,
}

#[wasm_bindgen]
impl RevealHandle {
    /// Stop the animation and remove everything the mount added. Calling it
    /// again does nothing.
    pub fn destroy(&self) {
        self.session.borrow_mut().teardown();
        ACTIVE.with(|active| {
            active
                .borrow_mut()
                .retain(|s| !Rc::ptr_eq(s, &self.session))
        });
    }
}

fn read_config(container: &web::HtmlElement) -> RevealConfig {
    let mut cfg = RevealConfig::hero();
    let pairs = dataset::OVERRIDE_KEYS.iter().filter_map(|key| {
        container
            .get_attribute(&format!("data-{key}"))
            .map(|value| (*key, value))
    });
    for rejected in dataset::apply_overrides(&mut cfg, pairs) {
        log::warn!("[reveal] ignoring override: {}", rejected);
    }
    cfg
}

fn build_engine(container: &web::HtmlElement) -> anyhow::Result<RevealEngine> {
    match RevealEngine::new(read_config(container)) {
        Ok(engine) => Ok(engine),
        Err(e) => {
            log::warn!("[reveal] invalid configuration ({}); using defaults", e);
            RevealEngine::new(RevealConfig::hero()).map_err(|e| anyhow!("{}", e))
        }
    }
}

fn mount(container: web::HtmlElement, auto_mounted: bool) -> Option<Rc<RefCell<Session>>> {
    if container.get_attribute(MOUNTED_ATTR).as_deref() == Some("true") {
        log::info!("[reveal] {} already mounted", container.id());
        return None;
    }
    let document = dom::window_document()?;
    let engine = match build_engine(&container) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("[reveal] {:?}", e);
            return None;
        }
    };
    let mut session = Session::new(container, engine);
    if let Err(e) = session.setup(&document, auto_mounted) {
        log::error!("[reveal] mount failed: {:?}", e);
        session.teardown();
        return None;
    }
    log::info!("[reveal] mounted into #{}", session.container.id());
    let session = Rc::new(RefCell::new(session));
    ACTIVE.with(|active| active.borrow_mut().push(session.clone()));
    Some(session)
}

/// Mount into the element with the given id.
#[wasm_bindgen(js_name = mountReveal)]
pub fn mount_reveal(id: &str) -> Option<RevealHandle> {
    let Some(container) = dom::window_document().and_then(|d| dom::html_element_by_id(&d, id))
    else {
        log::warn!("[reveal] no element #{}", id);
        return None;
    };
    mount(container, false).map(|session| RevealHandle { session })
}

/// Tear down every active mount.
#[wasm_bindgen(js_name = destroyReveal)]
pub fn destroy_reveal() {
    let sessions = ACTIVE.with(|active| std::mem::take(&mut *active.borrow_mut()));
    for session in sessions {
        session.borrow_mut().teardown();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("reveal-web starting");

    match dom::window_document().and_then(|d| dom::html_element_by_id(&d, MOUNT_ID)) {
        Some(container) => {
            mount(container, true);
        }
        None => log::warn!("[reveal] no #{} container; nothing mounted", MOUNT_ID),
    }
    Ok(())
}
