use super::Listener;
use crate::input;
use reveal_core::RevealEngine;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub container: web::HtmlElement,
    pub engine: Rc<RefCell<RevealEngine>>,
    pub resize_pending: Rc<Cell<bool>>,
}

/// Register pointer, touch and resize listeners. Handlers only record raw
/// input; the frame tick consumes it.
pub fn wire_input_handlers(w: &InputWiring) -> Vec<Listener> {
    let target: &web::EventTarget = w.container.as_ref();
    let mut listeners = Vec::with_capacity(5);
    listeners.extend(wire_pointermove(w, target));
    listeners.extend(wire_pointerdown(w, target));
    listeners.extend(wire_touch(w, target, "touchstart", true));
    listeners.extend(wire_touch(w, target, "touchmove", false));
    listeners.extend(wire_resize(w));
    listeners
}

fn wire_pointermove(w: &InputWiring, target: &web::EventTarget) -> Option<Listener> {
    let w = w.clone();
    Listener::new(target, "pointermove", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            let pos = input::pointer_local(ev, &w.container);
            w.engine.borrow_mut().pointer_move(pos);
        }
    })
}

fn wire_pointerdown(w: &InputWiring, target: &web::EventTarget) -> Option<Listener> {
    let w = w.clone();
    Listener::new(target, "pointerdown", move |ev: web::Event| {
        if let Some(ev) = ev.dyn_ref::<web::PointerEvent>() {
            let pos = input::pointer_local(ev, &w.container);
            let instant = input::snaps_on_press(&ev.pointer_type());
            w.engine.borrow_mut().pointer_down(pos, instant);
        }
    })
}

fn wire_touch(
    w: &InputWiring,
    target: &web::EventTarget,
    kind: &'static str,
    instant: bool,
) -> Option<Listener> {
    let w = w.clone();
    Listener::new(target, kind, move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
            return;
        };
        if let Some(pos) = input::touch_local(ev, &w.container) {
            let mut engine = w.engine.borrow_mut();
            if instant {
                engine.pointer_down(pos, true);
            } else {
                engine.pointer_move(pos);
            }
        }
    })
}

fn wire_resize(w: &InputWiring) -> Option<Listener> {
    let window = web::window()?;
    let pending = w.resize_pending.clone();
    Listener::new(window.as_ref(), "resize", move |_ev: web::Event| {
        pending.set(true);
    })
}
