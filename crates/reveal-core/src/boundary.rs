//! Fault isolation for the background visual layer.
//!
//! The layer beneath the mask belongs to the host page and may fail. A
//! failure is logged once, the layer is switched off, and the particle/mask
//! engine keeps running.

use std::fmt::Debug;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayerFrame {
    pub time: f32,
    pub width: f32,
    pub height: f32,
}

pub trait BackgroundLayer {
    type Error: Debug;

    fn render(&mut self, frame: &LayerFrame) -> Result<(), Self::Error>;
}

pub struct FaultBoundary<L> {
    layer: L,
    name: &'static str,
    faulted: bool,
}

impl<L: BackgroundLayer> FaultBoundary<L> {
    pub fn new(name: &'static str, layer: L) -> Self {
        Self {
            layer,
            name,
            faulted: false,
        }
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn layer_mut(&mut self) -> &mut L {
        &mut self.layer
    }

    /// Render the wrapped layer. Returns whether anything was rendered.
    pub fn render(&mut self, frame: &LayerFrame) -> bool {
        if self.faulted {
            return false;
        }
        match self.layer.render(frame) {
            Ok(()) => true,
            Err(e) => {
                log::error!("[boundary] {} failed, disabling layer: {:?}", self.name, e);
                self.faulted = true;
                false
            }
        }
    }
}
