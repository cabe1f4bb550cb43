use crate::dom;
use anyhow::anyhow;
use reveal_core::{BackgroundLayer, LayerFrame};
use web_sys as web;

/// Background element owned by the page (shader, video, image) revealed
/// through the filter mask: each frame the mask canvas becomes its CSS
/// `mask-image`.
#[derive(Clone)]
pub struct MaskedElementLayer {
    element: web::HtmlElement,
    mask_canvas: web::HtmlCanvasElement,
}

impl MaskedElementLayer {
    pub fn new(element: web::HtmlElement, mask_canvas: web::HtmlCanvasElement) -> Self {
        dom::set_style(&element, "mask-size", "100% 100%");
        dom::set_style(&element, "-webkit-mask-size", "100% 100%");
        Self {
            element,
            mask_canvas,
        }
    }

    /// Drop the mask so the element is left as the page had it.
    pub fn clear(&self) {
        let style = self.element.style();
        for prop in [
            "mask-image",
            "-webkit-mask-image",
            "mask-size",
            "-webkit-mask-size",
        ] {
            _ = style.remove_property(prop);
        }
    }
}

impl BackgroundLayer for MaskedElementLayer {
    type Error = anyhow::Error;

    fn render(&mut self, _frame: &LayerFrame) -> anyhow::Result<()> {
        if !self.element.is_connected() {
            return Err(anyhow!("background element detached from the document"));
        }
        let url = self
            .mask_canvas
            .to_data_url()
            .map_err(|e| anyhow!("mask to_data_url: {:?}", e))?;
        let value = format!("url({url})");
        let style = self.element.style();
        style
            .set_property("mask-image", &value)
            .map_err(|e| anyhow!("mask-image: {:?}", e))?;
        style
            .set_property("-webkit-mask-image", &value)
            .map_err(|e| anyhow!("-webkit-mask-image: {:?}", e))?;
        Ok(())
    }
}
