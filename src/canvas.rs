use crate::assets::AssetStore;
use glam::Vec2;
use reveal_core::{Composite, MaskFilter, Surface};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use web_sys as web;

/// `Surface` over a 2D canvas context. Callers draw in CSS pixels; the
/// device pixel ratio is applied as the base transform on every clear and
/// folded into shadow and filter blurs by hand.
pub struct CanvasSurface {
    pub canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    assets: Rc<RefCell<AssetStore>>,
    dpr: f64,
}

impl CanvasSurface {
    pub fn new(
        canvas: web::HtmlCanvasElement,
        ctx: web::CanvasRenderingContext2d,
        assets: Rc<RefCell<AssetStore>>,
    ) -> Self {
        ctx.set_text_baseline("middle");
        ctx.set_text_align("left");
        Self {
            canvas,
            ctx,
            assets,
            dpr: 1.0,
        }
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) {
        self.dpr = dpr;
    }
}

impl Surface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clear(&mut self, width: f32, height: f32) {
        _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_composite(&mut self, op: Composite) {
        _ = self.ctx.set_global_composite_operation(op.as_css());
    }

    fn set_filter(&mut self, filter: Option<MaskFilter>) {
        match filter {
            Some(f) => self.ctx.set_filter(&f.css(self.dpr as f32)),
            None => self.ctx.set_filter("none"),
        }
    }

    // shadowBlur is in bitmap pixels regardless of the transform
    fn set_shadow(&mut self, blur: f32, color: &str) {
        self.ctx.set_shadow_blur(blur as f64 * self.dpr);
        self.ctx.set_shadow_color(color);
    }

    fn fill_circles(&mut self, circles: &[(Vec2, f32)], color: &str) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for (c, r) in circles {
            let (x, y, r) = (c.x as f64, c.y as f64, *r as f64);
            ctx.move_to(x + r, y);
            _ = ctx.arc(x, y, r, 0.0, TAU);
        }
        ctx.set_fill_style_str(color);
        ctx.fill();
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn measure_text(&mut self, text: &str) -> f32 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn draw_image(&mut self, key: &str, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.assets
            .borrow()
            .draw(&self.ctx, key, x as f64, y as f64, w as f64, h as f64)
    }
}
