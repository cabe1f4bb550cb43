// Recording surface shared by the compositor and engine tests.

#![allow(dead_code)]

use glam::Vec2;
use reveal_core::{Composite, MaskFilter, Surface};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Save,
    Restore,
    Clear(f32, f32),
    FillRect { x: f32, y: f32, w: f32, h: f32, color: String },
    Alpha(f32),
    Composite(Composite),
    Filter(Option<MaskFilter>),
    Shadow(f32),
    Circles { count: usize, color: String },
    Font(String),
    Text { text: String, x: f32, y: f32 },
    Image { key: String, x: f32, y: f32, w: f32, h: f32 },
}

/// Measures every character as `char_width` pixels.
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    pub char_width: f32,
    pub ready: HashSet<String>,
    pub circles: Vec<(Vec2, f32)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            char_width: 10.0,
            ready: HashSet::new(),
            circles: Vec::new(),
        }
    }

    pub fn with_ready(keys: &[&str]) -> Self {
        let mut s = Self::new();
        s.ready = keys.iter().map(|k| k.to_string()).collect();
        s
    }

    pub fn texts(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn images(&self) -> Vec<(String, f32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Image { key, x, .. } => Some((key.clone(), *x)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn clear(&mut self, width: f32, height: f32) {
        self.ops.push(Op::Clear(width, height));
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ops.push(Op::FillRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(Op::Alpha(alpha));
    }
    fn set_composite(&mut self, op: Composite) {
        self.ops.push(Op::Composite(op));
    }
    fn set_filter(&mut self, filter: Option<MaskFilter>) {
        self.ops.push(Op::Filter(filter));
    }
    fn set_shadow(&mut self, blur: f32, _color: &str) {
        self.ops.push(Op::Shadow(blur));
    }
    fn fill_circles(&mut self, circles: &[(Vec2, f32)], color: &str) {
        self.circles = circles.to_vec();
        self.ops.push(Op::Circles {
            count: circles.len(),
            color: color.to_string(),
        });
    }
    fn set_font(&mut self, font: &str) {
        self.ops.push(Op::Font(font.to_string()));
    }
    fn measure_text(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
    fn fill_text(&mut self, text: &str, x: f32, y: f32, _color: &str) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
    fn draw_image(&mut self, key: &str, x: f32, y: f32, w: f32, h: f32) -> bool {
        if !self.ready.contains(key) {
            return false;
        }
        self.ops.push(Op::Image {
            key: key.to_string(),
            x,
            y,
            w,
            h,
        });
        true
    }
}
