//! Inline flow layout for the hero content: logo, words, logo.
//!
//! Segments flow left to right and wrap at the maximum width; each line is
//! centred horizontally (trailing gap trimmed) and the block is centred
//! vertically. Everything here is a pure function of its inputs.

use smallvec::SmallVec;
use std::ops::Range;

#[derive(Clone, Debug, PartialEq)]
pub enum InlineSegment {
    Image { key: String, aspect: f32 },
    Word { text: String, width: f32, chars: Range<usize> },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    pub container_width: f32,
    pub container_height: f32,
    pub max_width: f32,
    pub font_size: f32,
    pub gap: f32,
    pub line_height: f32,
    pub image_height: f32,
    /// Aspect used for images that have not reported a usable one.
    pub fallback_aspect: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    Image { key: String },
    Word { text: String, chars: Range<usize> },
}

/// A positioned block. `y` is the top of the block.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutElement {
    pub kind: ElementKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub line: usize,
}

impl LayoutElement {
    pub fn center_y(&self) -> f32 {
        self.y + self.height * 0.5
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineLayout {
    pub elements: Vec<LayoutElement>,
    pub line_count: usize,
    pub font_size: f32,
    pub block_height: f32,
}

impl InlineLayout {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &LayoutElement> {
        self.elements
            .iter()
            .filter(|e| matches!(e.kind, ElementKind::Word { .. }))
    }
}

fn render_width(seg: &InlineSegment, p: &LayoutParams) -> f32 {
    match seg {
        InlineSegment::Image { aspect, .. } => {
            let aspect = if aspect.is_finite() && *aspect > 0.0 {
                *aspect
            } else {
                p.fallback_aspect
            };
            p.image_height * aspect
        }
        InlineSegment::Word { width, .. } => width.max(0.0),
    }
}

struct Placed {
    seg: usize,
    x: f32,
    width: f32,
}

pub fn compute_inline_layout(segments: &[InlineSegment], p: &LayoutParams) -> InlineLayout {
    let degenerate = !(p.container_width > 0.0
        && p.container_height > 0.0
        && p.max_width > 0.0
        && p.font_size > 0.0
        && p.line_height > 0.0);
    if degenerate || segments.is_empty() {
        return InlineLayout {
            font_size: p.font_size.max(0.0),
            ..InlineLayout::default()
        };
    }

    let mut lines: Vec<SmallVec<[Placed; 8]>> = vec![SmallVec::new()];
    let mut cursor_x = 0.0f32;
    for (i, seg) in segments.iter().enumerate() {
        let w = render_width(seg, p);
        let line_empty = lines.last().map_or(true, |l| l.is_empty());
        if !line_empty && cursor_x + w > p.max_width {
            lines.push(SmallVec::new());
            cursor_x = 0.0;
        }
        if let Some(line) = lines.last_mut() {
            line.push(Placed {
                seg: i,
                x: cursor_x,
                width: w,
            });
        }
        cursor_x += w + p.gap;
    }

    let block_height = lines.len() as f32 * p.line_height;
    let top = (p.container_height - block_height) * 0.5;
    let mut elements = Vec::with_capacity(segments.len());
    for (li, line) in lines.iter().enumerate() {
        let line_width = line.last().map_or(0.0, |last| last.x + last.width);
        let offset_x = (p.container_width - line_width) * 0.5;
        let line_top = top + li as f32 * p.line_height;
        for placed in line {
            let (kind, height) = match &segments[placed.seg] {
                InlineSegment::Image { key, .. } => {
                    (ElementKind::Image { key: key.clone() }, p.image_height)
                }
                InlineSegment::Word { text, chars, .. } => (
                    ElementKind::Word {
                        text: text.clone(),
                        chars: chars.clone(),
                    },
                    p.line_height,
                ),
            };
            elements.push(LayoutElement {
                kind,
                x: offset_x + placed.x,
                y: line_top + (p.line_height - height) * 0.5,
                width: placed.width,
                height,
                line: li,
            });
        }
    }

    InlineLayout {
        elements,
        line_count: lines.len(),
        font_size: p.font_size,
        block_height,
    }
}

/// Split `text` into word segments framed by optional lead/trail images.
///
/// Character ranges index into the words re-joined with single spaces, which
/// is the string the typewriter counts through.
pub fn build_segments(
    text: &str,
    lead: Option<(&str, f32)>,
    trail: Option<(&str, f32)>,
    mut measure: impl FnMut(&str) -> f32,
) -> Vec<InlineSegment> {
    let mut segments = Vec::new();
    if let Some((key, aspect)) = lead {
        segments.push(InlineSegment::Image {
            key: key.to_string(),
            aspect,
        });
    }
    let mut offset = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        segments.push(InlineSegment::Word {
            text: word.to_string(),
            width: measure(word),
            chars: offset..offset + len,
        });
        offset += len + 1;
    }
    if let Some((key, aspect)) = trail {
        segments.push(InlineSegment::Image {
            key: key.to_string(),
            aspect,
        });
    }
    segments
}
