/// Layout primitives: integer rectangles, greedy word wrap, centered line stacks

use image::Rgba;

use crate::rendering::paint::PaintCommand;
use crate::rendering::text::Typeface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build from a `(x0, y0)`-`(x1, y1)` box; inverted boxes collapse to zero size.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: (x1 - x0).max(0) as u32,
            height: (y1 - y0).max(0) as u32,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn inflate(&self, by: u32) -> Self {
        Self {
            x: self.x - by as i32,
            y: self.y - by as i32,
            width: self.width + by * 2,
            height: self.height + by * 2,
        }
    }

    /// Overlap of two rects, `None` when they do not intersect.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::from_corners(x0, y0, x1, y1))
    }
}

/// Greedy word wrap.
///
/// Words are appended to the current line while `measure(line)` stays within
/// `max_width`; the overflowing word starts the next line. A single word wider
/// than `max_width` is kept whole on its own line.
pub fn wrap_text<F>(text: &str, max_width: u32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> u32,
{
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// A run of wrapped lines in one face and color.
#[derive(Debug, Clone)]
pub struct TextBlock<'a> {
    pub lines: &'a [String],
    pub face: &'a Typeface,
    pub px: f32,
    pub color: Rgba<u8>,
    pub line_gap: u32,
}

/// Lay out `block` horizontally centered on `center_x` starting at `top`.
///
/// Returns the text commands and the y coordinate just below the last line
/// (including its trailing gap).
pub fn center_lines(block: &TextBlock<'_>, center_x: i32, top: i32) -> (Vec<PaintCommand>, i32) {
    let mut y = top;
    let mut commands = Vec::with_capacity(block.lines.len());
    for line in block.lines {
        let extent = block.face.measure(line, block.px);
        commands.push(PaintCommand::Text {
            x: center_x - extent.width as i32 / 2,
            y,
            text: line.clone(),
            face: block.face.clone(),
            px: block.px,
            color: block.color,
        });
        y += extent.height as i32 + block.line_gap as i32;
    }
    (commands, y)
}
