/// Paint command set and the decorative backdrop built from it

use image::{Rgba, RgbaImage};

use crate::rendering::layout::Rect;
use crate::rendering::raster::rasterize;
use crate::rendering::text::Typeface;
use crate::rendering::hex_rgba;
use crate::Result;

/// Weight of the horizontal gradient when blended over the vertical one.
const CROSS_GRADIENT_WEIGHT: f32 = 0.34;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    RoundedRect { rect: Rect, radius: f32 },
    Ellipse { rect: Rect },
}

impl Shape {
    pub fn rounded(rect: Rect, radius: f32) -> Self {
        Shape::RoundedRect { rect, radius }
    }

    pub fn bounds(&self) -> Rect {
        match *self {
            Shape::RoundedRect { rect, .. } | Shape::Ellipse { rect } => rect,
        }
    }
}

#[derive(Debug, Clone)]
pub enum PaintCommand {
    /// Anti-aliased solid fill.
    Fill { shape: Shape, color: Rgba<u8> },
    /// Outline of `width` pixels centered on the shape edge.
    Stroke {
        shape: Shape,
        color: Rgba<u8>,
        width: f32,
    },
    /// Shape filled then gaussian-blurred; shadows and glows.
    Blurred {
        shape: Shape,
        color: Rgba<u8>,
        sigma: f32,
    },
    /// Composite an image at a position, optionally rounding its corners.
    Image {
        image: RgbaImage,
        x: i32,
        y: i32,
        corner_radius: Option<f32>,
    },
    /// One line of text with its top-left corner at (x, y).
    Text {
        x: i32,
        y: i32,
        text: String,
        face: Typeface,
        px: f32,
        color: Rgba<u8>,
    },
}

/// Render the two-gradient, two-glow backdrop for a four-color palette.
///
/// `palette[0] -> palette[1]` runs top to bottom, `palette[2] -> palette[3]`
/// left to right; the result is opaque.
pub fn backdrop(width: u32, height: u32, palette: &[&str; 4]) -> Result<RgbaImage> {
    let c = [
        hex_rgba(palette[0])?,
        hex_rgba(palette[1])?,
        hex_rgba(palette[2])?,
        hex_rgba(palette[3])?,
    ];

    let mut canvas = RgbaImage::from_fn(width, height, |x, y| {
        let tv = ramp(y, height);
        let th = ramp(x, width);
        let mut px = [0u8; 4];
        for i in 0..3 {
            let vertical = lerp(c[0][i], c[1][i], tv);
            let horizontal = lerp(c[2][i], c[3][i], th);
            let mixed = vertical * (1.0 - CROSS_GRADIENT_WEIGHT) + horizontal * CROSS_GRADIENT_WEIGHT;
            px[i] = mixed.round().clamp(0.0, 255.0) as u8;
        }
        px[3] = 255;
        Rgba(px)
    });

    let w = width as f32;
    let h = height as f32;
    let sigma = (width / 14).max(6) as f32;
    let glows = [
        PaintCommand::Blurred {
            shape: Shape::Ellipse {
                rect: Rect::from_corners(
                    (w * -0.15) as i32,
                    (h * -0.18) as i32,
                    (w * 0.78) as i32,
                    (h * 0.46) as i32,
                ),
            },
            color: Rgba([255, 255, 255, 64]),
            sigma,
        },
        PaintCommand::Blurred {
            shape: Shape::Ellipse {
                rect: Rect::from_corners(
                    (w * 0.30) as i32,
                    (h * 0.44) as i32,
                    (w * 1.02) as i32,
                    (h * 1.20) as i32,
                ),
            },
            color: Rgba([10, 150, 136, 42]),
            sigma,
        },
    ];
    rasterize(&mut canvas, &glows)?;
    Ok(canvas)
}

/// Position along a gradient of `len` pixels, 0.0 at the first and 1.0 at the last.
fn ramp(pos: u32, len: u32) -> f32 {
    if len <= 1 {
        0.0
    } else {
        pos as f32 / (len - 1) as f32
    }
}

fn lerp(a: u8, b: u8, t: f32) -> f32 {
    a as f32 + (b as f32 - a as f32) * t
}
