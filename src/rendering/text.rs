//! Font resolution and text rasterization
//!
//! Outline fonts are loaded from disk through `ab_glyph`. When none of the
//! probed files can be loaded the embedded 8x8 bitmap face is used, so text
//! always renders regardless of which fonts the host has installed.

use std::fmt;
use std::path::PathBuf;

use ab_glyph::{point, Font, FontArc, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};
use log::{debug, warn};

use crate::rendering::raster::blend_at;

/// Pixel size of one builtin glyph cell before scaling.
const BUILTIN_CELL: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

/// Measured size of a single line of text in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone)]
pub enum Typeface {
    Outline(FontArc),
    /// Embedded bitmap glyphs; `bold` thickens strokes by one cell column.
    Builtin { bold: bool },
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::Outline(_) => f.write_str("Typeface::Outline"),
            Typeface::Builtin { bold } => write!(f, "Typeface::Builtin {{ bold: {bold} }}"),
        }
    }
}

impl Typeface {
    pub fn builtin(bold: bool) -> Self {
        Typeface::Builtin { bold }
    }

    pub fn measure(&self, text: &str, px: f32) -> TextExtent {
        match self {
            Typeface::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(px));
                let mut width = 0.0f32;
                let mut prev = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                TextExtent {
                    width: width.ceil().max(0.0) as u32,
                    height: self.line_height(px),
                }
            }
            Typeface::Builtin { .. } => TextExtent {
                width: text.chars().count() as u32 * BUILTIN_CELL * builtin_scale(px),
                height: self.line_height(px),
            },
        }
    }

    pub fn line_height(&self, px: f32) -> u32 {
        match self {
            Typeface::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(px));
                (scaled.ascent() - scaled.descent()).ceil().max(1.0) as u32
            }
            Typeface::Builtin { .. } => BUILTIN_CELL * builtin_scale(px),
        }
    }

    /// Draw one line with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, px: f32, color: Rgba<u8>) {
        match self {
            Typeface::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(px));
                let baseline = y as f32 + scaled.ascent();
                let mut caret = x as f32;
                let mut prev = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    let glyph = id.with_scale_and_position(scaled.scale(), point(caret, baseline));
                    caret += scaled.h_advance(id);
                    prev = Some(id);

                    let Some(outlined) = font.outline_glyph(glyph) else {
                        continue;
                    };
                    let bounds = outlined.px_bounds();
                    let (ox, oy) = (bounds.min.x as i32, bounds.min.y as i32);
                    outlined.draw(|gx, gy, coverage| {
                        let cov = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                        blend_at(canvas, ox + gx as i32, oy + gy as i32, color, cov);
                    });
                }
            }
            Typeface::Builtin { bold } => {
                let scale = builtin_scale(px) as i32;
                let cell = BUILTIN_CELL as i32 * scale;
                for (i, c) in text.chars().enumerate() {
                    let glyph = BASIC_FONTS
                        .get(c)
                        .or_else(|| BASIC_FONTS.get('?'))
                        .unwrap_or([0; 8]);
                    let gx = x + i as i32 * cell;
                    for (row, bits) in glyph.iter().enumerate() {
                        for col in 0..BUILTIN_CELL as i32 {
                            let on = bits & (1 << col) != 0
                                || (*bold && col > 0 && bits & (1 << (col - 1)) != 0);
                            if !on {
                                continue;
                            }
                            let bx = gx + col * scale;
                            let by = y + row as i32 * scale;
                            for dy in 0..scale {
                                for dx in 0..scale {
                                    blend_at(canvas, bx + dx, by + dy, color, 255);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Integer magnification of the 8px builtin cell that best matches `px`.
fn builtin_scale(px: f32) -> u32 {
    ((px / BUILTIN_CELL as f32).round() as u32).max(1)
}

/// The regular/bold pair every renderer draws with.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub regular: Typeface,
    pub bold: Typeface,
}

impl FontSet {
    pub fn builtin() -> Self {
        Self {
            regular: Typeface::builtin(false),
            bold: Typeface::builtin(true),
        }
    }

    pub fn face(&self, weight: Weight) -> &Typeface {
        match weight {
            Weight::Regular => &self.regular,
            Weight::Bold => &self.bold,
        }
    }
}

/// Probes candidate font files in order and falls back to the builtin face.
///
/// Collection files (`.ttc`) are assumed to carry the bold face at index 1;
/// when that index is missing the first face is used instead.
#[derive(Debug, Clone, PartialEq)]
pub struct FontResolver {
    pub candidates: Vec<PathBuf>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self {
            candidates: [
                "/System/Library/Fonts/SFNS.ttf",
                "/System/Library/Fonts/HelveticaNeue.ttc",
                "/System/Library/Fonts/Avenir Next.ttc",
                "/System/Library/Fonts/Helvetica.ttc",
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

impl FontResolver {
    /// A resolver that never touches the filesystem.
    pub fn builtin() -> Self {
        Self { candidates: Vec::new() }
    }

    /// Put `paths` ahead of the existing candidates.
    pub fn prefer(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut merged: Vec<PathBuf> = paths.into_iter().collect();
        merged.append(&mut self.candidates);
        self.candidates = merged;
        self
    }

    pub fn resolve(&self, weight: Weight) -> Typeface {
        let preferred_index = match weight {
            Weight::Regular => 0,
            Weight::Bold => 1,
        };
        for path in &self.candidates {
            let Ok(data) = std::fs::read(path) else {
                continue;
            };
            let mut indices = vec![preferred_index];
            if preferred_index != 0 {
                indices.push(0);
            }
            for index in indices {
                if let Ok(font) = FontVec::try_from_vec_and_index(data.clone(), index) {
                    debug!("Using font {} (face {}) for {:?}", path.display(), index, weight);
                    return Typeface::Outline(FontArc::new(font));
                }
            }
        }
        if !self.candidates.is_empty() {
            warn!("No usable font among {} candidates; using builtin bitmap face", self.candidates.len());
        }
        Typeface::builtin(weight == Weight::Bold)
    }

    pub fn resolve_set(&self) -> FontSet {
        FontSet {
            regular: self.resolve(Weight::Regular),
            bold: self.resolve(Weight::Bold),
        }
    }
}
