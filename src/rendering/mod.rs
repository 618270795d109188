//! Rendering primitives shared by every stage
//!
//! Renderers describe what they want drawn as a list of [`paint::PaintCommand`]s
//! and hand it to [`raster::rasterize`]. Pure image transforms (crop-to-fill,
//! corner masks, flattening) live in [`raster`] so call sites stay declarative.

pub mod layout;
pub mod paint;
pub mod raster;
pub mod text;

use image::Rgba;

use crate::{Error, Result};

/// Backgrounds whose luminance falls below this value get light text.
pub const DARK_LUMINANCE_CUTOFF: f32 = 118.0;

/// Parse `#RRGGBB` (leading `#` optional) into its channels.
pub fn parse_hex(value: &str) -> Result<[u8; 3]> {
    let digits = value.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(Error::InvalidColor(value.to_string()));
    }
    let mut out = [0u8; 3];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| Error::InvalidColor(value.to_string()))?;
    }
    Ok(out)
}

/// Opaque RGBA pixel from a hex literal.
pub fn hex_rgba(value: &str) -> Result<Rgba<u8>> {
    let [r, g, b] = parse_hex(value)?;
    Ok(Rgba([r, g, b, 255]))
}

/// Relative luminance on the 0-255 scale (Rec. 709 weights).
pub fn luminance([r, g, b]: [u8; 3]) -> f32 {
    0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32
}

pub fn is_dark_color(hex: &str) -> Result<bool> {
    Ok(luminance(parse_hex(hex)?) < DARK_LUMINANCE_CUTOFF)
}

/// Text colors for a title/subtitle pair, picked against the backdrop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPalette {
    pub title: Rgba<u8>,
    pub subtitle: Rgba<u8>,
}

impl TextPalette {
    /// Light text for dark backgrounds.
    pub const ON_DARK: TextPalette = TextPalette {
        title: Rgba([238, 255, 252, 246]),
        subtitle: Rgba([196, 235, 230, 226]),
    };

    /// Dark text for light backgrounds.
    pub const ON_LIGHT: TextPalette = TextPalette {
        title: Rgba([8, 30, 31, 245]),
        subtitle: Rgba([19, 79, 79, 210]),
    };

    pub fn for_background(rgb: [u8; 3]) -> Self {
        if luminance(rgb) < DARK_LUMINANCE_CUTOFF {
            Self::ON_DARK
        } else {
            Self::ON_LIGHT
        }
    }
}
