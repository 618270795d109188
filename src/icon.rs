//! Master icon synthesis and the icon preview collage.

use std::path::PathBuf;

use image::{imageops, DynamicImage, Rgba, RgbaImage, RgbImage};
use log::{debug, info};

use crate::pipeline::write_png;
use crate::rendering::layout::Rect;
use crate::rendering::paint::{PaintCommand, Shape};
use crate::rendering::raster::{self, fit, rasterize};
use crate::rendering::text::{FontSet, Weight};
use crate::rendering::hex_rgba;
use crate::{AssetConfig, Error, Result, MASTER_ICON_SIZE};

const PREVIEW_SIZE: (u32, u32) = (1600, 900);
const PREVIEW_ICON: u32 = 560;
const PREVIEW_BACKGROUND: &str = "#F2F7F6";
const PREVIEW_TITLE: &str = "Petrol Log Icon";
const PREVIEW_SUBTITLE: &str = "Source: user-provided brand icon";

/// The square brand icon every downstream artifact is resized from.
///
/// `rgb` is the opaque version written to icon files; `rgba` keeps the source
/// alpha for compositing over launch backgrounds.
#[derive(Debug, Clone)]
pub struct MasterIcon {
    pub rgb: RgbImage,
    pub rgba: RgbaImage,
}

impl MasterIcon {
    /// Load and normalize the configured source icon.
    pub fn load(config: &AssetConfig) -> Result<Self> {
        if !config.source_icon.exists() {
            return Err(Error::MissingSourceIcon {
                path: config.source_icon.clone(),
            });
        }
        let source = image::open(&config.source_icon)?;
        debug!(
            "Loaded source icon {} ({}x{})",
            config.source_icon.display(),
            source.width(),
            source.height()
        );
        Ok(Self::from_source(&source, config.backdrop_cutoff))
    }

    /// Trim a light backdrop and crop-to-fill the result to [`MASTER_ICON_SIZE`].
    ///
    /// Pixels whose grayscale value is below `cutoff` are foreground; when the
    /// image has no such pixels nothing is trimmed.
    pub fn from_source(source: &DynamicImage, cutoff: u8) -> Self {
        let mut rgba = source.to_rgba8();
        let mut rgb = source.to_rgb8();

        if let Some((x, y, w, h)) = foreground_bounds(&rgb, cutoff) {
            if (w, h) != rgb.dimensions() {
                debug!("Trimming icon backdrop to {w}x{h}+{x}+{y}");
                rgb = imageops::crop_imm(&rgb, x, y, w, h).to_image();
                rgba = imageops::crop_imm(&rgba, x, y, w, h).to_image();
            }
        }

        Self {
            rgb: fit(&rgb, MASTER_ICON_SIZE, MASTER_ICON_SIZE, (0.5, 0.5)),
            rgba: fit(&rgba, MASTER_ICON_SIZE, MASTER_ICON_SIZE, (0.5, 0.5)),
        }
    }

    /// Independent square copy at `size` pixels.
    pub fn resized(&self, size: u32) -> RgbImage {
        raster::resize(&self.rgb, size, size)
    }
}

/// ITU-R 601-2 luma, truncated.
fn luma_601([r, g, b]: [u8; 3]) -> u8 {
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

/// Bounding box `(x, y, w, h)` of pixels whose 601-2 luma is below `cutoff`.
pub fn foreground_bounds(rgb: &RgbImage, cutoff: u8) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in rgb.enumerate_pixels() {
        if luma_601(px.0) >= cutoff {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// The icon centered on a light card with a soft shadow and a caption.
pub fn render_preview(master: &MasterIcon, fonts: &FontSet) -> Result<RgbImage> {
    let (width, height) = PREVIEW_SIZE;
    let mut canvas = RgbaImage::from_pixel(width, height, hex_rgba(PREVIEW_BACKGROUND)?);

    let icon = raster::resize(&master.rgb, PREVIEW_ICON, PREVIEW_ICON);
    let x = ((width - PREVIEW_ICON) / 2) as i32;
    let y = ((height - PREVIEW_ICON) / 2) as i32;
    let side = PREVIEW_ICON as i32;

    let bold = fonts.face(Weight::Bold);
    let regular = fonts.face(Weight::Regular);
    let title_px = 58.0;
    let subtitle_px = 28.0;
    let title_w = bold.measure(PREVIEW_TITLE, title_px).width as i32;
    let subtitle_w = regular.measure(PREVIEW_SUBTITLE, subtitle_px).width as i32;

    let commands = vec![
        PaintCommand::Blurred {
            shape: Shape::rounded(Rect::from_corners(x - 8, y + 18, x + side + 8, y + side + 30), 130.0),
            color: Rgba([0, 0, 0, 60]),
            sigma: 24.0,
        },
        PaintCommand::Image {
            image: DynamicImage::ImageRgb8(icon).to_rgba8(),
            x,
            y,
            corner_radius: None,
        },
        PaintCommand::Text {
            x: (width as i32 - title_w) / 2,
            y: 70,
            text: PREVIEW_TITLE.to_string(),
            face: bold.clone(),
            px: title_px,
            color: Rgba([12, 41, 40, 255]),
        },
        PaintCommand::Text {
            x: (width as i32 - subtitle_w) / 2,
            y: 144,
            text: PREVIEW_SUBTITLE.to_string(),
            face: regular.clone(),
            px: subtitle_px,
            color: Rgba([57, 88, 85, 255]),
        },
    ];
    rasterize(&mut canvas, &commands)?;
    Ok(raster::flatten(&canvas))
}

/// Write the master icon and its preview into the icon output directory.
pub fn write_icon_files(config: &AssetConfig, master: &MasterIcon, fonts: &FontSet) -> Result<Vec<PathBuf>> {
    let master_path = config.master_icon_path();
    write_png(&master.rgb, &master_path)?;

    let preview_path = config.preview_path();
    write_png(&render_preview(master, fonts)?, &preview_path)?;

    info!("Master icon and preview written to {}", config.icon_dir.display());
    Ok(vec![master_path, preview_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn padded_icon() -> DynamicImage {
        // 200x100 white canvas with a dark 40x60 block
        let mut img = RgbaImage::from_pixel(200, 100, Rgba([255, 255, 255, 255]));
        for x in 50..90 {
            for y in 20..80 {
                img.put_pixel(x, y, Rgba([20, 60, 60, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn foreground_bounds_finds_the_block() {
        let rgb = padded_icon().to_rgb8();
        assert_eq!(foreground_bounds(&rgb, 245), Some((50, 20, 40, 60)));
    }

    #[test]
    fn tinted_pixel_just_under_cutoff_is_foreground() {
        // 601-2 luma of (240, 255, 200) is 244
        let mut rgb = RgbImage::from_pixel(20, 20, Rgb([255, 255, 255]));
        rgb.put_pixel(5, 7, Rgb([240, 255, 200]));
        assert_eq!(luma_601([240, 255, 200]), 244);
        assert_eq!(foreground_bounds(&rgb, 245), Some((5, 7, 1, 1)));
        assert_eq!(foreground_bounds(&rgb, 244), None);
    }

    #[test]
    fn all_backdrop_has_no_bounds() {
        let rgb = RgbImage::from_pixel(10, 10, Rgb([250, 250, 250]));
        assert_eq!(foreground_bounds(&rgb, 245), None);
        // a higher cutoff turns the same pixels into foreground
        assert_eq!(foreground_bounds(&rgb, 251), Some((0, 0, 10, 10)));
    }

    #[test]
    fn master_icon_is_1024_square() {
        let master = MasterIcon::from_source(&padded_icon(), 245);
        assert_eq!(master.rgb.dimensions(), (1024, 1024));
        assert_eq!(master.rgba.dimensions(), (1024, 1024));
        // the backdrop was trimmed, so the middle is the dark block
        let center = master.rgb.get_pixel(512, 512).0;
        for (got, want) in center.iter().zip([20u8, 60, 60]) {
            assert!(got.abs_diff(want) <= 1, "center pixel {center:?}");
        }
    }

    #[test]
    fn untrimmed_source_is_still_fit() {
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 50, Rgb([255, 255, 255])));
        let master = MasterIcon::from_source(&src, 245);
        assert_eq!(master.rgb.dimensions(), (1024, 1024));
    }

    #[test]
    fn resized_copies_are_independent() {
        let master = MasterIcon::from_source(&padded_icon(), 245);
        let small = master.resized(48);
        assert_eq!(small.dimensions(), (48, 48));
        assert_eq!(master.rgb.dimensions(), (1024, 1024));
    }

    #[test]
    fn load_reports_missing_icon() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AssetConfig::for_project(dir.path());
        match MasterIcon::load(&cfg) {
            Err(Error::MissingSourceIcon { path }) => assert_eq!(path, cfg.source_icon),
            other => panic!("expected missing icon error, got {other:?}"),
        }
    }

    #[test]
    fn preview_is_1600_by_900() {
        let master = MasterIcon::from_source(&padded_icon(), 245);
        let preview = render_preview(&master, &FontSet::builtin()).unwrap();
        assert_eq!(preview.dimensions(), (1600, 900));
    }
}
