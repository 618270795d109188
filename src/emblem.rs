//! Procedural brand mark: a pale fuel droplet with a road lane on a teal
//! gradient. Used to seed a project that has no source icon yet.

use std::path::Path;

use image::{GrayImage, Rgba, RgbImage};
use log::info;

use crate::pipeline::write_png;
use crate::rendering::layout::Rect;
use crate::rendering::paint::{backdrop, PaintCommand, Shape};
use crate::rendering::raster::{self, blur_mask, fill_mask, polygon_mask, rasterize, shape_mask};
use crate::Result;

const EMBLEM_PALETTE: [&str; 4] = ["#061A1B", "#0C5D58", "#0A2A2A", "#0F7C74"];

/// Coverage mask of the droplet silhouette: a circle with a triangle tapering
/// to a point below it.
pub fn droplet_mask(size: u32) -> Result<GrayImage> {
    let s = size as f32;
    let cx = s / 2.0;
    let radius = s * 0.24;
    let top = s * 0.16;

    let head = shape_mask(
        &Shape::Ellipse {
            rect: Rect::from_corners(
                (cx - radius) as i32,
                top as i32,
                (cx + radius) as i32,
                (top + radius * 2.0) as i32,
            ),
        },
        size,
        size,
    )?;

    let shoulder_y = top + radius * 1.02;
    let shoulder_x = radius * 0.98;
    let tail = polygon_mask(
        &[
            (cx - shoulder_x, shoulder_y),
            (cx + shoulder_x, shoulder_y),
            (cx, s * 0.86),
        ],
        size,
        size,
    )?;

    Ok(GrayImage::from_fn(size, size, |x, y| {
        image::Luma([head.get_pixel(x, y)[0].max(tail.get_pixel(x, y)[0])])
    }))
}

/// Square grayscale dilation with a `(2 * radius + 1)` window.
fn dilate(mask: &GrayImage, radius: u32) -> GrayImage {
    let (w, h) = mask.dimensions();
    let r = radius as i64;
    let horizontal = GrayImage::from_fn(w, h, |x, y| {
        let lo = (x as i64 - r).max(0) as u32;
        let hi = (x as i64 + r).min(w as i64 - 1) as u32;
        image::Luma([(lo..=hi).map(|sx| mask.get_pixel(sx, y)[0]).max().unwrap_or(0)])
    });
    GrayImage::from_fn(w, h, |x, y| {
        let lo = (y as i64 - r).max(0) as u32;
        let hi = (y as i64 + r).min(h as i64 - 1) as u32;
        image::Luma([(lo..=hi).map(|sy| horizontal.get_pixel(x, sy)[0]).max().unwrap_or(0)])
    })
}

/// Render the droplet emblem at `size` x `size`.
pub fn droplet_icon(size: u32) -> Result<RgbImage> {
    let s = size as f32;
    let mut canvas = backdrop(size, size, &EMBLEM_PALETTE)?;
    let drop = droplet_mask(size)?;

    // Drop shadow, nudged down.
    let shadow = blur_mask(&drop, (s * 0.02).max(2.0));
    fill_mask(&mut canvas, &shadow, 0, (s * 0.018) as i32, Rgba([0, 0, 0, 78]));

    fill_mask(&mut canvas, &drop, 0, 0, Rgba([245, 255, 252, 255]));

    // Thin highlight just outside the silhouette.
    let grown = dilate(&drop, 2);
    let edge = GrayImage::from_fn(size, size, |x, y| {
        image::Luma([grown.get_pixel(x, y)[0].saturating_sub(drop.get_pixel(x, y)[0])])
    });
    fill_mask(&mut canvas, &edge, 0, 0, Rgba([255, 255, 255, 255]));

    let cx = (size / 2) as i32;
    let lane_w = (s * 0.108) as i32;
    let lane_h = (s * 0.40) as i32;
    let lane_top = (s * 0.30) as i32;
    let lane_left = cx - lane_w / 2;

    let mut commands = vec![PaintCommand::Fill {
        shape: Shape::rounded(
            Rect::new(lane_left, lane_top, lane_w as u32, lane_h as u32),
            (lane_w / 2) as f32,
        ),
        color: Rgba([10, 104, 98, 236]),
    }];

    let dash_w = ((lane_w as f32 * 0.28) as i32).max(6);
    let dash_h = ((s * 0.042) as i32).max(8);
    let gap = ((s * 0.024) as i32).max(6);
    let mut y = lane_top + (s * 0.035) as i32;
    for _ in 0..4 {
        commands.push(PaintCommand::Fill {
            shape: Shape::rounded(
                Rect::from_corners(cx - dash_w / 2, y, cx + dash_w / 2, y + dash_h),
                (dash_w / 2) as f32,
            ),
            color: Rgba([223, 255, 250, 240]),
        });
        y += dash_h + gap;
    }

    commands.push(PaintCommand::Fill {
        shape: Shape::Ellipse {
            rect: Rect::from_corners(
                cx - (s * 0.020) as i32,
                lane_top + lane_h - (s * 0.050) as i32,
                cx + (s * 0.020) as i32,
                lane_top + lane_h - (s * 0.010) as i32,
            ),
        },
        color: Rgba([255, 199, 111, 248]),
    });

    rasterize(&mut canvas, &commands)?;
    Ok(raster::flatten(&canvas))
}

/// Write the emblem to `path` (creating parent directories) unless a file is
/// already there. Returns whether anything was written.
pub fn bootstrap_source_icon(path: &Path, size: u32) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    write_png(&droplet_icon(size)?, path)?;
    info!("Seeded source icon {} with the procedural emblem", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn droplet_mask_covers_center_not_corners() {
        let mask = droplet_mask(128).unwrap();
        assert_eq!(mask.get_pixel(64, 50)[0], 255);
        assert_eq!(mask.get_pixel(64, 90)[0], 255);
        assert_eq!(mask.get_pixel(2, 2)[0], 0);
        assert_eq!(mask.get_pixel(125, 125)[0], 0);
    }

    #[test]
    fn dilate_grows_by_radius() {
        let mut mask = GrayImage::new(9, 9);
        mask.put_pixel(4, 4, image::Luma([200]));
        let grown = dilate(&mask, 2);
        assert_eq!(grown.get_pixel(2, 2)[0], 200);
        assert_eq!(grown.get_pixel(6, 6)[0], 200);
        assert_eq!(grown.get_pixel(1, 4)[0], 0);
    }

    #[test]
    fn droplet_icon_is_square() {
        let icon = droplet_icon(96).unwrap();
        assert_eq!(icon.dimensions(), (96, 96));
    }

    #[test]
    fn bootstrap_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("branding").join("icon.png");
        assert!(bootstrap_source_icon(&path, 64).unwrap());
        assert!(path.exists());
        assert!(!bootstrap_source_icon(&path, 64).unwrap());
    }
}
