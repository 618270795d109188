/// Rasterizer for paint commands plus the stateless image transforms
/// (crop-to-fill, corner masks, flattening) the renderers share.

use image::buffer::ConvertBuffer;
use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, Luma, Pixel, Rgba, RgbaImage, RgbImage};
use tiny_skia as sk;

use crate::rendering::layout::Rect;
use crate::rendering::paint::{PaintCommand, Shape};
use crate::{Error, Result};

/// Resampling filter used for every resize.
pub const RESAMPLE: FilterType = FilterType::Lanczos3;

/// Execute `commands` in order onto `canvas`.
pub fn rasterize(canvas: &mut RgbaImage, commands: &[PaintCommand]) -> Result<()> {
    let bounds = Rect::new(0, 0, canvas.width(), canvas.height());
    for command in commands {
        match command {
            PaintCommand::Fill { shape, color } => {
                if let Some(region) = shape.bounds().intersect(&bounds) {
                    let mask = coverage(shape_path(shape), region)?;
                    fill_mask(canvas, &mask, region.x, region.y, *color);
                }
            }
            PaintCommand::Stroke { shape, color, width } => {
                let stroke = sk::Stroke {
                    width: *width,
                    ..Default::default()
                };
                let Some(path) = shape_path(shape).and_then(|p| p.stroke(&stroke, 1.0)) else {
                    continue;
                };
                let pad = width.ceil() as u32;
                if let Some(region) = shape.bounds().inflate(pad).intersect(&bounds) {
                    let mask = coverage(Some(path), region)?;
                    fill_mask(canvas, &mask, region.x, region.y, *color);
                }
            }
            PaintCommand::Blurred { shape, color, sigma } => {
                let pad = (sigma * 3.0).ceil() as u32;
                if let Some(region) = shape.bounds().inflate(pad).intersect(&bounds) {
                    let mask = coverage(shape_path(shape), region)?;
                    let mask = blur_mask(&mask, *sigma);
                    fill_mask(canvas, &mask, region.x, region.y, *color);
                }
            }
            PaintCommand::Image {
                image,
                x,
                y,
                corner_radius,
            } => match corner_radius {
                Some(radius) => {
                    let mut rounded = image.clone();
                    let mask = rounded_rect_mask(image.width(), image.height(), *radius)?;
                    apply_mask(&mut rounded, &mask);
                    imageops::overlay(canvas, &rounded, *x as i64, *y as i64);
                }
                None => imageops::overlay(canvas, image, *x as i64, *y as i64),
            },
            PaintCommand::Text {
                x,
                y,
                text,
                face,
                px,
                color,
            } => face.draw(canvas, *x, *y, text, *px, *color),
        }
    }
    Ok(())
}

fn shape_path(shape: &Shape) -> Option<sk::Path> {
    match *shape {
        Shape::RoundedRect { rect, radius } => rounded_rect_path(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
            radius,
        ),
        Shape::Ellipse { rect } => sk::Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        )
        .and_then(sk::PathBuilder::from_oval),
    }
}

fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, radius: f32) -> Option<sk::Path> {
    let r = radius.min(w / 2.0).min(h / 2.0).max(0.0);
    if r <= 0.0 {
        return sk::Rect::from_xywh(x, y, w, h).map(sk::PathBuilder::from_rect);
    }
    // cubic approximation of a quarter circle
    let k = r * 0.552_284_8;
    let (x1, y1) = (x + w, y + h);
    let mut pb = sk::PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x1 - r, y);
    pb.cubic_to(x1 - r + k, y, x1, y + r - k, x1, y + r);
    pb.line_to(x1, y1 - r);
    pb.cubic_to(x1, y1 - r + k, x1 - r + k, y1, x1 - r, y1);
    pb.line_to(x + r, y1);
    pb.cubic_to(x + r - k, y1, x, y1 - r + k, x, y1 - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Anti-aliased coverage of `path` inside `region`, as a mask the size of `region`.
fn coverage(path: Option<sk::Path>, region: Rect) -> Result<GrayImage> {
    let mut mask = sk::Mask::new(region.width, region.height)
        .ok_or_else(|| Error::Render(format!("cannot allocate {}x{} mask", region.width, region.height)))?;
    if let Some(path) = path {
        mask.fill_path(
            &path,
            sk::FillRule::Winding,
            true,
            sk::Transform::from_translate(-region.x as f32, -region.y as f32),
        );
    }
    GrayImage::from_raw(region.width, region.height, mask.data().to_vec())
        .ok_or_else(|| Error::Render("mask buffer size mismatch".into()))
}

/// Full-size coverage mask of `shape` on a `width` x `height` canvas.
pub fn shape_mask(shape: &Shape, width: u32, height: u32) -> Result<GrayImage> {
    coverage(shape_path(shape), Rect::new(0, 0, width, height))
}

/// Full-size coverage mask of a closed polygon.
pub fn polygon_mask(points: &[(f32, f32)], width: u32, height: u32) -> Result<GrayImage> {
    let mut pb = sk::PathBuilder::new();
    if let Some((&(x, y), rest)) = points.split_first() {
        pb.move_to(x, y);
        for &(x, y) in rest {
            pb.line_to(x, y);
        }
        pb.close();
    }
    coverage(pb.finish(), Rect::new(0, 0, width, height))
}

/// Gaussian-blur a coverage mask; `sigma <= 0` returns it unchanged.
pub fn blur_mask(mask: &GrayImage, sigma: f32) -> GrayImage {
    if sigma <= 0.0 {
        return mask.clone();
    }
    imageops::fast_blur(mask, sigma)
}

/// Straight-alpha source-over of `src` onto `dst`, with `src` alpha scaled by `coverage`.
pub fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: u8) {
    let sa = (src[3] as f32 / 255.0) * (coverage as f32 / 255.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let v = (src[c] as f32 * sa + dst[c] as f32 * da * (1.0 - sa)) / out_a;
        dst[c] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// [`blend`] at a signed position; out-of-bounds writes are dropped.
pub fn blend_at(canvas: &mut RgbaImage, x: i32, y: i32, src: Rgba<u8>, coverage: u8) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    blend(canvas.get_pixel_mut(x as u32, y as u32), src, coverage);
}

/// Paint `color` through `mask` placed with its top-left at `(ox, oy)`.
pub fn fill_mask(canvas: &mut RgbaImage, mask: &GrayImage, ox: i32, oy: i32, color: Rgba<u8>) {
    for (mx, my, Luma([cov])) in mask.enumerate_pixels() {
        if *cov > 0 {
            blend_at(canvas, ox + mx as i32, oy + my as i32, color, *cov);
        }
    }
}

/// Crop-to-fill: scale and center-crop `image` so it exactly covers `width` x `height`.
///
/// `centering` places the crop window along each axis, `(0.5, 0.5)` being the
/// middle and `(0.5, 0.0)` hugging the top edge.
pub fn fit<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    width: u32,
    height: u32,
    centering: (f32, f32),
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let (src_w, src_h) = image.dimensions();
    let (cx, cy, cw, ch) = fit_crop_box(src_w, src_h, width, height, centering);
    let cropped = imageops::crop_imm(image, cx, cy, cw, ch).to_image();
    imageops::resize(&cropped, width.max(1), height.max(1), RESAMPLE)
}

/// Crop window `(x, y, w, h)` inside a `src_w` x `src_h` image matching the
/// aspect ratio of `out_w` x `out_h`.
pub fn fit_crop_box(src_w: u32, src_h: u32, out_w: u32, out_h: u32, centering: (f32, f32)) -> (u32, u32, u32, u32) {
    let (sw, sh) = (src_w as f64, src_h as f64);
    let live_ratio = sw / sh.max(1.0);
    let out_ratio = out_w.max(1) as f64 / out_h.max(1) as f64;

    let (crop_w, crop_h) = if (live_ratio - out_ratio).abs() < f64::EPSILON {
        (sw, sh)
    } else if live_ratio > out_ratio {
        (out_ratio * sh, sh)
    } else {
        (sw, sw / out_ratio)
    };
    let cx = ((sw - crop_w) * centering.0.clamp(0.0, 1.0) as f64).round();
    let cy = ((sh - crop_h) * centering.1.clamp(0.0, 1.0) as f64).round();
    let cw = (crop_w.round() as u32).clamp(1, src_w.max(1));
    let ch = (crop_h.round() as u32).clamp(1, src_h.max(1));
    (
        (cx as u32).min(src_w.saturating_sub(cw)),
        (cy as u32).min(src_h.saturating_sub(ch)),
        cw,
        ch,
    )
}

/// Exact resize, ignoring aspect ratio.
pub fn resize<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>, width: u32, height: u32) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    imageops::resize(image, width.max(1), height.max(1), RESAMPLE)
}

/// Anti-aliased rounded-rectangle coverage mask of the given size.
pub fn rounded_rect_mask(width: u32, height: u32, radius: f32) -> Result<GrayImage> {
    let rect = Rect::new(0, 0, width, height);
    coverage(shape_path(&Shape::rounded(rect, radius)), rect)
}

/// Multiply the alpha channel of `image` by `mask`.
pub fn apply_mask(image: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, px) in image.enumerate_pixels_mut() {
        let m = mask.get_pixel_checked(x, y).map_or(0, |p| p[0]);
        px[3] = ((px[3] as u16 * m as u16 + 127) / 255) as u8;
    }
}

/// Drop alpha, producing the opaque image that gets written to disk.
pub fn flatten(canvas: &RgbaImage) -> RgbImage {
    canvas.convert()
}
