/// iOS launch images: the master icon over the brand gradient

use std::path::PathBuf;

use image::RgbImage;
use log::info;

use crate::icon::MasterIcon;
use crate::pipeline::write_png;
use crate::rendering::paint::{backdrop, PaintCommand};
use crate::rendering::raster::{self, rasterize};
use crate::{LaunchTarget, Result};

const LAUNCH_PALETTE: [&str; 4] = ["#06191A", "#0B4A48", "#0A2424", "#0F6B65"];

/// Render one launch image of `width` x `height`.
///
/// The icon is a third of the short edge, horizontally centered with its top
/// at 28% of the height, and its corners rounded into its alpha.
pub fn render_launch_image(master: &MasterIcon, width: u32, height: u32) -> Result<RgbImage> {
    let mut canvas = backdrop(width, height, &LAUNCH_PALETTE)?;

    let edge = ((width.min(height) as f32 * 0.33) as u32).max(1);
    let radius = (edge as f32 * 0.18).max(12.0);
    let icon = raster::resize(&master.rgba, edge, edge);

    rasterize(
        &mut canvas,
        &[PaintCommand::Image {
            image: icon,
            x: ((width - edge.min(width)) / 2) as i32,
            y: (height as f32 * 0.28) as i32,
            corner_radius: Some(radius),
        }],
    )?;
    Ok(raster::flatten(&canvas))
}

pub fn write_launch_images(master: &MasterIcon, targets: &[LaunchTarget]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(targets.len());
    for target in targets {
        let image = render_launch_image(master, target.width, target.height)?;
        write_png(&image, &target.path)?;
        written.push(target.path.clone());
    }
    info!("Wrote {} launch images", written.len());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn white_master() -> MasterIcon {
        MasterIcon::from_source(
            &DynamicImage::ImageRgba8(RgbaImage::from_pixel(32, 32, Rgba([200, 30, 30, 255]))),
            245,
        )
    }

    #[test]
    fn launch_image_has_requested_size_and_icon() {
        let img = render_launch_image(&white_master(), 207, 448).unwrap();
        assert_eq!(img.dimensions(), (207, 448));
        // icon edge 68, top at 125: its center is red
        let center = img.get_pixel(103, 125 + 34);
        assert!(center[0] > 150 && center[1] < 80, "got {center:?}");
        // the top band is background
        assert!(img.get_pixel(103, 10)[0] < 100);
    }

    #[test]
    fn writes_every_target() {
        let dir = tempfile::tempdir().unwrap();
        let targets = vec![
            LaunchTarget { path: dir.path().join("imageset").join("LaunchImage.png"), width: 40, height: 80 },
            LaunchTarget { path: dir.path().join("imageset").join("LaunchImage@2x.png"), width: 80, height: 160 },
        ];
        let written = write_launch_images(&white_master(), &targets).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(image::image_dimensions(&targets[1].path).unwrap(), (80, 160));
    }
}
