/// Icon sets sized by the files already in the project (Android mipmaps, web icons)

use std::path::PathBuf;

use crate::platform::{IconSet, IconTarget};
use crate::{Error, Result};

/// Icons whose required size is whatever the existing placeholder measures.
#[derive(Debug, Clone)]
pub struct PlaceholderSet {
    name: String,
    paths: Vec<PathBuf>,
}

impl PlaceholderSet {
    pub fn new(name: impl Into<String>, paths: Vec<PathBuf>) -> Self {
        Self {
            name: name.into(),
            paths,
        }
    }
}

impl IconSet for PlaceholderSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn targets(&self) -> Result<Vec<IconTarget>> {
        self.paths
            .iter()
            .map(|path| {
                let (width, height) = image::image_dimensions(path).map_err(|e| match e {
                    image::ImageError::IoError(io) => Error::io(path, io),
                    other => Error::Image(other),
                })?;
                Ok(IconTarget {
                    path: path.clone(),
                    width,
                    height,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn sizes_come_from_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("mdpi.png");
        let large = dir.path().join("xxxhdpi.png");
        RgbImage::from_pixel(48, 48, Rgb([0, 0, 0])).save(&small).unwrap();
        RgbImage::from_pixel(192, 192, Rgb([0, 0, 0])).save(&large).unwrap();

        let set = PlaceholderSet::new("android", vec![small.clone(), large.clone()]);
        let targets = set.targets().unwrap();
        assert_eq!(targets[0], IconTarget { path: small, width: 48, height: 48 });
        assert_eq!(targets[1].width, 192);
        assert_eq!(set.name(), "android");
    }

    #[test]
    fn missing_placeholder_fails() {
        let dir = tempfile::tempdir().unwrap();
        let set = PlaceholderSet::new("web", vec![dir.path().join("Icon-192.png")]);
        assert!(matches!(set.targets(), Err(Error::Io { .. })));
    }
}
