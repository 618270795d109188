//! Platform asset sets: launcher icons for iOS, Android and the web manifest,
//! plus iOS launch images.
//!
//! Each icon set only knows *which* files it needs and at what size; writing
//! resized copies of the master icon is shared in [`propagate`].

pub mod ios;
pub mod launch;
pub mod placeholders;

use std::collections::HashSet;
use std::path::PathBuf;

use log::{debug, info};

use crate::icon::MasterIcon;
use crate::pipeline::write_png;
use crate::rendering::raster;
use crate::{AssetConfig, Result};

pub use ios::{parse_icon_size, Iconset};
pub use launch::write_launch_images;
pub use placeholders::PlaceholderSet;

/// One launcher icon file and the pixel size it must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTarget {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// A platform's collection of launcher icon files.
pub trait IconSet {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Files to (re)write, in order. Resolving sizes may read from disk.
    fn targets(&self) -> Result<Vec<IconTarget>>;
}

/// The three launcher icon sets of a project.
pub fn icon_sets(config: &AssetConfig) -> Vec<Box<dyn IconSet>> {
    vec![
        Box::new(Iconset::new(config.iconset_manifest.clone())),
        Box::new(PlaceholderSet::new("android", config.android_icons.clone())),
        Box::new(PlaceholderSet::new("web", config.web_icons.clone())),
    ]
}

/// Overwrite every target of every set with a resized copy of the master icon.
///
/// A path listed more than once is written only the first time.
pub fn propagate(master: &MasterIcon, sets: &[Box<dyn IconSet>]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut seen = HashSet::new();
    for set in sets {
        let targets = set.targets()?;
        let before = written.len();
        for target in targets {
            if !seen.insert(target.path.clone()) {
                debug!("Skipping duplicate icon target {}", target.path.display());
                continue;
            }
            let resized = raster::resize(&master.rgb, target.width, target.height);
            write_png(&resized, &target.path)?;
            written.push(target.path);
        }
        info!("Updated {} {} launcher icons", written.len() - before, set.name());
    }
    Ok(written)
}
