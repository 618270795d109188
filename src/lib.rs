//! Store asset generator
//!
//! Derives every storefront and launcher artifact of the app from one brand
//! icon and a handful of pre-rendered UI screenshots:
//!
//! - a 1024x1024 master icon and a 1600x900 preview collage
//! - launcher icons for the iOS iconset, Android mipmaps and the web manifest
//! - iOS launch images composited over a gradient
//! - marketing screenshots per device tier, with the app screen framed in a
//!   device mockup
//! - listing copy, screenshot captions and an asset README
//!
//! All locations come from an [`AssetConfig`], so the whole pipeline can be
//! pointed at a scratch directory.
//!
//! # Example
//!
//! ```no_run
//! use storekit::{AssetConfig, FontResolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AssetConfig {
//!     fonts: FontResolver::builtin(),
//!     ..AssetConfig::for_project("/path/to/app")
//! };
//!
//! let report = storekit::pipeline::run(&config)?;
//! println!("Wrote {} files", report.written.len());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub mod error;
pub use error::{Error, Result};

pub mod catalog;
pub mod emblem;
pub mod icon;
pub mod metadata;
pub mod pipeline;
pub mod platform;
pub mod rendering;
pub mod screenshots;

pub use catalog::{DeviceTier, ShotSpec, SHOTS};
pub use icon::MasterIcon;
pub use pipeline::Report;
pub use rendering::text::{FontResolver, FontSet, Typeface};

/// Pixels at or above this grayscale value count as backdrop when trimming
/// the source icon.
pub const BACKDROP_LUMA_CUTOFF: u8 = 245;

/// Edge length of the master icon.
pub const MASTER_ICON_SIZE: u32 = 1024;

/// Android launcher density buckets, lowest first.
pub const ANDROID_DENSITIES: [&str; 5] = ["mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"];

/// Web manifest icon file names.
pub const WEB_ICONS: [&str; 4] = [
    "Icon-192.png",
    "Icon-512.png",
    "Icon-maskable-192.png",
    "Icon-maskable-512.png",
];

/// Screen key to directory name under the screenshot export folder.
const SOURCE_SCREENS: [(&str, &str); 5] = [
    ("add", "add_fuel_record_form_(light)"),
    ("stats", "fuel_analytics_dashboard"),
    ("feed", "petrol_log_records_feed_(light)"),
    ("feed_dark", "petrol_log_records_feed"),
    ("settings", "petrol_log_settings_(light)"),
];

/// A launch image to render at a fixed pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Every input and output location of a generator run.
///
/// [`AssetConfig::for_project`] reproduces the layout of a Flutter project
/// checkout; tests build one over a temporary directory instead.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Project root the other paths were derived from
    pub root: PathBuf,
    /// Root of the generated store pack
    pub output_dir: PathBuf,
    pub icon_dir: PathBuf,
    pub screenshot_dir: PathBuf,
    pub metadata_dir: PathBuf,
    /// User-supplied brand icon
    pub source_icon: PathBuf,
    /// Xcode iconset `Contents.json`; icons are written next to it
    pub iconset_manifest: PathBuf,
    /// Existing launcher icons sized by their current dimensions
    pub android_icons: Vec<PathBuf>,
    pub web_icons: Vec<PathBuf>,
    pub launch_images: Vec<LaunchTarget>,
    /// Screen key to pre-rendered UI screenshot
    pub source_screens: BTreeMap<String, PathBuf>,
    pub tiers: Vec<DeviceTier>,
    pub fonts: FontResolver,
    /// See [`BACKDROP_LUMA_CUTOFF`]
    pub backdrop_cutoff: u8,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::for_project(".")
    }
}

impl AssetConfig {
    pub fn for_project(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let output_dir = root.join("output").join("app_store");
        let xcassets = root.join("ios").join("Runner").join("Assets.xcassets");
        let res = root.join("android").join("app").join("src").join("main").join("res");
        let launch_dir = xcassets.join("LaunchImage.imageset");
        let screens_dir = root.join("stitch_add_fuel_record_form");

        Self {
            icon_dir: output_dir.join("icon"),
            screenshot_dir: output_dir.join("screenshots"),
            metadata_dir: output_dir.join("metadata"),
            output_dir,
            source_icon: root.join("assets").join("branding").join("app_icon_source.png"),
            iconset_manifest: xcassets.join("AppIcon.appiconset").join("Contents.json"),
            android_icons: ANDROID_DENSITIES
                .iter()
                .map(|d| res.join(format!("mipmap-{d}")).join("ic_launcher.png"))
                .collect(),
            web_icons: WEB_ICONS
                .iter()
                .map(|name| root.join("web").join("icons").join(name))
                .collect(),
            launch_images: [
                ("LaunchImage.png", 414, 896),
                ("LaunchImage@2x.png", 828, 1792),
                ("LaunchImage@3x.png", 1242, 2688),
            ]
            .into_iter()
            .map(|(name, width, height)| LaunchTarget {
                path: launch_dir.join(name),
                width,
                height,
            })
            .collect(),
            source_screens: SOURCE_SCREENS
                .iter()
                .map(|(key, dir)| (key.to_string(), screens_dir.join(dir).join("screen.png")))
                .collect(),
            tiers: catalog::default_tiers(),
            fonts: FontResolver::default(),
            backdrop_cutoff: BACKDROP_LUMA_CUTOFF,
            root,
        }
    }

    /// Directory holding the iconset manifest and its icons.
    pub fn iconset_dir(&self) -> &Path {
        self.iconset_manifest.parent().unwrap_or(&self.root)
    }

    pub fn master_icon_path(&self) -> PathBuf {
        self.icon_dir.join("petrol_log_icon_1024.png")
    }

    pub fn preview_path(&self) -> PathBuf {
        self.icon_dir.join("petrol_log_icon_preview.png")
    }

    /// `path` relative to the project root when it lives under it.
    pub fn display_path<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.root).unwrap_or(path).to_string_lossy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_layout_matches_flutter_tree() {
        let cfg = AssetConfig::for_project("/proj");
        assert_eq!(cfg.output_dir, PathBuf::from("/proj/output/app_store"));
        assert_eq!(
            cfg.source_icon,
            PathBuf::from("/proj/assets/branding/app_icon_source.png")
        );
        assert_eq!(
            cfg.iconset_dir(),
            Path::new("/proj/ios/Runner/Assets.xcassets/AppIcon.appiconset")
        );
        assert_eq!(cfg.android_icons.len(), 5);
        assert!(cfg.android_icons[4].ends_with("mipmap-xxxhdpi/ic_launcher.png"));
        assert_eq!(cfg.web_icons.len(), 4);
        assert_eq!(cfg.launch_images[2].width, 1242);
        assert_eq!(cfg.source_screens.len(), 5);
        assert_eq!(cfg.backdrop_cutoff, 245);
    }

    #[test]
    fn every_shot_has_a_screen() {
        let cfg = AssetConfig::default();
        for shot in SHOTS {
            assert!(cfg.source_screens.contains_key(shot.source_key));
        }
    }

    #[test]
    fn display_path_is_root_relative() {
        let cfg = AssetConfig::for_project("/proj");
        assert_eq!(cfg.display_path(&cfg.master_icon_path()), "output/app_store/icon/petrol_log_icon_1024.png");
        assert_eq!(cfg.display_path(Path::new("/elsewhere/x.png")), "/elsewhere/x.png");
    }
}
