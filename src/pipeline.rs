//! Generator orchestration and the shared file writers
//!
//! [`run`] executes the stages in a fixed order. Each stage finishes before
//! the next starts and the first failure aborts the run; files written before
//! the failure stay on disk.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{EncodableLayout, ImageBuffer, ImageFormat, PixelWithColorType};
use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::icon::{self, MasterIcon};
use crate::metadata;
use crate::platform::{self, write_launch_images};
use crate::screenshots::generate_screenshots;
use crate::{AssetConfig, Error, Result};

/// Every file a run wrote, in write order.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
}

impl Report {
    /// `output_dir` as an absolute path with `.` and `..` resolved; unchanged
    /// when it cannot be resolved.
    pub fn absolute_output_dir(&self) -> PathBuf {
        std::fs::canonicalize(&self.output_dir).unwrap_or_else(|_| self.output_dir.clone())
    }

    /// Written files under `dir`.
    pub fn under<'a>(&'a self, dir: &'a Path) -> impl Iterator<Item = &'a PathBuf> + 'a {
        self.written.iter().filter(move |p| p.starts_with(dir))
    }
}

/// Short hex digest used in debug logs.
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(&Sha256::digest(bytes)[..6])
}

/// Encode `image` as PNG and write it to `path`, creating parent directories.
pub fn write_png<P>(image: &ImageBuffer<P, Vec<P::Subpixel>>, path: &Path) -> Result<()>
where
    P: PixelWithColorType,
    [P::Subpixel]: EncodableLayout,
{
    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, ImageFormat::Png)?;
    write_bytes(encoded.get_ref(), path)?;
    debug!(
        "Wrote {} ({}x{}, sha256 {})",
        path.display(),
        image.width(),
        image.height(),
        digest(encoded.get_ref())
    );
    Ok(())
}

/// Write UTF-8 text to `path`, creating parent directories.
pub fn write_text(text: &str, path: &Path) -> Result<()> {
    write_bytes(text.as_bytes(), path)?;
    debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}

fn write_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| Error::io(path, e))
}

/// Generate the whole asset pack described by `config`.
///
/// Fails with [`Error::MissingSourceIcon`] before touching the filesystem
/// when the brand icon is absent.
pub fn run(config: &AssetConfig) -> Result<Report> {
    if !config.source_icon.is_file() {
        return Err(Error::MissingSourceIcon {
            path: config.source_icon.clone(),
        });
    }

    for dir in [&config.icon_dir, &config.screenshot_dir, &config.metadata_dir] {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let fonts = config.fonts.resolve_set();
    let mut report = Report {
        output_dir: config.output_dir.clone(),
        written: Vec::new(),
    };

    info!("Building master icon from {}", config.display_path(&config.source_icon));
    let master = MasterIcon::load(config)?;
    report.written.extend(icon::write_icon_files(config, &master, &fonts)?);

    info!("Propagating launcher icons");
    report
        .written
        .extend(platform::propagate(&master, &platform::icon_sets(config))?);

    info!("Rendering launch images");
    report.written.extend(write_launch_images(&master, &config.launch_images)?);

    info!("Rendering screenshots for {} device tiers", config.tiers.len());
    report.written.extend(generate_screenshots(config, &master, &fonts)?);

    info!("Writing listing metadata");
    report.written.extend(metadata::write_metadata(config)?);

    info!("Generated {} files under {}", report.written.len(), config.output_dir.display());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn write_png_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("x.png");
        write_png(&RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])), &path).unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (3, 2));
    }

    #[test]
    fn write_text_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes").join("README.md");
        write_text("old", &path).unwrap();
        write_text("new", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn digest_is_short_and_stable() {
        assert_eq!(digest(b"abc"), "ba7816bf8f01");
        assert_eq!(digest(b"abc").len(), 12);
    }

    #[test]
    fn missing_icon_fails_before_creating_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = AssetConfig::for_project(dir.path());
        let err = run(&config).unwrap_err();
        assert!(matches!(err, Error::MissingSourceIcon { .. }));
        assert!(err.to_string().starts_with("Missing source icon: "));
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn absolute_output_dir_resolves_relative_components() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("output").join("app_store")).unwrap();
        let report = Report {
            output_dir: dir.path().join("output").join(".").join("app_store"),
            written: Vec::new(),
        };
        let resolved = report.absolute_output_dir();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("output/app_store"));
        assert!(!resolved.components().any(|c| matches!(c, std::path::Component::CurDir)));

        let missing = Report {
            output_dir: PathBuf::from("./does-not-exist"),
            written: Vec::new(),
        };
        assert_eq!(missing.absolute_output_dir(), PathBuf::from("./does-not-exist"));
    }

    #[test]
    fn report_filters_by_directory() {
        let report = Report {
            output_dir: PathBuf::from("/out"),
            written: vec![PathBuf::from("/out/a.png"), PathBuf::from("/proj/b.png")],
        };
        assert_eq!(report.under(Path::new("/out")).count(), 1);
    }
}
