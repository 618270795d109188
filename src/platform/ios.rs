/// Xcode `AppIcon.appiconset` handling: sizes come from `Contents.json`

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::platform::{IconSet, IconTarget};
use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct IconsetManifest {
    #[serde(default)]
    pub images: Vec<IconsetImage>,
}

/// One `images[]` entry. Entries without a `filename` are slots Xcode has no
/// file for and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IconsetImage {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub scale: Option<String>,
}

/// Pixel edge for a manifest `size` (`"83.5x83.5"`) at `scale` (`"2x"`).
pub fn parse_icon_size(size: &str, scale: &str) -> Result<u32> {
    let base: f64 = size
        .split('x')
        .next()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| Error::InvalidIconSize(format!("size '{size}'")))?;
    let factor: u32 = scale
        .trim()
        .trim_end_matches('x')
        .parse()
        .map_err(|_| Error::InvalidIconSize(format!("scale '{scale}'")))?;
    let px = (base * factor as f64).round();
    if !(px >= 1.0 && px <= u32::MAX as f64) {
        return Err(Error::InvalidIconSize(format!("{size} @ {scale}")));
    }
    Ok(px as u32)
}

/// The iOS iconset described by a `Contents.json` manifest.
#[derive(Debug, Clone)]
pub struct Iconset {
    manifest: PathBuf,
}

impl Iconset {
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }

    fn dir(&self) -> &Path {
        self.manifest.parent().unwrap_or_else(|| Path::new("."))
    }

    pub fn read_manifest(&self) -> Result<IconsetManifest> {
        let text = std::fs::read_to_string(&self.manifest).map_err(|e| Error::io(&self.manifest, e))?;
        serde_json::from_str(&text).map_err(|source| Error::Manifest {
            path: self.manifest.clone(),
            source,
        })
    }
}

impl IconSet for Iconset {
    fn name(&self) -> &str {
        "ios"
    }

    fn targets(&self) -> Result<Vec<IconTarget>> {
        let manifest = self.read_manifest()?;
        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for entry in manifest.images {
            let Some(filename) = entry.filename.filter(|f| !f.is_empty()) else {
                continue;
            };
            if !seen.insert(filename.clone()) {
                continue;
            }
            let size = entry
                .size
                .ok_or_else(|| Error::InvalidIconSize(format!("{filename}: missing size")))?;
            let scale = entry
                .scale
                .ok_or_else(|| Error::InvalidIconSize(format!("{filename}: missing scale")))?;
            let px = parse_icon_size(&size, &scale)?;
            targets.push(IconTarget {
                path: self.dir().join(&filename),
                width: px,
                height: px,
            });
        }
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes_and_scales() {
        assert_eq!(parse_icon_size("60x60", "2x").unwrap(), 120);
        assert_eq!(parse_icon_size("60x60", "3x").unwrap(), 180);
        assert_eq!(parse_icon_size("83.5x83.5", "2x").unwrap(), 167);
        assert_eq!(parse_icon_size("1024x1024", "1x").unwrap(), 1024);
        assert!(parse_icon_size("axb", "2x").is_err());
        assert!(parse_icon_size("20x20", "two").is_err());
        assert!(parse_icon_size("0x0", "1x").is_err());
    }

    #[test]
    fn targets_skip_unnamed_and_duplicate_entries() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("Contents.json");
        std::fs::write(
            &manifest,
            r#"{
              "images": [
                {"filename": "a.png", "idiom": "iphone", "size": "60x60", "scale": "2x"},
                {"filename": "b.png", "idiom": "iphone", "size": "60x60", "scale": "3x"},
                {"idiom": "ipad", "size": "76x76", "scale": "1x"},
                {"filename": "a.png", "idiom": "ipad", "size": "20x20", "scale": "1x"}
              ],
              "info": {"version": 1, "author": "xcode"}
            }"#,
        )
        .unwrap();

        let targets = Iconset::new(&manifest).targets().unwrap();
        assert_eq!(
            targets,
            vec![
                IconTarget { path: dir.path().join("a.png"), width: 120, height: 120 },
                IconTarget { path: dir.path().join("b.png"), width: 180, height: 180 },
            ]
        );
    }

    #[test]
    fn entry_keys_beyond_size_and_scale_are_ignored() {
        let manifest: IconsetManifest = serde_json::from_str(
            r#"{"images": [{"filename": "c.png", "idiom": "watch", "role": "appLauncher", "subtype": "40mm", "size": "44x44", "scale": "2x"}]}"#,
        )
        .unwrap();
        assert_eq!(manifest.images.len(), 1);
        assert_eq!(manifest.images[0].filename.as_deref(), Some("c.png"));
        assert_eq!(manifest.images[0].size.as_deref(), Some("44x44"));
    }

    #[test]
    fn malformed_manifest_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("Contents.json");
        std::fs::write(&manifest, "{ not json").unwrap();
        assert!(matches!(Iconset::new(&manifest).targets(), Err(Error::Manifest { .. })));
    }

    #[test]
    fn missing_manifest_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Iconset::new(dir.path().join("Contents.json")).targets();
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
