/// Listing copy, screenshot captions and the asset pack README

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::info;

use crate::catalog::ShotSpec;
use crate::pipeline::write_text;
use crate::{AssetConfig, Result, SHOTS};

const LISTING: &str = "# App Store Listing Draft - Petrol Log

## App Name
Petrol Log

## Subtitle (<= 30 chars)
Fuel Tracker and Mileage

## Promotional Text (<= 170 chars)
Track every fuel stop in seconds and keep your mileage, spend, and refill rhythm visible at all times with a clean interface built for daily driving.

## Keywords (<= 100 chars)
fuel tracker,mileage,gas log,car expenses,odometer,petrol,cost tracking,refill

## Description
Petrol Log is a minimal fuel tracker for drivers who care about clean records and accurate insights.

What you can do:
- Log each fill with date, odometer, cost, and notes.
- Review efficiency and refill intervals automatically.
- Analyze monthly fuel spending and mileage trends.
- Use Refuel Radar to estimate your next refill window and projected cost.
- Keep everything in your preferred currency and theme.

Built for speed, clarity, and long-term tracking.
";

pub fn listing() -> &'static str {
    LISTING
}

/// Numbered title and subtitle of every shot, in render order.
pub fn captions(shots: &[ShotSpec]) -> String {
    let mut out = String::from("# Screenshot Caption Set\n");
    for (index, shot) in shots.iter().enumerate() {
        let _ = write!(out, "\n{}. {}\n{}\n", index + 1, shot.title, shot.subtitle);
    }
    out
}

/// Manifest of the generated pack, with paths relative to the project root.
pub fn readme(config: &AssetConfig) -> String {
    let mut out = String::from("# Generated Asset Pack\n\n## Icon\n");
    for path in [config.master_icon_path(), config.preview_path()] {
        let _ = writeln!(out, "- {}", config.display_path(&path));
    }

    out.push_str("\n## App Store Screenshots\n");
    for tier in &config.tiers {
        let dir = config.screenshot_dir.join(&tier.name);
        let _ = writeln!(out, "- {}/", config.display_path(&dir));
    }

    out.push_str("\n## Launcher Icons Updated In Project\n");
    let _ = writeln!(out, "- {}", config.display_path(&config.iconset_dir().join("*")));
    if let Some(pattern) = common_pattern(config, &config.android_icons, "mipmap-*") {
        let _ = writeln!(out, "- {pattern}");
    }
    if let Some(pattern) = common_pattern(config, &config.web_icons, "Icon-*.png") {
        let _ = writeln!(out, "- {pattern}");
    }

    out.push_str("\n## Notes\n");
    out.push_str("- Generated from one brand master icon for consistency.\n");
    if config.tiers.iter().any(|t| t.wide) {
        out.push_str("- iPad screenshots included because the current app supports iPad.\n");
    }
    let _ = writeln!(out, "- Brand icon source: {}", config.display_path(&config.source_icon));
    out
}

/// Collapse a family of launcher icons into one glob line.
///
/// Android icons differ by their density directory, web icons by file name;
/// `glob` replaces whichever component varies.
fn common_pattern(config: &AssetConfig, paths: &[PathBuf], glob: &str) -> Option<String> {
    let first = paths.first()?;
    let pattern: PathBuf = if glob.contains('.') {
        first.parent().unwrap_or(Path::new("")).join(glob)
    } else {
        let dir = first.parent()?;
        dir.parent()?.join(glob).join(first.file_name()?)
    };
    Some(config.display_path(&pattern).into_owned())
}

/// Write the three markdown documents.
pub fn write_metadata(config: &AssetConfig) -> Result<Vec<PathBuf>> {
    let files = [
        (config.metadata_dir.join("app_store_listing.md"), listing().to_string()),
        (config.metadata_dir.join("screenshot_captions.md"), captions(&SHOTS)),
        (config.output_dir.join("README.md"), readme(config)),
    ];
    let mut written = Vec::with_capacity(files.len());
    for (path, text) in files {
        write_text(&text, &path)?;
        written.push(path);
    }
    info!("Wrote listing metadata to {}", config.metadata_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captions_follow_shot_order() {
        let text = captions(&SHOTS);
        assert!(text.starts_with("# Screenshot Caption Set\n\n1. Log Fuel Stops In Seconds\n"));
        assert!(text.contains("\n3. Never Miss A Refill\nRefuel Radar projects your next stop and expected spend.\n"));
        assert!(text.ends_with("5. Tune It To Your Region\nSet fuel price, currency, and appearance in a few taps.\n"));
    }

    #[test]
    fn readme_lists_project_relative_paths() {
        let config = AssetConfig::for_project("/proj");
        let text = readme(&config);
        assert!(text.contains("- output/app_store/icon/petrol_log_icon_1024.png\n"));
        assert!(text.contains("- output/app_store/screenshots/iphone_6.7/\n"));
        assert!(text.contains("- output/app_store/screenshots/ipad_13/\n"));
        assert!(text.contains("- ios/Runner/Assets.xcassets/AppIcon.appiconset/*\n"));
        assert!(text.contains("- android/app/src/main/res/mipmap-*/ic_launcher.png\n"));
        assert!(text.contains("- web/icons/Icon-*.png\n"));
        assert!(text.contains("- Brand icon source: assets/branding/app_icon_source.png\n"));
        assert!(text.contains("iPad screenshots included"));
    }

    #[test]
    fn readme_follows_configured_tiers() {
        let mut config = AssetConfig::for_project("/proj");
        config.tiers.retain(|t| !t.wide);
        let text = readme(&config);
        assert!(!text.contains("ipad_13"));
        assert!(!text.contains("iPad screenshots"));
    }

    #[test]
    fn listing_is_fixed_copy() {
        assert!(listing().starts_with("# App Store Listing Draft - Petrol Log\n"));
        assert!(listing().contains("## Keywords (<= 100 chars)\n"));
    }
}
