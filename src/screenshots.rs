//! Marketing screenshot composition
//!
//! Every shot is laid out top to bottom: a translucent badge chip with the
//! app icon and name, the wrapped title and subtitle, then a device mockup
//! holding the app screen. Wide tiers add a smaller floating card beside the
//! device.

use std::collections::BTreeMap;
use std::path::PathBuf;

use image::{DynamicImage, Rgba, RgbImage};
use log::{debug, info};

use crate::catalog::{DeviceTier, ShotSpec, BADGE_LABEL, SHOTS};
use crate::icon::MasterIcon;
use crate::pipeline::write_png;
use crate::rendering::layout::{center_lines, wrap_text, Rect, TextBlock};
use crate::rendering::paint::{backdrop, PaintCommand, Shape};
use crate::rendering::raster::{self, fit, rasterize};
use crate::rendering::text::{FontSet, Weight};
use crate::rendering::{parse_hex, TextPalette};
use crate::{AssetConfig, Error, Result};

/// Height-to-width ratio of the device body.
const DEVICE_ASPECT: f32 = 2.08;
/// Margin the floating card keeps from the right canvas edge.
const CARD_EDGE_MARGIN: i32 = 28;
/// Inset of the screenshot inside the floating card.
const CARD_INSET: u32 = 18;
/// Edge of the icon copy handed to the badge chip.
const BADGE_ICON_SOURCE: u32 = 160;

/// Device mockup geometry for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceFrame {
    pub body: Rect,
    pub corner: f32,
    pub screen: Rect,
    pub screen_corner: f32,
    pub notch: Rect,
    pub shadow: Rect,
    pub shadow_corner: f32,
    /// Secondary card, only on wide tiers and only when it fits.
    pub card: Option<Rect>,
}

impl DeviceFrame {
    /// Size and place the device below `content_bottom` on `tier`.
    ///
    /// On wide tiers the device and card are centered as a group so the card
    /// lands inside the canvas.
    pub fn layout(tier: &DeviceTier, content_bottom: i32) -> Self {
        let (w, h) = (tier.width as i32, tier.height as i32);
        let wf = tier.width as f32;
        let hf = tier.height as f32;

        let mut phone_w = (wf * if tier.wide { 0.46 } else { 0.66 }) as i32;
        let mut phone_h = (phone_w as f32 * DEVICE_ASPECT) as i32;
        let max_phone_h = (hf * if tier.wide { 0.56 } else { 0.60 }) as i32;
        if phone_h > max_phone_h {
            phone_h = max_phone_h;
            phone_w = (phone_h as f32 / DEVICE_ASPECT) as i32;
        }
        phone_w = phone_w.max(1);
        phone_h = phone_h.max(1);

        let card_w = (wf * 0.30) as i32;
        let card_gap = (w / 65).max(26);
        let mut phone_x = (w - phone_w) / 2;
        if tier.wide {
            let group = phone_w + card_gap + card_w;
            if group + 2 * CARD_EDGE_MARGIN <= w {
                phone_x = (w - group) / 2;
            }
        }

        let bottom_margin = (h / 38).max(40);
        let mut phone_y = content_bottom + (h / 90).max(26);
        if phone_y + phone_h > h - bottom_margin {
            phone_y = h - phone_h - bottom_margin;
        }
        let body = Rect::new(phone_x, phone_y, phone_w as u32, phone_h as u32);

        let shadow_drop = (h / 220).max(8);
        let margin_x = (phone_w / 24).max(14);
        let margin_top = (phone_h / 30).max(20);
        let margin_bottom = (phone_h / 38).max(16);
        let screen = Rect::from_corners(
            phone_x + margin_x,
            phone_y + margin_top,
            (phone_x + phone_w - margin_x).max(phone_x + margin_x + 1),
            (phone_y + phone_h - margin_bottom).max(phone_y + margin_top + 1),
        );

        let notch_w = (phone_w / 3).max(72);
        let notch_h = (phone_h / 35).max(24);
        let notch = Rect::new(
            phone_x + (phone_w - notch_w) / 2,
            phone_y + (phone_h / 42).max(10),
            notch_w as u32,
            notch_h as u32,
        );

        let card = tier
            .wide
            .then(|| {
                let card_h = (card_w as f32 * 1.84) as i32;
                let card_x = phone_x + phone_w + card_gap;
                let card_y = phone_y + (phone_h as f32 * 0.12) as i32;
                Rect::new(card_x, card_y, card_w.max(0) as u32, card_h.max(0) as u32)
            })
            .filter(|card| card.right() < w - CARD_EDGE_MARGIN && card.width > CARD_INSET * 2);

        Self {
            body,
            corner: (phone_w / 10).max(26) as f32,
            screen,
            screen_corner: (phone_w / 16).max(20) as f32,
            notch,
            shadow: body.translate(0, shadow_drop),
            shadow_corner: (phone_w / 11).max(24) as f32,
            card,
        }
    }
}

/// Compose one marketing screenshot.
pub fn render_shot(
    tier: &DeviceTier,
    spec: &ShotSpec,
    screen: &RgbImage,
    badge_icon: &RgbImage,
    fonts: &FontSet,
) -> Result<RgbImage> {
    let (width, height) = (tier.width, tier.height);
    let (w, h) = (width as i32, height as i32);
    let mut canvas = backdrop(width, height, &spec.palette)?;
    let mut commands = Vec::new();

    let bold = fonts.face(Weight::Bold);
    let regular = fonts.face(Weight::Regular);
    let title_px = (width / 14).max(56) as f32;
    let subtitle_px = (width / 34).max(30) as f32;
    let badge_px = (width / 44).max(24) as f32;

    // Badge chip
    let chip_h = (h / 35).max(58);
    let chip_w = (w / 3).max(250);
    let chip = Rect::new((w - chip_w) / 2, (h / 34).max(66), chip_w as u32, chip_h as u32);
    let chip_shape = Shape::rounded(chip, (chip_h / 2) as f32);
    commands.push(PaintCommand::Fill {
        shape: chip_shape,
        color: Rgba([255, 255, 255, 178]),
    });
    commands.push(PaintCommand::Stroke {
        shape: chip_shape,
        color: Rgba([255, 255, 255, 200]),
        width: (w / 520).max(1) as f32,
    });

    let icon_pad = (chip_h / 6).max(10);
    let icon_edge = (chip_h - icon_pad).max(1);
    let icon_x = chip.x + icon_pad;
    commands.push(PaintCommand::Image {
        image: DynamicImage::ImageRgb8(raster::resize(badge_icon, icon_edge as u32, icon_edge as u32)).to_rgba8(),
        x: icon_x,
        y: chip.y + (chip_h - icon_edge) / 2,
        corner_radius: None,
    });

    let label_h = bold.line_height(badge_px) as i32;
    commands.push(PaintCommand::Text {
        x: icon_x + icon_edge + (w / 120).max(12),
        y: chip.y + (chip_h - label_h) / 2,
        text: BADGE_LABEL.to_string(),
        face: bold.clone(),
        px: badge_px,
        color: Rgba([8, 40, 40, 240]),
    });

    // Headline
    let max_text_w = (width as f32 * if tier.wide { 0.80 } else { 0.86 }) as u32;
    let title_lines = wrap_text(spec.title, max_text_w, |s| bold.measure(s, title_px).width);
    let subtitle_lines = wrap_text(spec.subtitle, max_text_w, |s| regular.measure(s, subtitle_px).width);
    let text_colors = TextPalette::for_background(parse_hex(spec.palette[0])?);

    let (title_cmds, y) = center_lines(
        &TextBlock {
            lines: &title_lines,
            face: bold,
            px: title_px,
            color: text_colors.title,
            line_gap: (height / 210).max(10),
        },
        w / 2,
        chip.bottom() + (h / 40).max(46),
    );
    commands.extend(title_cmds);

    let (subtitle_cmds, y) = center_lines(
        &TextBlock {
            lines: &subtitle_lines,
            face: regular,
            px: subtitle_px,
            color: text_colors.subtitle,
            line_gap: (height / 260).max(6),
        },
        w / 2,
        y + (h / 120).max(12),
    );
    commands.extend(subtitle_cmds);

    // Device
    let frame = DeviceFrame::layout(tier, y);
    commands.push(PaintCommand::Blurred {
        shape: Shape::rounded(frame.shadow, frame.shadow_corner),
        color: Rgba([0, 0, 0, 105]),
        sigma: (w / 78).max(8) as f32,
    });
    commands.push(PaintCommand::Fill {
        shape: Shape::rounded(frame.body, frame.corner),
        color: Rgba([19, 26, 28, 255]),
    });
    let fitted = fit(screen, frame.screen.width, frame.screen.height, (0.5, 0.03));
    commands.push(PaintCommand::Image {
        image: DynamicImage::ImageRgb8(fitted).to_rgba8(),
        x: frame.screen.x,
        y: frame.screen.y,
        corner_radius: Some(frame.screen_corner),
    });
    commands.push(PaintCommand::Fill {
        shape: Shape::rounded(frame.notch, (frame.notch.height / 2) as f32),
        color: Rgba([15, 20, 22, 240]),
    });

    if let Some(card) = frame.card {
        let corner = (card.width / 12).max(20) as f32;
        commands.push(PaintCommand::Blurred {
            shape: Shape::rounded(card.translate(0, 8), corner),
            color: Rgba([0, 0, 0, 85]),
            sigma: (w / 120).max(6) as f32,
        });
        commands.push(PaintCommand::Fill {
            shape: Shape::rounded(card, corner),
            color: Rgba([255, 255, 255, 218]),
        });
        let mini = fit(
            screen,
            card.width - CARD_INSET * 2,
            card.height.saturating_sub(CARD_INSET * 2).max(1),
            (0.5, 0.08),
        );
        commands.push(PaintCommand::Image {
            image: DynamicImage::ImageRgb8(mini).to_rgba8(),
            x: card.x + CARD_INSET as i32,
            y: card.y + CARD_INSET as i32,
            corner_radius: Some(CARD_INSET as f32),
        });
    }

    rasterize(&mut canvas, &commands)?;
    Ok(raster::flatten(&canvas))
}

/// Decode every screen the shot list refers to.
fn load_screens(config: &AssetConfig, shots: &[ShotSpec]) -> Result<BTreeMap<&'static str, RgbImage>> {
    let mut screens = BTreeMap::new();
    for shot in shots {
        if screens.contains_key(shot.source_key) {
            continue;
        }
        let path = config
            .source_screens
            .get(shot.source_key)
            .ok_or_else(|| Error::UnknownScreen(shot.source_key.to_string()))?;
        let image = image::open(path)?.to_rgb8();
        debug!("Loaded screen '{}' from {}", shot.source_key, path.display());
        screens.insert(shot.source_key, image);
    }
    Ok(screens)
}

/// Render every shot for every configured tier into `<screenshots>/<tier>/NN.png`.
pub fn generate_screenshots(config: &AssetConfig, master: &MasterIcon, fonts: &FontSet) -> Result<Vec<PathBuf>> {
    let badge_icon = master.resized(BADGE_ICON_SOURCE);
    let screens = load_screens(config, &SHOTS)?;

    let mut written = Vec::new();
    for tier in &config.tiers {
        let tier_dir = config.screenshot_dir.join(&tier.name);
        std::fs::create_dir_all(&tier_dir).map_err(|e| Error::io(&tier_dir, e))?;
        for (index, shot) in SHOTS.iter().enumerate() {
            let screen = &screens[shot.source_key];
            let image = render_shot(tier, shot, screen, &badge_icon, fonts)?;
            let path = tier_dir.join(format!("{:02}.png", index + 1));
            write_png(&image, &path)?;
            written.push(path);
        }
        info!("Rendered {} screenshots for {} ({}x{})", SHOTS.len(), tier.name, tier.width, tier.height);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_tiers;
    use image::Rgb;

    #[test]
    fn phone_tiers_have_no_card() {
        for tier in default_tiers().iter().filter(|t| !t.wide) {
            let frame = DeviceFrame::layout(tier, 600);
            assert!(frame.card.is_none());
            assert_eq!(frame.body.x, (tier.width as i32 - frame.body.width as i32) / 2);
            assert!(frame.body.bottom() <= tier.height as i32 - 40);
        }
    }

    #[test]
    fn wide_tier_card_fits_inside_canvas() {
        let tier = DeviceTier::new("ipad_13", 2064, 2752, true);
        let frame = DeviceFrame::layout(&tier, 700);
        let card = frame.card.expect("wide tier should place a card");
        assert!(card.right() < 2064 - CARD_EDGE_MARGIN);
        assert!(card.x > frame.body.right());
        // height-capped device: 56% of the canvas
        assert_eq!(frame.body.height, (2752.0 * 0.56) as u32);
    }

    #[test]
    fn screen_sits_inside_the_body() {
        let tier = DeviceTier::new("iphone_6.7", 1290, 2796, false);
        let frame = DeviceFrame::layout(&tier, 500);
        assert!(frame.screen.x > frame.body.x);
        assert!(frame.screen.right() < frame.body.right());
        assert!(frame.screen.y > frame.body.y);
        assert!(frame.screen.bottom() < frame.body.bottom());
        assert!(frame.notch.y > frame.body.y);
    }

    #[test]
    fn device_is_pushed_up_when_text_runs_long() {
        let tier = DeviceTier::new("small", 322, 699, false);
        let frame = DeviceFrame::layout(&tier, 650);
        assert_eq!(frame.body.bottom(), 699 - 40);
    }

    #[test]
    fn renders_at_tier_size_for_small_tiers() {
        let screen = RgbImage::from_pixel(120, 260, Rgb([240, 240, 240]));
        let icon = RgbImage::from_pixel(160, 160, Rgb([0, 120, 110]));
        let fonts = FontSet::builtin();
        for tier in [
            DeviceTier::new("narrow", 322, 699, false),
            DeviceTier::new("wide", 516, 688, true),
        ] {
            let shot = render_shot(&tier, &SHOTS[1], &screen, &icon, &fonts).unwrap();
            assert_eq!(shot.dimensions(), (tier.width, tier.height));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let screen = RgbImage::from_fn(90, 200, |x, y| Rgb([(x * 2) as u8, (y % 256) as u8, 128]));
        let icon = RgbImage::from_pixel(160, 160, Rgb([0, 120, 110]));
        let tier = DeviceTier::new("t", 300, 600, false);
        let fonts = FontSet::builtin();
        let a = render_shot(&tier, &SHOTS[0], &screen, &icon, &fonts).unwrap();
        let b = render_shot(&tier, &SHOTS[0], &screen, &icon, &fonts).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn missing_screen_key_is_reported() {
        let mut config = AssetConfig::for_project("/nowhere");
        config.source_screens.remove("stats");
        assert!(matches!(load_screens(&config, &SHOTS), Err(Error::UnknownScreen(key)) if key == "stats"));
    }
}
