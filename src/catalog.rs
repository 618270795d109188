//! The fixed marketing shot list and device size tiers.

/// One marketing screenshot: headline copy, which app screen to frame, and
/// the four backdrop colors (vertical pair, then horizontal pair).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotSpec {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub source_key: &'static str,
    pub palette: [&'static str; 4],
}

/// A store screenshot canvas size. `wide` tiers get the secondary device card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceTier {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub wide: bool,
}

impl DeviceTier {
    pub fn new(name: impl Into<String>, width: u32, height: u32, wide: bool) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            wide,
        }
    }
}

/// Label on the chip at the top of every screenshot.
pub const BADGE_LABEL: &str = "PETROL LOG";

pub const SHOTS: [ShotSpec; 5] = [
    ShotSpec {
        title: "Log Fuel Stops In Seconds",
        subtitle: "Capture odometer, cost, and notes in one focused flow.",
        source_key: "add",
        palette: ["#F7FCFB", "#DBF6F2", "#E9FFFC", "#C6EFE7"],
    },
    ShotSpec {
        title: "See Efficiency At A Glance",
        subtitle: "Instant analytics for mileage, spend trends, and refill rhythm.",
        source_key: "stats",
        palette: ["#0A1F21", "#0D3A3B", "#0E2F31", "#113E3B"],
    },
    ShotSpec {
        title: "Never Miss A Refill",
        subtitle: "Refuel Radar projects your next stop and expected spend.",
        source_key: "feed_dark",
        palette: ["#071A1B", "#0A3130", "#0D2A2B", "#11413E"],
    },
    ShotSpec {
        title: "Track Every Expense Clearly",
        subtitle: "History cards surface cost, volume, and interval with zero clutter.",
        source_key: "feed",
        palette: ["#F8FAFC", "#E6F6F3", "#F1FCF9", "#D4F0E9"],
    },
    ShotSpec {
        title: "Tune It To Your Region",
        subtitle: "Set fuel price, currency, and appearance in a few taps.",
        source_key: "settings",
        palette: ["#F7FBFE", "#E9F7FF", "#ECF8F5", "#D9EFE8"],
    },
];

/// Store-required screenshot sizes.
pub fn default_tiers() -> Vec<DeviceTier> {
    vec![
        DeviceTier::new("iphone_6.7", 1290, 2796, false),
        DeviceTier::new("iphone_6.5", 1242, 2688, false),
        DeviceTier::new("ipad_13", 2064, 2752, true),
    ]
}
