//! Color ramps and market classification for the population and density tile layers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let packed = u32::from_str_radix(digits, 16).ok()?;
        let [_, r, g, b] = packed.to_be_bytes();
        Some(Self::new(r, g, b))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgb,
}

const fn stop(value: f64, r: u8, g: u8, b: u8) -> ColorStop {
    ColorStop {
        value,
        color: Rgb::new(r, g, b),
    }
}

/// Residents per grid cell, blue (sparse) through red (25k+).
pub const POPULATION_STOPS: &[ColorStop] = &[
    stop(0.0, 0x32, 0x88, 0xbd),
    stop(1_000.0, 0x66, 0xc2, 0xa5),
    stop(5_000.0, 0xab, 0xdd, 0xa4),
    stop(10_000.0, 0xe6, 0xf5, 0x98),
    stop(15_000.0, 0xfe, 0xe0, 0x8b),
    stop(20_000.0, 0xfd, 0xae, 0x61),
    stop(25_000.0, 0xf4, 0x6d, 0x43),
];

/// Men per barbershop, same palette compressed to 0..2000.
pub const DENSITY_STOPS: &[ColorStop] = &[
    stop(0.0, 0x32, 0x88, 0xbd),
    stop(250.0, 0x66, 0xc2, 0xa5),
    stop(500.0, 0xab, 0xdd, 0xa4),
    stop(750.0, 0xe6, 0xf5, 0x98),
    stop(1_000.0, 0xfe, 0xe0, 0x8b),
    stop(1_500.0, 0xfd, 0xae, 0x61),
    stop(2_000.0, 0xf4, 0x6d, 0x43),
];

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mix(from: u8, to: u8, ratio: f64) -> u8 {
    (f64::from(from) * (1.0 - ratio) + f64::from(to) * ratio)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Linearly interpolate `value` across ascending `stops`, channel by channel.
///
/// Values outside the ramp clamp to the end colors. Returns `None` only when
/// `stops` is empty.
#[must_use]
pub fn interpolate_color(value: f64, stops: &[ColorStop]) -> Option<Rgb> {
    let first = stops.first()?;
    for pair in stops.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if value >= start.value && value <= end.value {
            let span = end.value - start.value;
            if span <= 0.0 {
                return Some(start.color);
            }
            let ratio = (value - start.value) / span;
            return Some(Rgb::new(
                mix(start.color.r, end.color.r, ratio),
                mix(start.color.g, end.color.g, ratio),
                mix(start.color.b, end.color.b, ratio),
            ));
        }
    }

    let last = stops.last()?;
    if value > last.value {
        Some(last.color)
    } else {
        Some(first.color)
    }
}

#[must_use]
pub fn population_color(population: f64) -> Rgb {
    interpolate_color(population, POPULATION_STOPS).unwrap_or(Rgb::BLACK)
}

#[must_use]
pub fn density_color(density_score: f64) -> Rgb {
    interpolate_color(density_score, DENSITY_STOPS).unwrap_or(Rgb::BLACK)
}

/// How crowded a grid cell's market is, judged by men per barbershop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketStatus {
    VeryHighOpportunity,
    HighOpportunity,
    GoodOpportunity,
    Moderate,
    Balanced,
    Competitive,
    Saturated,
}

impl MarketStatus {
    #[must_use]
    pub fn classify(density_score: f64) -> Self {
        match density_score {
            s if s >= 4_000.0 => Self::VeryHighOpportunity,
            s if s >= 3_000.0 => Self::HighOpportunity,
            s if s >= 2_000.0 => Self::GoodOpportunity,
            s if s >= 1_500.0 => Self::Moderate,
            s if s >= 1_000.0 => Self::Balanced,
            s if s >= 500.0 => Self::Competitive,
            _ => Self::Saturated,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHighOpportunity => "Very High Opportunity",
            Self::HighOpportunity => "High Opportunity",
            Self::GoodOpportunity => "Good Opportunity",
            Self::Moderate => "Moderate",
            Self::Balanced => "Balanced",
            Self::Competitive => "Competitive",
            Self::Saturated => "Saturated",
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::VeryHighOpportunity => "🔥",
            Self::HighOpportunity => "🔴",
            Self::GoodOpportunity => "🟠",
            Self::Moderate => "🟡",
            Self::Balanced => "🟢",
            Self::Competitive => "🔵",
            Self::Saturated => "❄️",
        }
    }
}

impl std::fmt::Display for MarketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_of_palette_entry() {
        let c = Rgb::from_hex("#3288bd").unwrap();
        assert_eq!(c, Rgb::new(0x32, 0x88, 0xbd));
        assert_eq!(c.to_hex(), "#3288bd");
        assert_eq!(Rgb::from_hex("3288bd"), Some(c));
        assert_eq!(Rgb::from_hex("#32"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
    }

    #[test]
    fn from_hex_rejects_sign_prefix() {
        assert_eq!(Rgb::from_hex("#+abcde"), None);
        assert_eq!(Rgb::from_hex("-abcde"), None);
    }

    #[test]
    fn display_is_css_rgb() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
    }

    #[test]
    fn exact_stop_returns_stop_color() {
        assert_eq!(density_color(0.0), Rgb::new(0x32, 0x88, 0xbd));
        assert_eq!(density_color(500.0), Rgb::new(0xab, 0xdd, 0xa4));
        assert_eq!(population_color(25_000.0), Rgb::new(0xf4, 0x6d, 0x43));
    }

    #[test]
    fn midpoint_blends_channels() {
        // Halfway between #3288bd and #66c2a5: (50+102)/2, (136+194)/2, (189+165)/2
        assert_eq!(density_color(125.0), Rgb::new(76, 165, 177));
        assert_eq!(population_color(500.0), Rgb::new(76, 165, 177));
    }

    #[test]
    fn out_of_range_clamps_to_ends() {
        assert_eq!(density_color(-10.0), Rgb::new(0x32, 0x88, 0xbd));
        assert_eq!(density_color(9_999.0), Rgb::new(0xf4, 0x6d, 0x43));
        assert_eq!(density_color(f64::NAN), Rgb::new(0x32, 0x88, 0xbd));
    }

    #[test]
    fn empty_ramp_has_no_color() {
        assert_eq!(interpolate_color(1.0, &[]), None);
    }

    #[test]
    fn duplicate_stops_do_not_produce_nan() {
        let stops = [stop(10.0, 0, 0, 0), stop(10.0, 255, 255, 255)];
        assert_eq!(interpolate_color(10.0, &stops), Some(Rgb::BLACK));
    }

    #[test]
    fn classify_thresholds_are_inclusive() {
        assert_eq!(MarketStatus::classify(4_000.0), MarketStatus::VeryHighOpportunity);
        assert_eq!(MarketStatus::classify(3_999.9), MarketStatus::HighOpportunity);
        assert_eq!(MarketStatus::classify(2_000.0), MarketStatus::GoodOpportunity);
        assert_eq!(MarketStatus::classify(1_500.0), MarketStatus::Moderate);
        assert_eq!(MarketStatus::classify(1_000.0), MarketStatus::Balanced);
        assert_eq!(MarketStatus::classify(500.0), MarketStatus::Competitive);
        assert_eq!(MarketStatus::classify(499.0), MarketStatus::Saturated);
        assert_eq!(MarketStatus::classify(0.0).to_string(), "Saturated");
    }
}
