use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A single latitude/longitude fix, in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions for one place, as shown by the home and search screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentReport {
    pub city: String,
    /// ISO country code; empty when the provider omits it.
    pub country: String,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Coarse condition group from the provider: "Clear", "Rain", "Clouds", ...
    pub group: String,
    /// Localized condition description, e.g. "cielo claro".
    pub description: String,
    /// Provider icon id, e.g. "01d".
    pub icon: String,
}

/// One 3-hour snapshot from the 5-day forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSlot {
    /// Local timestamp of the snapshot, as reported by the provider.
    pub stamp: NaiveDateTime,
    pub temperature_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub group: String,
    pub description: String,
    pub icon: String,
}

/// Full 5-day / 3-hour forecast for one place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub city: String,
    pub country: String,
    pub slots: Vec<ForecastSlot>,
}

/// Number of 3-hour slots the hourly screen shows (~36 hours).
pub const HOURLY_SLOTS: usize = 12;

impl ForecastReport {
    /// Keep only the slots stamped at local noon, in order: roughly one
    /// per day of the forecast window.
    pub fn daily_at_noon(&self) -> Vec<&ForecastSlot> {
        self.slots.iter().filter(|s| is_noon(s)).collect()
    }

    /// The first `n` slots in original order; shorter lists come back whole.
    pub fn upcoming(&self, n: usize) -> &[ForecastSlot] {
        &self.slots[..self.slots.len().min(n)]
    }
}

fn is_noon(slot: &ForecastSlot) -> bool {
    let t = slot.stamp.time();
    t.hour() == 12 && t.minute() == 0 && t.second() == 0
}

/// Validate a raw search query: trimmed and non-empty, or nothing.
pub fn city_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Image sizes served by the provider's icon CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconScale {
    /// `@2x`, used by the compact forecast cards.
    Small,
    /// `@4x`, used by the large current-weather cards.
    Large,
}

/// URL of the provider's icon bitmap for an icon id.
pub fn icon_url(icon: &str, scale: IconScale) -> String {
    let suffix = match scale {
        IconScale::Small => "2x",
        IconScale::Large => "4x",
    };
    format!("https://openweathermap.org/img/wn/{icon}@{suffix}.png")
}

/// Terminal stand-in for the provider's icon bitmaps. The two-digit prefix
/// of the icon id selects the condition; the day/night suffix is ignored.
pub fn icon_emoji(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "☀️",
        Some("02") => "🌤",
        Some("03" | "04") => "☁️",
        Some("09") => "🌧",
        Some("10") => "🌦",
        Some("11") => "⛈",
        Some("13") => "❄️",
        Some("50") => "🌫",
        _ => "🌡",
    }
}
