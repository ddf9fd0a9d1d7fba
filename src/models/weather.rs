use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// `chrono` format for a forecast day, e.g. `Tue Jan 02 2024`.
const FORECAST_DAY_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub forecast: String,
    pub time: String,
}

impl WeatherRecord {
    /// Returns `None` when `unix_seconds` is outside chrono's representable range.
    #[must_use]
    pub fn from_daily(summary: impl Into<String>, unix_seconds: i64) -> Option<Self> {
        Some(Self {
            forecast: summary.into(),
            time: format_forecast_day(unix_seconds)?,
        })
    }
}

/// Renders a unix timestamp as a fixed-width (15 char) UTC day string.
#[must_use]
pub fn format_forecast_day(unix_seconds: i64) -> Option<String> {
    DateTime::from_timestamp(unix_seconds, 0).map(|dt| dt.format(FORECAST_DAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_known_day() {
        // 2024-01-02T08:00:00Z
        assert_eq!(format_forecast_day(1_704_182_400).as_deref(), Some("Tue Jan 02 2024"));
    }

    #[test]
    fn day_string_is_fixed_width() {
        for ts in [0_i64, 1_540_018_800, 1_704_182_400, 4_102_444_800] {
            assert_eq!(format_forecast_day(ts).unwrap().len(), 15);
        }
    }

    #[test]
    fn out_of_range_timestamp_is_rejected() {
        assert!(WeatherRecord::from_daily("Clear", i64::MAX).is_none());
    }
}
