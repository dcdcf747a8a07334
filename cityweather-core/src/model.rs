use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::LookupError, icon};

/// Current conditions for one place, as returned by a provider.
///
/// Values are stored unrounded; rounding happens only in the `*_display` helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub place: String,
    pub country: String,
    pub description: String,
    /// Coarse category such as "Rain" or "Clear"; only used to pick an icon.
    pub category: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSummary {
    pub fn temperature_display(&self) -> i64 {
        self.temperature_c.round() as i64
    }

    pub fn feels_like_display(&self) -> i64 {
        self.feels_like_c.round() as i64
    }

    pub fn icon(&self) -> &'static str {
        icon::icon_for(&self.category)
    }

    /// "Miami, US"
    pub fn location_label(&self) -> String {
        format!("{}, {}", self.place, self.country)
    }
}

/// Trim the user's input and reject it when nothing is left.
pub fn validate_query(query: &str) -> Result<&str, LookupError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(LookupError::EmptyQuery);
    }
    Ok(trimmed)
}
