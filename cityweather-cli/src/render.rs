use cityweather_core::{
    LookupError, LookupState, Panel, WeatherSummary, config::API_KEY_ENV, icon,
};

pub fn header() -> String {
    format!("{} Weather\nGet weather info for any city!\n", icon::FALLBACK_ICON)
}

/// Text for whichever panel the snapshot selects.
pub fn panel(state: &LookupState) -> String {
    match state.panel() {
        Panel::Instructions => instructions(),
        Panel::Loading => loading(state.query.trim()),
        Panel::Error => state.error().map(error).unwrap_or_default(),
        Panel::Result => state.summary().map(summary).unwrap_or_default(),
    }
}

pub fn instructions() -> String {
    format!(
        "🚀 Getting started:\n  \
         1. Sign up at openweathermap.org\n  \
         2. Get your free API key\n  \
         3. Export {API_KEY_ENV}=<key> or run `cityweather configure`\n  \
         4. Try searching for \"Miami\" or \"New York\"!\n"
    )
}

pub fn loading(place: &str) -> String {
    format!("⏳ Looking up {place}...")
}

pub fn error(err: &LookupError) -> String {
    format!("❌ {err}")
}

pub fn summary(s: &WeatherSummary) -> String {
    let mut out = format!(
        "{}\n{}\n\n{}  {}°C\nFeels like {}°C\n\n💧 Humidity  {}%\n💨 Wind      {} m/s\n",
        s.location_label(),
        s.description,
        s.icon(),
        s.temperature_display(),
        s.feels_like_display(),
        s.humidity_pct,
        s.wind_speed_mps,
    );
    if let Some(at) = s.observed_at {
        out.push_str(&format!("Updated {}\n", at.format("%Y-%m-%d %H:%M UTC")));
    }
    out
}

/// Category table plus the fallback glyph.
pub fn icon_table() -> String {
    let mut out = String::new();
    for (category, glyph) in icon::categories() {
        out.push_str(&format!("{category:<14}{glyph}\n"));
    }
    out.push_str(&format!("{:<14}{}\n", "(other)", icon::FALLBACK_ICON));
    out
}
