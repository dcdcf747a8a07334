//! Condition category to display glyph.

/// Glyph used for any category missing from the table.
pub const FALLBACK_ICON: &str = "🌤️";

const ICONS: &[(&str, &str)] = &[
    ("Clear", "☀️"),
    ("Clouds", "☁️"),
    ("Rain", "🌧️"),
    ("Drizzle", "🌦️"),
    ("Thunderstorm", "⛈️"),
    ("Snow", "❄️"),
    ("Mist", "🌫️"),
    ("Smoke", "🌫️"),
    ("Haze", "🌫️"),
    ("Dust", "🌫️"),
    ("Fog", "🌫️"),
    ("Sand", "🌫️"),
    ("Ash", "🌫️"),
    ("Squall", "💨"),
    ("Tornado", "🌪️"),
];

/// Resolve the glyph for a condition category. Matching is exact and case-sensitive.
pub fn icon_for(category: &str) -> &'static str {
    ICONS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(FALLBACK_ICON)
}

/// All categories with a dedicated glyph, in table order.
pub fn categories() -> impl Iterator<Item = (&'static str, &'static str)> {
    ICONS.iter().copied()
}
