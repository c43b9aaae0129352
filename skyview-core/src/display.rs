//! Day/night theme derivation and condition glyphs.
//!
//! The theme is an explicit value passed to the rendering boundary, not a
//! global. It is derived from the data (OpenWeather icon codes end in "n"
//! at night) and the user can still toggle it afterwards.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Night,
    Day,
}

impl Theme {
    /// Derive the theme from an icon code ("01d", "10n", ...).
    pub fn for_icon(icon: &str) -> Self {
        if icon.ends_with('n') {
            Self::Night
        } else {
            Self::Day
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }
}

/// Display state handed to the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DisplayState {
    pub theme: Theme,
}

impl DisplayState {
    /// Display state matching the current conditions' icon code.
    pub fn for_icon(icon: &str) -> Self {
        Self {
            theme: Theme::for_icon(icon),
        }
    }

    pub fn toggled(self) -> Self {
        Self {
            theme: self.theme.toggled(),
        }
    }
}

/// Emoji glyph for a condition group such as "Clouds" or "Drizzle".
pub fn glyph(condition: &str, theme: Theme) -> &'static str {
    let c = condition.to_lowercase();
    if c.contains("clear") {
        return match theme {
            Theme::Night => "🌙",
            Theme::Day => "☀️",
        };
    }
    if c.contains("cloud") {
        return "☁️";
    }
    if c.contains("rain") || c.contains("drizzle") {
        return "🌧️";
    }
    if c.contains("thunder") {
        return "⛈️";
    }
    if c.contains("snow") {
        return "❄️";
    }
    if c.contains("mist") || c.contains("fog") || c.contains("haze") {
        return "🌫️";
    }
    "⛅"
}
