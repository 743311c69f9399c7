// Appearance Models
// Theme and color-scheme selection

use serde::{Deserialize, Serialize};

/// Light/dark preference, persisted by canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_name(&self) -> &'static str {
        match self {
            ThemeMode::System => "system",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Decode a stored name. Unknown names return `None` so the caller can
    /// fall back to the default; this is an expected branch, not an error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "system" => Some(ThemeMode::System),
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

/// Color scheme. The default depends on the platform: the Android family
/// follows the system scheme, everywhere else the branded scheme applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    System,
    Localsend,
    Oled,
}

impl ColorMode {
    pub fn as_name(&self) -> &'static str {
        match self {
            ColorMode::System => "system",
            ColorMode::Localsend => "localsend",
            ColorMode::Oled => "oled",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "system" => Some(ColorMode::System),
            "localsend" => Some(ColorMode::Localsend),
            "oled" => Some(ColorMode::Oled),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_name_round_trip() {
        for mode in [ThemeMode::System, ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_name(mode.as_name()), Some(mode));
        }
    }

    #[test]
    fn test_unknown_theme_name_is_none() {
        assert_eq!(ThemeMode::from_name("sepia"), None);
        assert_eq!(ThemeMode::from_name(""), None);
    }

    #[test]
    fn test_color_mode_name_round_trip() {
        for mode in [ColorMode::System, ColorMode::Localsend, ColorMode::Oled] {
            assert_eq!(ColorMode::from_name(mode.as_name()), Some(mode));
        }
    }
}
