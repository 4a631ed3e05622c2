//! User display preferences.

use pl_scene::{DisplaySettings, Theme};
use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: f64 = 10.0;
pub const MAX_FONT_SIZE: f64 = 24.0;

/// Preferences handed to every renderer. Owned by the front end and passed
/// down explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub show_grid: bool,
    pub theme: Theme,
    pub font_size: f64,
}

impl Default for UserSettings {
    fn default() -> Self {
        let display = DisplaySettings::default();
        Self {
            show_grid: display.show_grid,
            theme: display.theme,
            font_size: display.font_size,
        }
    }
}

impl UserSettings {
    pub fn display(&self) -> DisplaySettings {
        DisplaySettings {
            show_grid: self.show_grid,
            theme: self.theme,
            font_size: self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
        }
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }
}

impl From<UserSettings> for DisplaySettings {
    fn from(settings: UserSettings) -> Self {
        settings.display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_size_is_limited_for_rendering() {
        let settings = UserSettings {
            font_size: 64.0,
            ..UserSettings::default()
        };
        assert_eq!(settings.display().font_size, MAX_FONT_SIZE);
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let settings: UserSettings = serde_yaml::from_str("theme: dark\n").unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert!(settings.show_grid);
        assert_eq!(settings.font_size, 14.0);
    }
}
