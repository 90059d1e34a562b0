//! Backend configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::{draw::Color, error::ConfigError};

/// Configuration passed to a backend constructor.
///
/// There's two ways to initialize the config:
///
/// # Example
///
/// ```rust
/// # use mini_arcade_backend::Config;
/// Config {
///   title: "My Game".to_owned(),
///   ..Default::default()
/// };
/// ```
///
/// # Example
///
/// ```rust
/// # use mini_arcade_backend::Config;
/// Config::default().with_title("My Game");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Name in the title bar.
    ///
    /// Defaults to `"Mini Arcade"`.
    pub title: String,
    /// Logical width of the frame surface in pixels.
    ///
    /// Defaults to `640`.
    pub width: u32,
    /// Logical height of the frame surface in pixels.
    ///
    /// Defaults to `480`.
    pub height: u32,
    /// Factor applied to the surface size for the requested window size.
    ///
    /// Defaults to `1.0`.
    pub scaling: f32,
    /// Whether to open the window borderless fullscreen on the current monitor.
    ///
    /// Defaults to `false`.
    pub fullscreen: bool,
    /// Upper bound for presented frames per second, `0` disables pacing.
    ///
    /// Defaults to `60`.
    pub frame_rate: u32,
    /// Color the frame surface is reset to at the start of each frame.
    ///
    /// Defaults to black.
    pub background_color: Color,
    /// Directory sprite, font and sound assets are loaded from.
    ///
    /// Defaults to `"assets"`.
    pub asset_dir: PathBuf,
}

impl Config {
    /// Parse a configuration from a TOML document.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// - When the source is not valid TOML or contains unknown fields.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Set the name in the title bar.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();

        self
    }

    /// Set the logical size of the frame surface in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;

        self
    }

    /// Set the factor applied to the surface size for the requested window size.
    pub fn with_scaling(mut self, scaling: f32) -> Self {
        self.scaling = scaling;

        self
    }

    /// Open the window borderless fullscreen on the current monitor.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;

        self
    }

    /// Set the upper bound for presented frames per second, `0` disables pacing.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;

        self
    }

    /// Set the color the frame surface is reset to at the start of each frame.
    pub fn with_background_color(mut self, background_color: Color) -> Self {
        self.background_color = background_color;

        self
    }

    /// Set the directory assets are loaded from.
    pub fn with_asset_dir(mut self, asset_dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = asset_dir.into();

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Mini Arcade".to_string(),
            width: 640,
            height: 480,
            scaling: 1.0,
            fullscreen: false,
            frame_rate: 60,
            background_color: Color::BLACK,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn builders() {
        let config = Config::default()
            .with_title("Test")
            .with_size(320, 240)
            .with_frame_rate(30);

        assert_eq!(config.title, "Test");
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.frame_rate, 30);
        assert!(!config.fullscreen);
    }

    #[test]
    fn from_toml() {
        let config = Config::from_toml_str(
            r#"
            title = "Invaders"
            width = 800
            height = 600
            fullscreen = true
            background_color = { r = 0.1, g = 0.2, b = 0.3 }
            "#,
        )
        .unwrap();

        assert_eq!(config.title, "Invaders");
        assert_eq!((config.width, config.height), (800, 600));
        assert!(config.fullscreen);
        // Alpha channel defaults to fully opaque
        assert_eq!(config.background_color.a, 1.0);
        // Unset fields fall back to defaults
        assert_eq!(config.frame_rate, 60);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(Config::from_toml_str("not_a_field = 1").is_err());
    }
}
