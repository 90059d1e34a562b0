//! Backend-neutral draw commands and colors.

use serde::Deserialize;
use vek::{Extent2, Vec2};

/// RGBA color with normalized `[0, 1]` channels.
///
/// Converted to packed 8-bit channels at the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel, `1.0` is fully opaque.
    #[serde(default = "Color::default_alpha")]
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a fully opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color with an explicit alpha channel.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Pack into `0xAARRGGBB` with 8-bit channels, clamping each channel.
    pub fn to_pixel(self) -> u32 {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u32;

        channel(self.a) << 24 | channel(self.r) << 16 | channel(self.g) << 8 | channel(self.b)
    }

    /// Serde default for the alpha channel.
    const fn default_alpha() -> f32 {
        1.0
    }
}

/// A single drawing operation applied to the current frame surface.
///
/// Geometry is in logical pixels, before the adapter's viewport transform.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole frame surface with a color.
    Clear {
        /// Fill color.
        color: Color,
    },
    /// Fill an axis-aligned rectangle.
    Rect {
        /// Top-left corner.
        position: Vec2<f32>,
        /// Width and height.
        size: Extent2<f32>,
        /// Fill color.
        color: Color,
    },
    /// Draw a one pixel wide line between two points.
    Line {
        /// Start point.
        start: Vec2<f32>,
        /// End point.
        end: Vec2<f32>,
        /// Line color.
        color: Color,
    },
    /// Blit a sprite asset at its native pixel size.
    Sprite {
        /// Asset identifier of the sprite.
        id: String,
        /// Top-left corner to blit at.
        position: Vec2<f32>,
    },
    /// Draw a string with a bitmap font asset.
    Text {
        /// Asset identifier of the font.
        font: String,
        /// The string to draw, `'\n'` and `'\t'` are handled.
        text: String,
        /// Top-left corner of the first glyph.
        position: Vec2<f32>,
        /// Glyph color.
        color: Color,
    },
}

impl DrawCommand {
    /// Fill the whole frame surface.
    pub const fn clear(color: Color) -> Self {
        Self::Clear { color }
    }

    /// Fill a rectangle at `(x, y)` with dimensions `(width, height)`.
    pub const fn rect(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self::Rect {
            position: Vec2::new(x, y),
            size: Extent2::new(width, height),
            color,
        }
    }

    /// Draw a line from `(x1, y1)` to `(x2, y2)`.
    pub const fn line(x1: f32, y1: f32, x2: f32, y2: f32, color: Color) -> Self {
        Self::Line {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
            color,
        }
    }

    /// Blit the sprite asset `id` with its top-left corner at `(x, y)`.
    pub fn sprite(id: impl Into<String>, x: f32, y: f32) -> Self {
        Self::Sprite {
            id: id.into(),
            position: Vec2::new(x, y),
        }
    }

    /// Draw `text` with the bitmap font asset `font` at `(x, y)`.
    pub fn text(font: impl Into<String>, text: impl Into<String>, x: f32, y: f32, color: Color) -> Self {
        Self::Text {
            font: font.into(),
            text: text.into(),
            position: Vec2::new(x, y),
            color,
        }
    }
}
