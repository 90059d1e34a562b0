//! Bitmap font split from a horizontal strip of equally sized glyphs.
//!
//! A font asset is a PNG strip plus a TOML metadata file under the same
//! identifier describing the glyph size and the covered ASCII range.

use serde::Deserialize;
use vek::{Extent2, Vec2};

use super::{sprite::Sprite, AssetSource, LoadError};
use crate::canvas::Canvas;

/// A font is a glyph strip with fixed-size characters.
#[derive(Debug, Clone)]
pub struct Font {
    /// The glyph strip image.
    strip: Sprite,
    /// Size of a single glyph in pixels.
    glyph_size: Extent2<u32>,
    /// ASCII value of the first glyph in the strip.
    first_char: u32,
    /// ASCII value of the last glyph in the strip.
    last_char: u32,
}

impl Font {
    /// Load the strip PNG and the TOML metadata for an identifier.
    ///
    /// # Errors
    ///
    /// - When the PNG or the TOML file is missing or unreadable.
    /// - When the strip does not cover the declared character range.
    pub fn load(id: &str, source: &AssetSource) -> Result<Self, LoadError> {
        let strip = Sprite::load(id, source)?;

        let metadata = source.raw(id, "toml")?;
        let metadata: FontMetadata = toml::from_str(
            std::str::from_utf8(&metadata).map_err(|source| LoadError::Decode {
                id: id.to_owned(),
                source: Box::new(source),
            })?,
        )
        .map_err(|source| LoadError::Decode {
            id: id.to_owned(),
            source: Box::new(source),
        })?;

        let glyph_size = Extent2::new(metadata.glyph_width, metadata.glyph_height);
        let glyphs = metadata.last_char - metadata.first_char + 1;
        if glyph_size.w == 0
            || glyph_size.h == 0
            || strip.size().w < glyph_size.w * glyphs
            || strip.size().h < glyph_size.h
        {
            return Err(LoadError::Malformed {
                id: id.to_owned(),
                reason: format!(
                    "glyph strip of {}x{} pixels does not cover {glyphs} glyphs of {}x{}",
                    strip.size().w,
                    strip.size().h,
                    glyph_size.w,
                    glyph_size.h
                ),
            });
        }

        Ok(Self {
            strip,
            glyph_size,
            first_char: metadata.first_char,
            last_char: metadata.last_char,
        })
    }

    /// Draw a string on a canvas with the glyph color replaced by `color`.
    pub fn draw(&self, canvas: &mut Canvas, position: Vec2<f32>, text: &str, color: u32) {
        let glyph_size = self.glyph_size.as_::<f32>();
        let mut cursor = position;

        for ch in text.chars() {
            let char_index = ch as u32;

            // Characters outside the strip only move the cursor
            if char_index < self.first_char || char_index > self.last_char {
                match ch {
                    '\n' => {
                        cursor.x = position.x;
                        cursor.y += glyph_size.h;
                    }
                    '\t' => cursor.x += glyph_size.w * 4.0,
                    _ => cursor.x += glyph_size.w,
                }
                continue;
            }

            // Sub rectangle of the character inside the strip
            let offset = (char_index - self.first_char) * self.glyph_size.w;
            canvas.blit_region(
                self.strip.pixels(),
                self.strip.size().w as usize,
                Vec2::new(offset, 0),
                self.glyph_size,
                cursor,
                Some(color),
            );

            cursor.x += glyph_size.w;
        }
    }

    /// Measure the size of a string in pixels.
    pub fn measure(&self, text: &str) -> Extent2<f32> {
        let glyph_size = self.glyph_size.as_::<f32>();
        let mut widest: f32 = 0.0;
        let mut current = 0.0;
        let mut lines = 1.0;

        for ch in text.chars() {
            match ch {
                '\n' => {
                    widest = widest.max(current);
                    current = 0.0;
                    lines += 1.0;
                }
                '\t' => current += glyph_size.w * 4.0,
                _ => current += glyph_size.w,
            }
        }

        Extent2::new(widest.max(current), lines * glyph_size.h)
    }

    /// Size of a single glyph in pixels.
    pub fn glyph_size(&self) -> Extent2<u32> {
        self.glyph_size
    }
}

/// Font metadata to load from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FontMetadata {
    /// Width of a single glyph in pixels.
    glyph_width: u32,
    /// Height of a single glyph in pixels.
    glyph_height: u32,
    /// ASCII value of the first glyph.
    #[serde(default = "FontMetadata::default_first_char")]
    first_char: u32,
    /// ASCII value of the last glyph.
    #[serde(default = "FontMetadata::default_last_char")]
    last_char: u32,
}

impl FontMetadata {
    /// Default start of the glyph range.
    const fn default_first_char() -> u32 {
        '!' as u32
    }

    /// Default end of the glyph range.
    const fn default_last_char() -> u32 {
        '~' as u32
    }
}
