//! Shared software rendering state of the backend adapters.

use hashbrown::HashMap;
use vek::Extent2;

use crate::{
    assets::{font::Font, sprite::Sprite, AssetSource},
    canvas::Canvas,
    draw::DrawCommand,
    error::DrawError,
    viewport::Viewport,
};

/// Frame surface plus the asset caches draw commands reference.
///
/// Owned by an adapter, caches live until its shutdown.
pub(crate) struct Graphics {
    /// The frame surface.
    pub(crate) canvas: Canvas,
    /// Transform applied to all draw command geometry.
    pub(crate) viewport: Viewport,
    /// Where sprite and font assets are loaded from.
    pub(crate) assets: AssetSource,
    /// Sprites by asset identifier.
    sprites: HashMap<String, Sprite>,
    /// Fonts by asset identifier.
    fonts: HashMap<String, Font>,
}

impl Graphics {
    /// Create the surface and empty caches.
    pub(crate) fn new(size: Extent2<u32>, assets: AssetSource) -> Self {
        Self {
            canvas: Canvas::new(size),
            viewport: Viewport::default(),
            assets,
            sprites: HashMap::new(),
            fonts: HashMap::new(),
        }
    }

    /// Apply a single draw command to the frame surface.
    ///
    /// The adapter has already verified a frame is active.
    pub(crate) fn handle_command(&mut self, command: &DrawCommand) -> Result<(), DrawError> {
        match command {
            DrawCommand::Clear { color } => self.canvas.fill(color.to_pixel()),
            DrawCommand::Rect {
                position,
                size,
                color,
            } => {
                let position = self.viewport.map_point(*position);
                let size = self.viewport.map_size(*size);
                self.canvas.fill_rect(position, size, color.to_pixel());
            }
            DrawCommand::Line { start, end, color } => {
                let start = self.viewport.map_point(*start);
                let end = self.viewport.map_point(*end);
                self.canvas.draw_line(start, end, color.to_pixel());
            }
            DrawCommand::Sprite { id, position } => {
                let position = self.viewport.map_point(*position);
                self.ensure_sprite(id)?;

                let sprite = &self.sprites[id.as_str()];
                self.canvas.blit(sprite.pixels(), sprite.size(), position);
            }
            DrawCommand::Text {
                font,
                text,
                position,
                color,
            } => {
                let position = self.viewport.map_point(*position);
                self.ensure_font(font)?;

                self.fonts[font.as_str()].draw(&mut self.canvas, position, text, color.to_pixel());
            }
        }

        Ok(())
    }

    /// Measure a string with a font asset, loading the font when needed.
    pub(crate) fn measure_text(&mut self, font: &str, text: &str) -> Result<Extent2<f32>, DrawError> {
        self.ensure_font(font)?;

        Ok(self.fonts[font].measure(text))
    }

    /// Reallocate the frame surface for a new size.
    pub(crate) fn resize(&mut self, size: Extent2<u32>) {
        self.canvas.resize(size);
    }

    /// Drop all cached assets.
    pub(crate) fn release(&mut self) {
        self.sprites.clear();
        self.fonts.clear();
    }

    /// Load a sprite into the cache on first reference.
    fn ensure_sprite(&mut self, id: &str) -> Result<(), DrawError> {
        if !self.sprites.contains_key(id) {
            let sprite = Sprite::load(id, &self.assets).map_err(|source| DrawError::Asset {
                id: id.to_owned(),
                source,
            })?;
            self.sprites.insert(id.to_owned(), sprite);
        }

        Ok(())
    }

    /// Load a font into the cache on first reference.
    fn ensure_font(&mut self, id: &str) -> Result<(), DrawError> {
        if !self.fonts.contains_key(id) {
            let font = Font::load(id, &self.assets).map_err(|source| DrawError::Asset {
                id: id.to_owned(),
                source,
            })?;
            self.fonts.insert(id.to_owned(), font);
        }

        Ok(())
    }
}
