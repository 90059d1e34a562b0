//! Blittable sprite loaded from a PNG asset.

use std::io::Cursor;

use png::{BitDepth, ColorType, Decoder, Transformations};
use rgb::RGBA8;
use vek::Extent2;

use super::{AssetSource, LoadError};

/// Decoded image with pixels packed as `0xAARRGGBB`.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Size of the image in pixels.
    size: Extent2<u32>,
    /// Packed pixel data, row major.
    pixels: Vec<u32>,
}

impl Sprite {
    /// Load and decode a PNG asset.
    ///
    /// # Errors
    ///
    /// - When no PNG file exists for the identifier.
    /// - When the file is not decodable as 8 bit RGBA.
    pub fn load(id: &str, source: &AssetSource) -> Result<Self, LoadError> {
        let bytes = source.raw(id, "png")?;

        let decode_err = |source: png::DecodingError| LoadError::Decode {
            id: id.to_owned(),
            source: Box::new(source),
        };

        let mut decoder = Decoder::new(Cursor::new(bytes));

        // Discard text chunks
        decoder.set_ignore_text_chunk(true);
        // Make it faster by not checking if it's correct
        decoder.ignore_checksums(true);

        // Convert indexed and grayscale images to RGBA
        decoder
            .set_transformations(Transformations::normalize_to_color8() | Transformations::ALPHA);

        let mut reader = decoder.read_info().map_err(decode_err)?;

        // Ensure we can use the PNG colors
        let (color_type, bits) = reader.output_color_type();
        if color_type != ColorType::Rgba || bits != BitDepth::Eight {
            return Err(LoadError::Malformed {
                id: id.to_owned(),
                reason: "PNG did not decode to 8 bit RGBA".to_owned(),
            });
        }

        // Read the PNG
        let mut data = vec![RGBA8::default(); reader.output_buffer_size() / 4];
        let info = reader
            .next_frame(bytemuck::cast_slice_mut(&mut data))
            .map_err(decode_err)?;

        let size = Extent2::new(info.width, info.height);
        let pixels = data
            .iter()
            .take((size.w * size.h) as usize)
            .map(|px| {
                u32::from(px.a) << 24 | u32::from(px.r) << 16 | u32::from(px.g) << 8 | u32::from(px.b)
            })
            .collect();

        Ok(Self { size, pixels })
    }

    /// Wrap already packed pixels.
    ///
    /// Length of `pixels` must be `size.w * size.h`.
    pub fn from_pixels(size: Extent2<u32>, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), (size.w * size.h) as usize);

        Self { size, pixels }
    }

    /// Size of the image in pixels.
    pub fn size(&self) -> Extent2<u32> {
        self.size
    }

    /// Packed pixel data, row major.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}
