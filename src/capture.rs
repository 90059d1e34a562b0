//! Save presented frames as PNG screenshots.

use std::{fs::File, io::BufWriter, path::Path};

use vek::Extent2;

use crate::error::CaptureError;

/// Write a `0xAARRGGBB` pixel buffer to a PNG file.
///
/// Length of `pixels` must be `size.w * size.h`.
///
/// # Errors
///
/// - When the file could not be created or written.
/// - When the pixel data could not be encoded.
pub fn save_png(path: &Path, size: Extent2<u32>, pixels: &[u32]) -> Result<(), CaptureError> {
    let file = File::create(path)?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), size.w, size.h);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    // Unpack into RGBA byte order
    let mut data = Vec::with_capacity(pixels.len() * 4);
    for pixel in pixels {
        data.extend_from_slice(&[
            (pixel >> 16) as u8,
            (pixel >> 8) as u8,
            *pixel as u8,
            (pixel >> 24) as u8,
        ]);
    }

    writer.write_image_data(&data)?;

    Ok(())
}
