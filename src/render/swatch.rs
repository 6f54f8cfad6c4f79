//! PNG previews of a card's gradient theme.
//!
//! A swatch is three horizontal bands stacked top to bottom: title,
//! description and border gradients, each sampled across the full width.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{CardError, Result};
use crate::types::ThemeRole;

use super::gradient::CardGradients;

/// Render the three gradient bands into an image.
///
/// `width` and `band_height` are clamped to at least one pixel.
pub fn render_swatch(gradients: &CardGradients, width: u32, band_height: u32) -> RgbaImage {
    let width = width.max(1);
    let band_height = band_height.max(1);
    let height = band_height * ThemeRole::ALL.len() as u32;

    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for (band, role) in ThemeRole::ALL.into_iter().enumerate() {
        let set = gradients.get(role);
        let top = band as u32 * band_height;

        for x in 0..width {
            // First and last columns land exactly on the gradient ends.
            let t = if width == 1 {
                0.0
            } else {
                x as f32 / (width - 1) as f32
            };
            let rgba = Rgba(set.sample(t).to_rgba());

            for y in top..top + band_height {
                img.put_pixel(x, y, rgba);
            }
        }
    }

    img
}

/// Render a swatch and write it as PNG.
pub fn write_swatch(
    gradients: &CardGradients,
    path: &Path,
    width: u32,
    band_height: u32,
) -> Result<()> {
    let img = render_swatch(gradients, width, band_height);

    img.save(path).map_err(|e| CardError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}
