//! Grayscale visualization of the raw noise field

use image::{GrayImage, Luma};

use crate::sampling::NoiseField;

/// Render the noise field itself, one luma sample per pixel.
///
/// Sample coordinates are normalized against the canvas and multiplied by
/// `scale`, so a scale of 1.0 shows a single noise period across the
/// image.
pub fn noise_preview(width: u32, height: u32, scale: f32, noise: &NoiseField) -> GrayImage {
    let mut image = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = noise.sample(
                x as f32 / width as f32 * scale,
                y as f32 / height as f32 * scale,
            );
            image.put_pixel(x, y, Luma([(v * 255.0) as u8]));
        }
    }
    image
}
