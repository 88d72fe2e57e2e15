//! Image file decoding into sample arrays

use crate::error::{ConvolveError, Result};
use image::{DynamicImage, ImageBuffer, Pixel};
use ndarray::{ArrayD, IxDyn};
use std::path::Path;

/// Load an image file as an array of raw sample values
///
/// Single-channel images become `(height, width)` arrays, everything else
/// `(height, width, channels)` with the file's native channel count. Samples
/// keep their stored range (0-255 for 8-bit, 0-65535 for 16-bit).
///
/// # Errors
/// [`ConvolveError::InvalidImagePath`] when the file is missing, unreadable
/// or cannot be decoded
pub fn load_image(path: &Path) -> Result<ArrayD<f64>> {
    let img = image::open(path).map_err(|source| ConvolveError::InvalidImagePath {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    image_to_array(&img)
}

/// Convert a decoded image into a sample array
pub fn image_to_array(img: &DynamicImage) -> Result<ArrayD<f64>> {
    match img {
        DynamicImage::ImageLuma8(buf) => buffer_to_array(buf),
        DynamicImage::ImageLumaA8(buf) => buffer_to_array(buf),
        DynamicImage::ImageRgb8(buf) => buffer_to_array(buf),
        DynamicImage::ImageRgba8(buf) => buffer_to_array(buf),
        DynamicImage::ImageLuma16(buf) => buffer_to_array(buf),
        DynamicImage::ImageLumaA16(buf) => buffer_to_array(buf),
        DynamicImage::ImageRgb16(buf) => buffer_to_array(buf),
        DynamicImage::ImageRgba16(buf) => buffer_to_array(buf),
        DynamicImage::ImageRgb32F(buf) => buffer_to_array(buf),
        DynamicImage::ImageRgba32F(buf) => buffer_to_array(buf),
        other => buffer_to_array(&other.to_rgba32f()),
    }
}

fn buffer_to_array<P>(buf: &ImageBuffer<P, Vec<P::Subpixel>>) -> Result<ArrayD<f64>>
where
    P: Pixel,
    P::Subpixel: Into<f64>,
{
    let (width, height) = buf.dimensions();
    let channels = P::CHANNEL_COUNT as usize;
    let samples: Vec<f64> = buf.as_raw().iter().map(|&s| s.into()).collect();

    let shape = if channels == 1 {
        vec![height as usize, width as usize]
    } else {
        vec![height as usize, width as usize, channels]
    };

    Ok(ArrayD::from_shape_vec(IxDyn(&shape), samples)?)
}
