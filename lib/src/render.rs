//! Conversion of result arrays into viewable images

use crate::error::{ConvolveError, Result};
use image::{Rgba, RgbaImage};
use ndarray::{ArrayD, ArrayView3, Axis, Ix3};

/// How sample values are mapped onto the 0-255 display range
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Scaling {
    /// Values are clamped to 0..=255 as-is
    #[default]
    Clamp,
    /// Min-max stretch over the whole array; constant arrays map to 0
    Normalize,
}

/// Render a 2D or 3D sample array as an RGBA image
///
/// Channel interpretation for `(height, width, channels)` arrays:
/// 1 = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA. Any other channel count
/// shows the first channel as gray.
///
/// # Errors
/// [`ConvolveError::EmptyResult`] for zero-sized arrays and
/// [`ConvolveError::InvalidShape`] for ranks other than 2 or 3
pub fn to_display_image(array: &ArrayD<f64>, scaling: Scaling) -> Result<RgbaImage> {
    if array.is_empty() {
        return Err(ConvolveError::EmptyResult {
            shape: array.shape().to_vec(),
        });
    }

    let planes = match array.ndim() {
        2 => array.view().insert_axis(Axis(2)).into_dimensionality::<Ix3>()?,
        3 => array.view().into_dimensionality::<Ix3>()?,
        rank => return Err(ConvolveError::InvalidShape { rank }),
    };

    let to_u8 = sample_mapper(array, scaling);
    Ok(render_planes(planes, to_u8))
}

fn sample_mapper(array: &ArrayD<f64>, scaling: Scaling) -> impl Fn(f64) -> u8 {
    let (offset, scale) = match scaling {
        Scaling::Clamp => (0.0, 1.0),
        Scaling::Normalize => {
            let (min, max) = value_range(array).unwrap_or((0.0, 0.0));
            let span = max - min;
            if span > 0.0 {
                (min, 255.0 / span)
            } else {
                (min, 0.0)
            }
        }
    };

    move |value| ((value - offset) * scale).clamp(0.0, 255.0) as u8
}

fn render_planes(planes: ArrayView3<'_, f64>, to_u8: impl Fn(f64) -> u8) -> RgbaImage {
    let (height, width, channels) = planes.dim();

    RgbaImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let sample = |c: usize| to_u8(planes[[y, x, c]]);

        match channels {
            2 => {
                let v = sample(0);
                Rgba([v, v, v, sample(1)])
            }
            3 => Rgba([sample(0), sample(1), sample(2), 255]),
            4 => Rgba([sample(0), sample(1), sample(2), sample(3)]),
            _ => {
                let v = sample(0);
                Rgba([v, v, v, 255])
            }
        }
    })
}

/// Smallest and largest sample, ignoring NaN; `None` when nothing is finite
pub fn value_range(array: &ArrayD<f64>) -> Option<(f64, f64)> {
    array
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

/// Format an array shape the way tuples print: `(3, 4)`, `(3, 4, 2)`, `(5,)`
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({},)", single),
        dims => {
            let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}
