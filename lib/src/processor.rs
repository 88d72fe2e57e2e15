use crate::config::ConvolveConfig;
use crate::error::{ConvolveError, Result};
use crate::filters::{convolve2d_valid, valid_extent};
use crate::kernel::Kernel;
use ndarray::{Array2, Array3, ArrayD, ArrayView2, Axis, Ix2, Ix3};
use rayon::prelude::*;

/// Applies square kernels to an owned image array
///
/// The stored [`ConvolveConfig`] is carried along for callers that want to
/// report it; stride and padding do not change the computation.
#[derive(Debug, Clone)]
pub struct Convolver {
    image: ArrayD<f64>,
    config: ConvolveConfig,
}

impl Convolver {
    pub fn new(image: ArrayD<f64>, config: ConvolveConfig) -> Self {
        Self { image, config }
    }

    pub fn image(&self) -> &ArrayD<f64> {
        &self.image
    }

    pub fn config(&self) -> &ConvolveConfig {
        &self.config
    }

    /// Convolve the stored image with `kernel`
    ///
    /// Returns a freshly allocated array; the stored image is not modified.
    pub fn convolve(&self, kernel: &Kernel) -> Result<ArrayD<f64>> {
        log::debug!(
            "convolving {:?} with {}x{} kernel (stride={}, padding={} not applied)",
            self.image.shape(),
            kernel.size(),
            kernel.size(),
            self.config.stride,
            self.config.padding
        );
        convolve_array(&self.image, kernel)
    }
}

/// Valid-mode convolution of a 2D or 3D array
///
/// A `(height, width)` array is convolved directly. A
/// `(height, width, channels)` array is convolved one channel at a time and
/// the results are stacked back along the last axis in channel order.
///
/// # Arguments
/// * `image` - Input array of rank 2 or 3
/// * `kernel` - Square kernel of side `k`
///
/// # Returns
/// Array of shape `(height - k + 1, width - k + 1)` or
/// `(height - k + 1, width - k + 1, channels)`
///
/// # Errors
/// [`ConvolveError::InvalidShape`] for any other rank
pub fn convolve_array(image: &ArrayD<f64>, kernel: &Kernel) -> Result<ArrayD<f64>> {
    match image.ndim() {
        2 => {
            let plane = image.view().into_dimensionality::<Ix2>()?;
            Ok(convolve2d_valid(plane, kernel).into_dyn())
        }
        3 => {
            let planes = image.view().into_dimensionality::<Ix3>()?;
            convolve_channels(planes.axis_iter(Axis(2)).collect(), kernel, planes.dim())
        }
        rank => Err(ConvolveError::InvalidShape { rank }),
    }
}

/// Convolve independent channel planes in parallel and restack them
fn convolve_channels(
    planes: Vec<ArrayView2<'_, f64>>,
    kernel: &Kernel,
    (height, width, _): (usize, usize, usize),
) -> Result<ArrayD<f64>> {
    // collect() on an indexed parallel iterator keeps channel order
    let outputs: Vec<Array2<f64>> = planes
        .par_iter()
        .map(|plane| convolve2d_valid(plane.view(), kernel))
        .collect();

    if outputs.is_empty() {
        let shape = (
            valid_extent(height, kernel.size()),
            valid_extent(width, kernel.size()),
            0,
        );
        return Ok(Array3::zeros(shape).into_dyn());
    }

    let views: Vec<ArrayView2<'_, f64>> = outputs.iter().map(|plane| plane.view()).collect();
    let stacked = ndarray::stack(Axis(2), &views)?;
    Ok(stacked.into_dyn())
}
