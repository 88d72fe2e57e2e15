//! Square convolution kernels

use crate::error::{ConvolveError, Result};
use ndarray::{Array2, ArrayView2};

/// A non-empty square grid of convolution weights
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    /// Build a kernel from a flat, row-major list of weights
    ///
    /// The side length is `floor(sqrt(n))`; the list must reshape exactly
    /// into a `k × k` grid.
    ///
    /// # Example
    /// ```
    /// use convolver::Kernel;
    ///
    /// let kernel = Kernel::from_flat(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    /// assert_eq!(kernel.size(), 3);
    /// ```
    pub fn from_flat(values: &[f64]) -> Result<Self> {
        let size = side_length(values.len());

        if size == 0 || size * size != values.len() {
            return Err(ConvolveError::InvalidKernelShape(format!(
                "{} values do not form a square kernel",
                values.len()
            )));
        }

        let weights = Array2::from_shape_vec((size, size), values.to_vec())?;
        Ok(Self { weights })
    }

    /// Wrap an existing 2D array, which must be square and non-empty
    pub fn from_array(weights: Array2<f64>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows == 0 || rows != cols {
            return Err(ConvolveError::InvalidKernelShape(format!(
                "kernel must be square and non-empty, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self { weights })
    }

    /// Kernel with a single 1.0 weight at index `size / 2` in both axes
    ///
    /// Convolving with it crops `size - 1` pixels from the borders and leaves
    /// the remaining values untouched.
    pub fn identity(size: usize) -> Result<Self> {
        let mut weights = Array2::zeros((size, size));
        if size > 0 {
            weights[[size / 2, size / 2]] = 1.0;
        }
        Self::from_array(weights)
    }

    /// Side length, taken from the first dimension
    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn weights(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }
}

/// Integer square root, rounded down
fn side_length(len: usize) -> usize {
    let mut size = (len as f64).sqrt() as usize;
    // correct float rounding at the edges
    while size * size > len {
        size -= 1;
    }
    while (size + 1) * (size + 1) <= len {
        size += 1;
    }
    size
}
