use crate::error::Result;
use crate::kernel::Kernel;
use ndarray::{Array2, ArrayD, ArrayView2, Ix3, Zip, s};

/// Luminance weights applied to the first three channels (R, G, B)
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Collapse a color image array to a single luminance plane
///
/// Formula: L = 0.2989*R + 0.5870*G + 0.1140*B
///
/// Only rank-3 arrays with at least three channels are reduced; any further
/// channels (alpha) are ignored. Everything else is returned unchanged, so a
/// gray+alpha image keeps both planes and is convolved per channel.
///
/// # Arguments
/// * `image` - Image samples, `(height, width)` or `(height, width, channels)`
///
/// # Returns
/// A `(height, width)` luminance array, or the input as-is
pub fn calculate_luminance(image: ArrayD<f64>) -> Result<ArrayD<f64>> {
    if image.ndim() != 3 || image.shape()[2] < 3 {
        return Ok(image);
    }

    let planes = image.view().into_dimensionality::<Ix3>()?;
    let (height, width, _) = planes.dim();
    let [wr, wg, wb] = LUMINANCE_WEIGHTS;

    let luminance = Array2::from_shape_fn((height, width), |(y, x)| {
        wr * planes[[y, x, 0]] + wg * planes[[y, x, 1]] + wb * planes[[y, x, 2]]
    });

    Ok(luminance.into_dyn())
}

/// Output extent of a valid-mode convolution along one axis
///
/// Zero when the kernel does not fit inside the input.
pub fn valid_extent(input: usize, kernel: usize) -> usize {
    (input + 1).saturating_sub(kernel)
}

/// Valid-mode 2D convolution of a single plane
///
/// The kernel is flipped in both axes (true convolution, not
/// cross-correlation) and evaluated only where it fully overlaps the input:
///
/// `out[i, j] = Σ image[i + m, j + n] * kernel[k - 1 - m, k - 1 - n]`
///
/// # Arguments
/// * `image` - Input plane of shape `(height, width)`
/// * `kernel` - Square kernel of side `k`
///
/// # Returns
/// Array of shape `(height - k + 1, width - k + 1)`, with a zero-length
/// axis wherever the kernel is larger than the image
pub fn convolve2d_valid(image: ArrayView2<'_, f64>, kernel: &Kernel) -> Array2<f64> {
    let (height, width) = image.dim();
    let ksize = kernel.size();
    let out_height = valid_extent(height, ksize);
    let out_width = valid_extent(width, ksize);

    let weights = kernel.weights();
    let flipped = weights.slice(s![..;-1, ..;-1]);

    Array2::from_shape_fn((out_height, out_width), |(y, x)| {
        let window = image.slice(s![y..y + ksize, x..x + ksize]);
        Zip::from(&window)
            .and(&flipped)
            .fold(0.0, |acc, &sample, &weight| acc + sample * weight)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, array};

    fn kernel(values: &[f64]) -> Kernel {
        Kernel::from_flat(values).unwrap()
    }

    #[test]
    fn test_luminance_white() {
        let img = Array3::from_elem((4, 4, 3), 255.0).into_dyn();
        let lum = calculate_luminance(img).unwrap();
        assert_eq!(lum.shape(), &[4, 4]);
        // Weights sum to 0.9999
        assert!((lum[[0, 0]] - 254.9745).abs() < 1e-9);
    }

    #[test]
    fn test_luminance_ignores_alpha() {
        let mut img = Array3::zeros((2, 2, 4));
        img[[0, 0, 0]] = 100.0;
        img[[0, 0, 3]] = 255.0;
        let lum = calculate_luminance(img.into_dyn()).unwrap();
        assert_eq!(lum.shape(), &[2, 2]);
        assert!((lum[[0, 0]] - 29.89).abs() < 1e-9);
        assert_eq!(lum[[1, 1]], 0.0);
    }

    #[test]
    fn test_luminance_leaves_gray_alpha_untouched() {
        let img = Array3::from_elem((3, 3, 2), 7.0).into_dyn();
        let lum = calculate_luminance(img.clone()).unwrap();
        assert_eq!(lum, img);
    }

    #[test]
    fn test_luminance_leaves_2d_untouched() {
        let img = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();
        assert_eq!(calculate_luminance(img.clone()).unwrap(), img);
    }

    #[test]
    fn test_valid_extent() {
        assert_eq!(valid_extent(5, 3), 3);
        assert_eq!(valid_extent(3, 3), 1);
        assert_eq!(valid_extent(2, 3), 0);
        assert_eq!(valid_extent(0, 1), 0);
    }

    #[test]
    fn test_center_identity_picks_center() {
        let img = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let k = kernel(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let out = convolve2d_valid(img.view(), &k);
        assert_eq!(out, array![[5.0]]);
    }

    #[test]
    fn test_ones_kernel_sums_window() {
        let img = array![[1.0, 1.0], [1.0, 1.0]];
        let out = convolve2d_valid(img.view(), &kernel(&[1.0, 1.0, 1.0, 1.0]));
        assert_eq!(out, array![[4.0]]);
    }

    #[test]
    fn test_kernel_is_flipped() {
        // Cross-correlation would give 1.0 here
        let img = array![[1.0, 2.0], [3.0, 4.0]];
        let out = convolve2d_valid(img.view(), &kernel(&[1.0, 0.0, 0.0, 0.0]));
        assert_eq!(out, array![[4.0]]);
    }

    #[test]
    fn test_matches_direct_summation() {
        let img = Array2::from_shape_fn((6, 5), |(y, x)| (y * 5 + x) as f64 * 0.5 - 3.0);
        let k = kernel(&[1.0, -2.0, 0.5, 3.0, 0.0, -1.0, 2.0, 1.5, -0.5]);
        let out = convolve2d_valid(img.view(), &k);
        assert_eq!(out.dim(), (4, 3));

        let w = k.weights();
        for y in 0..4 {
            for x in 0..3 {
                let mut expected = 0.0;
                for m in 0..3 {
                    for n in 0..3 {
                        expected += img[[y + m, x + n]] * w[[2 - m, 2 - n]];
                    }
                }
                assert!((out[[y, x]] - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_output_shape() {
        let img = Array2::<f64>::zeros((10, 7));
        let out = convolve2d_valid(img.view(), &Kernel::identity(4).unwrap());
        assert_eq!(out.dim(), (7, 4));
    }

    #[test]
    fn test_kernel_larger_than_image_is_empty() {
        let img = Array2::<f64>::ones((2, 5));
        let out = convolve2d_valid(img.view(), &Kernel::identity(3).unwrap());
        assert_eq!(out.dim(), (0, 3));
    }

    #[test]
    fn test_uniform_image_scales_by_kernel_sum() {
        let img = Array2::from_elem((5, 5), 3.0);
        let k = kernel(&[0.5, 1.0, -0.25, 2.0]);
        let out = convolve2d_valid(img.view(), &k);
        assert_eq!(out.dim(), (4, 4));
        for value in out.iter() {
            assert!((value - 3.0 * 3.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unit_kernel_is_identity() {
        let img = array![[1.5, -2.0, 3.0], [4.0, 0.0, 6.25]];
        let out = convolve2d_valid(img.view(), &kernel(&[1.0]));
        assert_eq!(out, img);
    }
}
