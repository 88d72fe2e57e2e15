use clap::Parser;
use convolver::{ConvolveConfig, Scaling};
use std::path::PathBuf;

/// Perform a convolution operation on an image.
///
/// Kernel values are given as a flat, row-major list; its length must be a
/// perfect square (9 values for a 3x3 kernel).
#[derive(Parser, Debug)]
#[command(name = "convolve", version)]
pub struct Cli {
    /// The path to the image
    pub image_path: PathBuf,

    /// The kernel to use for the convolution
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub kernel: Vec<f64>,

    /// The stride to use for the convolution (accepted, not applied)
    #[arg(long, default_value_t = 1)]
    pub stride: usize,

    /// The padding to use for the convolution (accepted, not applied)
    #[arg(long, default_value_t = 0)]
    pub padding: usize,

    /// Stretch the result's value range to 0-255 for display instead of clamping
    #[arg(long)]
    pub normalize: bool,

    /// Print the result without opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    pub fn config(&self) -> ConvolveConfig {
        ConvolveConfig {
            stride: self.stride,
            padding: self.padding,
        }
    }

    pub fn scaling(&self) -> Scaling {
        if self.normalize {
            Scaling::Normalize
        } else {
            Scaling::Clamp
        }
    }
}
