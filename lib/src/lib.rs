//! Convolver - valid-mode 2D convolution of images
//!
//! Loads an image as an array of samples, optionally reduces color to
//! luminance, and convolves it with a square kernel. Multi-channel arrays
//! are convolved one channel at a time.
//!
//! # Example
//! ```no_run
//! use convolver::{ConvolveConfig, Convolver, Kernel, calculate_luminance, load_image};
//! use std::path::Path;
//!
//! let image = calculate_luminance(load_image(Path::new("photo.png")).unwrap()).unwrap();
//! let kernel = Kernel::from_flat(&[1.0 / 9.0; 9]).unwrap();
//! let result = Convolver::new(image, ConvolveConfig::default())
//!     .convolve(&kernel)
//!     .unwrap();
//! println!("{:?}", result.shape());
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod kernel;
pub mod loader;
pub mod processor;
pub mod render;

// Re-export main types for convenience
pub use config::ConvolveConfig;
pub use error::{ConvolveError, Result};
pub use filters::{calculate_luminance, convolve2d_valid};
pub use kernel::Kernel;
pub use loader::load_image;
pub use processor::{Convolver, convolve_array};
pub use render::{Scaling, format_shape, to_display_image};
