/// Basic example: Convolve a synthetic test image with a few classic kernels
///
/// This creates a test image with a bright disc and saves the input along
/// with box-blurred and edge-filtered versions
use convolver::{
    ConvolveConfig, Convolver, Kernel, Scaling, calculate_luminance, format_shape,
    to_display_image,
};
use image::{Rgba, RgbaImage};

fn main() {
    println!("Convolver - Basic Example");
    println!("=========================\n");

    // Create a simple 128x128 test image
    let width = 128;
    let height = 128;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([60, 60, 60, 255]));

    // Draw a bright disc in the center
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;
    let radius = 40.0;

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            if (dx * dx + dy * dy).sqrt() < radius {
                img.put_pixel(x, y, Rgba([255, 200, 80, 255]));
            }
        }
    }

    println!("Created test image: {}x{}", width, height);

    let samples = convolver::loader::image_to_array(&image::DynamicImage::ImageRgba8(img.clone()))
        .expect("Failed to convert image");
    let gray = calculate_luminance(samples).expect("Failed to reduce luminance");
    let convolver = Convolver::new(gray, ConvolveConfig::default());

    let kernels = [
        ("box_blur", Kernel::from_flat(&[1.0 / 25.0; 25])),
        (
            "laplacian",
            Kernel::from_flat(&[0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0]),
        ),
    ];

    img.save("basic_input.png").expect("Failed to save input");
    println!("✓ Saved input to:  basic_input.png");

    for (name, kernel) in kernels {
        let kernel = kernel.expect("Invalid kernel");
        let result = convolver.convolve(&kernel).expect("Convolution failed");
        println!(
            "  - {}: {}x{} kernel -> shape {}",
            name,
            kernel.size(),
            kernel.size(),
            format_shape(result.shape())
        );

        let path = format!("basic_{}.png", name);
        to_display_image(&result, Scaling::Normalize)
            .expect("Failed to render result")
            .save(&path)
            .expect("Failed to save output");
        println!("✓ Saved output to: {}", path);
    }

    println!("\nConvolution complete!");
}
