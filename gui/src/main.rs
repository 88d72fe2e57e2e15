mod app;
mod cli;

use anyhow::{Context, Result};
use app::ResultView;
use clap::Parser;
use cli::Cli;
use convolver::{
    Convolver, Kernel, calculate_luminance, format_shape, load_image, render::value_range,
    to_display_image,
};
use std::io::Write;

fn main() -> Result<()> {
    // Configure logging
    env_logger::init();

    let cli = Cli::parse();
    run(&cli, &mut std::io::stdout().lock())
}

/// Load, convolve, print and display
///
/// The numeric result is printed before the display is attempted so it is
/// not lost when no window can be opened. A kernel larger than the image
/// yields an empty result, which is printed but not displayed.
fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.config();
    config.validate()?;
    if !config.is_default() {
        log::warn!(
            "stride={} padding={} accepted but not applied",
            config.stride,
            config.padding
        );
    }

    let kernel = Kernel::from_flat(&cli.kernel)?;
    log::info!("kernel: {}x{}", kernel.size(), kernel.size());

    let samples = load_image(&cli.image_path)?;
    log::info!(
        "loaded {} as {}",
        cli.image_path.display(),
        format_shape(samples.shape())
    );
    let image = calculate_luminance(samples)?;

    let convolver = Convolver::new(image, config);
    let result = convolver.convolve(&kernel)?;

    // Print the resulting image data and shape
    writeln!(out, "{}", result)?;
    writeln!(out, "{}", format_shape(result.shape()))?;
    out.flush()?;

    if cli.headless {
        return Ok(());
    }
    if result.is_empty() {
        log::warn!(
            "kernel is larger than the image; result {} has nothing to display",
            format_shape(result.shape())
        );
        return Ok(());
    }

    let scaling = cli.scaling();
    let view = ResultView {
        source: to_display_image(convolver.image(), scaling)
            .context("rendering input for display")?,
        output: to_display_image(&result, scaling).context("rendering result for display")?,
        shape: result.shape().to_vec(),
        range: value_range(&result),
        kernel_size: kernel.size(),
        config,
    };

    app::show(view)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use convolver::ConvolveError;
    use image::{GrayImage, Luma, RgbImage};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("convolve-run-{}-{}", std::process::id(), name))
    }

    fn write_gray_3x3(name: &str) -> PathBuf {
        let path = temp_path(name);
        let img = GrayImage::from_fn(3, 3, |x, y| Luma([(y * 3 + x + 1) as u8]));
        img.save(&path).unwrap();
        path
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("convolve").chain(args.iter().copied())).unwrap()
    }

    fn run_to_string(cli: &Cli) -> (Result<()>, String) {
        let mut out = Vec::new();
        let result = run(cli, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_run_prints_result_and_shape() {
        let path = write_gray_3x3("center.png");
        let cli = parse(&[
            path.to_str().unwrap(),
            "0", "0", "0", "0", "1", "0", "0", "0", "0",
            "--headless",
        ]);

        let (result, printed) = run_to_string(&cli);
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok());
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines, vec!["[[5]]", "(1, 1)"]);
    }

    #[test]
    fn test_run_rejects_non_square_kernel() {
        let path = write_gray_3x3("non-square.png");
        let cli = parse(&[path.to_str().unwrap(), "1", "2", "3", "--headless"]);

        let (result, printed) = run_to_string(&cli);
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvolveError>(),
            Some(ConvolveError::InvalidKernelShape(_))
        ));
        assert!(printed.is_empty());
    }

    #[test]
    fn test_run_reports_missing_image() {
        let path = temp_path("missing.png");
        let cli = parse(&[path.to_str().unwrap(), "1", "--headless"]);

        let (result, printed) = run_to_string(&cli);

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvolveError>(),
            Some(ConvolveError::InvalidImagePath { .. })
        ));
        assert!(printed.is_empty());
    }

    #[test]
    fn test_run_oversized_kernel_is_not_an_error() {
        let path = temp_path("small-rgb.png");
        RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();
        let kernel = vec!["1"; 25];
        let mut args = vec![path.to_str().unwrap()];
        args.extend(kernel.iter().copied());
        // no --headless: the empty result must not reach the window
        let cli = parse(&args);

        let (result, printed) = run_to_string(&cli);
        std::fs::remove_file(&path).ok();

        assert!(result.is_ok());
        assert_eq!(printed.lines().last(), Some("(0, 0)"));
    }
}
