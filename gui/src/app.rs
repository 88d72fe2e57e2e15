use convolver::{ConvolveConfig, ConvolveError, format_shape};
use eframe::egui;
use image::RgbaImage;

/// Everything the result window needs to show
pub struct ResultView {
    /// Convolution input (after luminance reduction)
    pub source: RgbaImage,
    /// Convolution output
    pub output: RgbaImage,
    /// Shape of the output array
    pub shape: Vec<usize>,
    /// Smallest and largest output value
    pub range: Option<(f64, f64)>,
    /// Side length of the applied kernel
    pub kernel_size: usize,
    /// Stored, inert convolution configuration
    pub config: ConvolveConfig,
}

/// Window state for displaying a convolution result
pub struct ResultViewer {
    view: ResultView,

    /// Texture handle for input image display
    source_texture: Option<egui::TextureHandle>,
    /// Texture handle for output image display
    output_texture: Option<egui::TextureHandle>,

    /// Status or error message to display (if any)
    message: Option<String>,
}

impl ResultViewer {
    pub fn new(_cc: &eframe::CreationContext<'_>, view: ResultView) -> Self {
        Self {
            view,
            source_texture: None,
            output_texture: None,
            message: None,
        }
    }

    /// Save the output image to file
    pub fn save_output(&self, path: &std::path::Path) -> Result<(), String> {
        self.view
            .output
            .save(path)
            .map_err(|e| format!("Failed to save: {}", e))
    }

    /// Render the information panel
    fn render_info(&self, ui: &mut egui::Ui) {
        ui.heading("Result");
        ui.separator();

        ui.label(format!("Shape: {}", format_shape(&self.view.shape)));
        ui.label(format!(
            "Kernel: {}x{}",
            self.view.kernel_size, self.view.kernel_size
        ));
        if let Some((min, max)) = self.view.range {
            ui.label(format!("Range: {:.3} .. {:.3}", min, max));
        }

        ui.add_space(8.0);

        ui.collapsing("Configuration", |ui| {
            ui.label(format!("Stride: {}", self.view.config.stride));
            ui.label(format!("Padding: {}", self.view.config.padding));
            ui.small("Stride and padding are not applied");
        });
    }

    /// Convert RgbaImage to egui ColorImage
    fn rgba_to_color_image(img: &RgbaImage) -> egui::ColorImage {
        let (width, height) = img.dimensions();
        egui::ColorImage::from_rgba_unmultiplied([width as usize, height as usize], img.as_raw())
    }

    /// Display an image in the UI
    fn display_image(
        ui: &mut egui::Ui,
        image: &RgbaImage,
        texture: &mut Option<egui::TextureHandle>,
        label: &str,
    ) {
        ui.vertical(|ui| {
            ui.heading(label);

            if texture.is_none() {
                let color_image = Self::rgba_to_color_image(image);
                *texture = Some(ui.ctx().load_texture(
                    label,
                    color_image,
                    egui::TextureOptions::NEAREST,
                ));
            }

            if let Some(tex) = texture {
                let size = tex.size_vec2();
                let max_size = ui.available_size();
                // Upscale small results so single pixels stay visible
                let scale = ((max_size.x / size.x).min(max_size.y / size.y)).min(16.0);
                let display_size = size * scale;

                ui.image((tex.id(), display_size));
                ui.label(format!(
                    "{}x{} (scale: {:.1}x)",
                    image.width(),
                    image.height(),
                    scale
                ));
            }
        });
    }
}

impl eframe::App for ResultViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save Output...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PNG", &["png"])
                            .save_file()
                        {
                            self.message = Some(match self.save_output(&path) {
                                Ok(()) => format!("Saved {}", path.display()),
                                Err(e) => e,
                            });
                        }
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        egui::SidePanel::left("info_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| self.render_info(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref msg) = self.message {
                ui.label(msg);
                if ui.button("Dismiss").clicked() {
                    self.message = None;
                }
                ui.separator();
            }

            // Display images side-by-side
            ui.horizontal(|ui| {
                let half_width = ui.available_width() / 2.0 - 8.0;

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_image(
                            ui,
                            &self.view.source,
                            &mut self.source_texture,
                            "Input",
                        );
                    },
                );

                ui.separator();

                ui.allocate_ui_with_layout(
                    egui::vec2(half_width, ui.available_height()),
                    egui::Layout::top_down(egui::Align::Center),
                    |ui| {
                        Self::display_image(
                            ui,
                            &self.view.output,
                            &mut self.output_texture,
                            "Convolved",
                        );
                    },
                );
            });
        });
    }
}

/// Fail early when there is no windowing system to talk to
pub fn check_display() -> Result<(), ConvolveError> {
    let headless_unix = cfg!(all(unix, not(target_os = "macos")))
        && std::env::var_os("DISPLAY").is_none()
        && std::env::var_os("WAYLAND_DISPLAY").is_none();

    if headless_unix {
        return Err(ConvolveError::DisplayUnavailable(
            "neither DISPLAY nor WAYLAND_DISPLAY is set".to_string(),
        ));
    }
    Ok(())
}

/// Open a window showing the result; blocks until it is closed
pub fn show(view: ResultView) -> Result<(), ConvolveError> {
    check_display()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 640.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("Convolver"),
        ..Default::default()
    };

    eframe::run_native(
        "Convolver",
        options,
        Box::new(|cc| Ok(Box::new(ResultViewer::new(cc, view)))),
    )
    .map_err(|e| ConvolveError::DisplayUnavailable(e.to_string()))
}
