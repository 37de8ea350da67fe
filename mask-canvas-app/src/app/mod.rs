use std::path::{Path, PathBuf};

use egui::TextureHandle;
use image::DynamicImage;
use log::info;
use mask_canvas::{CanvasSettings, MaskCanvas};

use crate::AppError;

mod menu;
mod native;
mod viewer;

pub use native::run_native;

pub(crate) struct MaskCanvasApp {
    canvas: MaskCanvas,
    image_state: ImageState,
    output: PathBuf,
    texture: Option<TextureHandle>,
    // Set whenever the composite has to be rendered again.
    dirty: bool,
    status: String,
}

#[allow(clippy::large_enum_variant)]
enum ImageState {
    /// Decoded, waiting for the first frame to know the viewport size.
    Pending {
        source: DynamicImage,
        mask: Option<DynamicImage>,
    },
    Loaded,
    Error(String),
}

impl MaskCanvasApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: DynamicImage,
        mask: Option<DynamicImage>,
        settings: CanvasSettings,
        output: PathBuf,
    ) -> Self {
        Self {
            canvas: MaskCanvas::new((1, 1), settings),
            image_state: ImageState::Pending { source, mask },
            output,
            texture: None,
            dirty: true,
            status: String::new(),
        }
    }

    /// Load the pending image pair once the viewport is known.
    fn prepare(&mut self) {
        if !matches!(self.image_state, ImageState::Pending { .. }) {
            return;
        }
        let ImageState::Pending { source, mask } =
            std::mem::replace(&mut self.image_state, ImageState::Loaded)
        else {
            return;
        };
        if let Err(e) = self.canvas.load(source, mask.as_ref()) {
            self.image_state = ImageState::Error(e.to_string());
        }
        self.dirty = true;
    }

    fn export(&mut self) -> Result<(), AppError> {
        self.dirty = true;
        match self.canvas.create_masked_image()? {
            Some(image) => {
                image.save(&self.output).map_err(|source| AppError::Image {
                    path: self.output.clone(),
                    source,
                })?;
                info!("Saved {:?}", self.output);
                self.status = format!(
                    "Saved {}x{} to {}",
                    image.width(),
                    image.height(),
                    self.output.display()
                );
            }
            None => self.status = "Nothing left to export".into(),
        }
        Ok(())
    }
}

pub(crate) fn open_image(path: &Path) -> Result<DynamicImage, AppError> {
    image::open(path).map_err(|source| AppError::Image {
        path: path.to_path_buf(),
        source,
    })
}

impl eframe::App for MaskCanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Mask canvas");
            self.menu_ui(ui);
            if let ImageState::Error(error) = &self.image_state {
                ui.label(format!("Error: {error}"));
            } else {
                self.viewer_ui(ui);
            }
        });
    }
}
