use eframe::egui;
use log::info;

use crate::{AppError, config::Config};

use super::{MaskCanvasApp, open_image};

fn app_error(e: AppError) -> eframe::Error {
    eframe::Error::AppCreation(Box::new(e))
}

pub fn run_native() -> Result<(), eframe::Error> {
    env_logger::init();

    let mut config = Config::load("config.json").map_err(app_error)?;
    config.apply_args(std::env::args().skip(1));
    info!("Run with config: {config:?}");

    let source_path = config.source.as_ref().ok_or(AppError::NoSource).map_err(app_error)?;
    let source = open_image(source_path).map_err(app_error)?;
    let mask = config
        .mask
        .as_deref()
        .map(open_image)
        .transpose()
        .map_err(app_error)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.viewport),
        ..Default::default()
    };

    eframe::run_native(
        "Mask Canvas",
        options,
        Box::new(|cc| {
            Ok(Box::new(MaskCanvasApp::new(
                cc,
                source,
                mask,
                config.canvas,
                config.output,
            )))
        }),
    )
}
