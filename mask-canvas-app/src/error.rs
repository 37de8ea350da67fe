use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Cannot read config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Image {path:?}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    Canvas(#[from] mask_canvas::MaskCanvasError),
    #[error("No source image configured")]
    NoSource,
}
