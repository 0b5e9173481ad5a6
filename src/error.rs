use pixel_quant::{PaletteError, PipelineError, RasterError, UnknownMethodError};
use thiserror::Error;

/// Everything that can go wrong while serving one request.
///
/// Every variant is reported to the client as `{"kind":"error","message":...}`
/// using its `Display` text.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Invalid raster: {0}")]
    Raster(#[from] RasterError),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid settings: {0}")]
    Method(#[from] UnknownMethodError),

    #[error("Invalid settings: {0}")]
    Setting(String),

    #[error("Processing failed: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image too large: {pixels} pixels (max {max})")]
    TooLarge { pixels: u64, max: u64 },

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("Unsupported PNG format: {0}")]
    UnsupportedPng(String),

    #[error("Worker stopped")]
    WorkerStopped,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
