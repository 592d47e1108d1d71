use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RouletteError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Window error: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Pixel surface error: {0}")]
    Surface(#[from] pixels::Error),
    #[error("Pixel buffer error: {0}")]
    Texture(#[from] pixels::TextureError),
    #[error("Failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Font file {0} is not a TrueType/OpenType font")]
    FontParse(PathBuf),
}
