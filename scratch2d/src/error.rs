use thiserror::Error;

/// Errors reported by scratch2d operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no image named {0:?} could be found")]
    UnknownImage(String),
    #[error("the actor has no image sequence; call switch_to_images first")]
    EmptyImageSequence,
    #[error("no font loaded for text drawing")]
    NoFont,
    #[error("font data could not be parsed")]
    InvalidFont,
    #[error("unrecognised colour {0:?}")]
    InvalidColor(String),
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
