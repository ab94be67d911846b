use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unsupported frame format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode frame: {0}")]
    DecodeError(String),

    #[error(
        "Channel images differ in size: red={red_width}x{red_height}, \
         green={green_width}x{green_height}, blue={blue_width}x{blue_height}"
    )]
    DimensionMismatch {
        red_width: usize,
        red_height: usize,
        green_width: usize,
        green_height: usize,
        blue_width: usize,
        blue_height: usize,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Capture failed: {0}")]
    CaptureFailure(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Failed to persist image: {0}")]
    PersistFailure(String),

    #[error("A capture session is already in progress")]
    AlreadyCapturing,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
