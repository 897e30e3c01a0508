use std::path::PathBuf;

pub type GridResult<T> = Result<T, GridError>;

#[derive(thiserror::Error, Debug)]
pub enum GridError {
    #[error("validation error: {0}")]
    Validation(String),

    /// Anything that went wrong while resolving, fetching or decoding the source.
    #[error("failed to load GIF")]
    Load(#[from] LoadError),

    #[error("frame count mismatch: expected {expected}, but got {actual}")]
    FrameCountMismatch { expected: u64, actual: u64 },

    #[error("frame {index} is {width}x{height}, expected {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Encode(image::ImageError),
}

impl GridError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Cause carried by [`GridError::Load`].
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read '{origin}'")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to '{url}' failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{url}' responded with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unrecognized image format in '{origin}'")]
    UnknownFormat { origin: String },

    #[error("failed to decode image from '{origin}'")]
    Decode {
        origin: String,
        #[source]
        source: image::ImageError,
    },
}
