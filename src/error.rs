use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("image `{reference}` could not be loaded: {reason}")]
    ImageLoad { reference: String, reason: String },

    #[error("image decoded with invalid dimensions: width={width}, height={height}")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("image dimensions are not known yet")]
    ImageNotReady,

    #[error("custom image `{name}` is not available, re-upload required")]
    ImageUnavailable { name: String },

    #[error("a drag session is already active")]
    DragInProgress,

    #[error("corrupt session state: {0}")]
    CorruptState(String),

    #[error("unsupported session snapshot schema version: {0}")]
    UnsupportedSchemaVersion(u32),

    #[error("session store failure: {0}")]
    Store(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl SimError {
    /// Whether the error is a user-facing resource problem rather than a
    /// host contract violation.
    #[must_use]
    pub fn is_resource_error(&self) -> bool {
        matches!(
            self,
            Self::ImageLoad { .. }
                | Self::InvalidImageDimensions { .. }
                | Self::ImageUnavailable { .. }
        )
    }
}
