//! Error types shared across CamGrab crates.

/// Top-level error type for CamGrab operations.
#[derive(Debug, thiserror::Error)]
pub enum CamgrabError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Device index {index} out of range (have {count} devices)")]
    OutOfRange { index: u32, count: u32 },

    #[error("Format negotiation failed: {message}")]
    Negotiation { message: String },

    #[error("Resource acquisition failed: {message}")]
    Acquisition { message: String },

    #[error("Frame conversion failed: {message}")]
    Conversion { message: String },

    #[error("Usage contract violated: {message}")]
    Usage { message: String },

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using CamgrabError.
pub type CamgrabResult<T> = Result<T, CamgrabError>;

impl CamgrabError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    pub fn out_of_range(index: u32, count: u32) -> Self {
        Self::OutOfRange { index, count }
    }

    pub fn negotiation(msg: impl Into<String>) -> Self {
        Self::Negotiation {
            message: msg.into(),
        }
    }

    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition {
            message: msg.into(),
        }
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion {
            message: msg.into(),
        }
    }

    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage {
            message: msg.into(),
        }
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}
