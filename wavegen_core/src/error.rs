use thiserror::Error;

pub const STATUS_OK: i32 = 0;
pub const STATUS_FAIL: i32 = -1;

/// Coarse failure class reported to the command loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A required descriptor or buffer was not supplied.
    Null,
    /// A precondition on values was violated.
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("missing {0} reference")]
    MissingReference(&'static str),

    #[error("unknown channel index {0}")]
    UnknownChannel(u8),

    #[error("table length mismatch: channel 0 has {ch0} samples, channel 1 has {ch1}")]
    LengthMismatch { ch0: usize, ch1: usize },

    #[error("frame buffer holds {capacity} frames, {needed} required")]
    FrameBufferTooSmall { needed: usize, capacity: usize },
}

impl GeneratorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingReference(_) => FailureKind::Null,
            Self::UnknownChannel(_)
            | Self::LengthMismatch { .. }
            | Self::FrameBufferTooSmall { .. } => FailureKind::State,
        }
    }

    /// Integer status for the embedded command loop. Every failure maps to -1.
    pub fn status(&self) -> i32 {
        STATUS_FAIL
    }
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Collapse a typed result into the 0 / -1 status convention.
pub fn status_of<T>(result: GeneratorResult<T>) -> i32 {
    match result {
        Ok(_) => STATUS_OK,
        Err(err) => err.status(),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid generator config: {0}")]
    Json(#[from] serde_json::Error),
}
