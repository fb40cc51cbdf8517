/// Everything a session can reject. None of these are fatal: a rejected call
/// leaves the session exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("index {index} is out of range for {len} items")]
    OutOfRange { index: usize, len: usize },

    #[error("question {position} has already been answered")]
    AlreadyAnswered { position: usize },

    #[error("question {position} has not been answered yet")]
    Unanswered { position: usize },

    #[error("question {index} has not been reached yet")]
    Unreached { index: usize },

    #[error("the quiz run is already completed")]
    RunCompleted,

    #[error("the quiz run is not completed yet")]
    NotCompleted,

    #[error("playback failed: {0}")]
    PlaybackFailure(String),

    #[error("invalid question {prompt:?}: {reason}")]
    InvalidQuestion { prompt: String, reason: String },

    #[error("failed to parse catalog: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value {value:?} for {key}")]
    Config { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;
