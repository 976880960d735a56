use std::fmt;

/// Convenience result type used across wordreel.
pub type WordreelResult<T> = Result<T, WordreelError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum WordreelError {
    /// Invalid configuration or caller-provided arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Degenerate or unreadable job input (silent audio, broken image, bad word).
    #[error("input error: {0}")]
    Input(String),

    /// The external encoder binary could not be invoked at pipeline construction.
    #[error("encoder unavailable: {0}")]
    EncoderUnavailable(String),

    /// The external encoder failed while producing a video.
    #[error("encode error: {0}")]
    Encode(String),

    /// Rendering or writing a frame failed.
    #[error("compositing error: {0}")]
    Compositing(String),

    /// Frame production was cancelled between frames.
    #[error("job cancelled")]
    Cancelled,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WordreelError {
    /// Build a [`WordreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WordreelError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`WordreelError::EncoderUnavailable`] value.
    pub fn encoder_unavailable(msg: impl Into<String>) -> Self {
        Self::EncoderUnavailable(msg.into())
    }

    /// Build a [`WordreelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`WordreelError::Compositing`] value.
    pub fn compositing(msg: impl Into<String>) -> Self {
        Self::Compositing(msg.into())
    }
}

/// Stage a word job had reached when it stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum JobStage {
    /// Job accepted, nothing produced yet.
    Idle,
    /// Audio trimmed, looped and written to scratch.
    AudioProcessed,
    /// Every frame image exists in the scratch directory.
    FramesProduced,
    /// The output container was written by the encoder.
    Encoded,
    /// Scratch artifacts were removed after a successful encode.
    CleanedUp,
    /// Absorbing failure state.
    Failed,
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::AudioProcessed => "audio-processed",
            Self::FramesProduced => "frames-produced",
            Self::Encoded => "encoded",
            Self::CleanedUp => "cleaned-up",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A single failed word job, with the last stage it completed.
#[derive(thiserror::Error, Debug)]
#[error("job '{word}' failed after stage {stage}: {source}")]
pub struct JobError {
    /// Word the job was rendering.
    pub word: String,
    /// Last stage the job successfully reached before failing.
    pub stage: JobStage,
    /// Underlying cause.
    #[source]
    pub source: WordreelError,
}

impl JobError {
    /// Attach word and stage context to a pipeline error.
    pub fn new(word: impl Into<String>, stage: JobStage, source: WordreelError) -> Self {
        Self {
            word: word.into(),
            stage,
            source,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
