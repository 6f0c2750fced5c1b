use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors a prompt session can end with.
#[derive(Error, Debug)]
pub enum Error {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    /// A computed message or hint failed to resolve while rendering.
    #[error("failed to resolve field of choice `{choice}`: {message}")]
    Field { choice: String, message: String },

    /// The user cancelled the prompt. No answer was produced.
    #[error("prompt was cancelled")]
    Cancelled,

    #[error("key source was closed before the prompt was answered")]
    InputClosed,
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
