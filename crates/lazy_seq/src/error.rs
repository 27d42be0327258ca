use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Index was negative, non-integral, or does not fit in `usize`.
    #[error("invalid index `{0}`: expected a non-negative integer")]
    InvalidIndex(String),

    #[error("no extension named `{0}` is registered for this value type")]
    UnknownExtension(String),

    #[error("extension `{0}` is registered with a different argument or result type")]
    ExtensionSignature(String),
}
