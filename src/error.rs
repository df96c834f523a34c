use thiserror::Error;

/// Errors raised while assembling state containers.
///
/// Failures inside caller-supplied reducers, getters and combine functions are
/// never wrapped here; they propagate to the caller untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A reducer was registered twice under the same slice key.
    #[error("duplicate reducer for slice {key}")]
    DuplicateSlice { key: String },
}

pub type Result<T> = std::result::Result<T, Error>;
