/// Convenience result type used across drawstate.
pub type DrawStateResult<T> = Result<T, DrawStateError>;

/// Recoverable errors raised at input boundaries.
///
/// Contract violations on an already-built [`crate::PipelineBuilder`] (wrong clip variant access,
/// the invalid draw-face sentinel, crossed guard scopes) are not represented here; they panic.
#[derive(thiserror::Error, Debug)]
pub enum DrawStateError {
    /// Invalid caller-provided value (unknown enum name, out-of-range integer).
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed capability or stencil configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrawStateError {
    /// Build a [`DrawStateError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DrawStateError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`DrawStateError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DrawStateError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
