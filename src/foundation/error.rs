/// Convenience result type used across progressvg.
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Top-level error taxonomy used by shape APIs.
///
/// The first four variants describe programmer misuse and are never retried by the library.
#[derive(thiserror::Error, Debug)]
pub enum ProgressError {
    /// A shape was assembled without following the construction protocol.
    #[error("constructor misuse: {0}")]
    ConstructorMisuse(String),

    /// The container selector or node handle resolved to nothing.
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    /// An operation was invoked on a destroyed shape.
    #[error("object is destroyed: `{0}` called after destroy()")]
    DestroyedObject(&'static str),

    /// A geometry hook was invoked on a geometry that does not provide it.
    #[error("unimplemented geometry: `{0}` must be provided by the concrete shape")]
    UnimplementedGeometry(&'static str),

    /// Invalid user-provided data (colors, progress values, path data).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing option data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProgressError {
    /// Build a [`ProgressError::ConstructorMisuse`] value.
    pub fn constructor_misuse(msg: impl Into<String>) -> Self {
        Self::ConstructorMisuse(msg.into())
    }

    /// Build a [`ProgressError::ContainerNotFound`] value.
    pub fn container_not_found(what: impl Into<String>) -> Self {
        Self::ContainerNotFound(what.into())
    }

    /// Build a [`ProgressError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ProgressError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for [`ProgressError::DestroyedObject`].
    pub fn is_destroyed(&self) -> bool {
        matches!(self, Self::DestroyedObject(_))
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
