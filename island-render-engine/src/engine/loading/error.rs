use thiserror::Error;

/// Failures of the asynchronous loaders. Logged and recorded, never fatal.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    #[error("scene manifest `{path}` failed to load: {reason}")]
    Manifest { path: String, reason: String },

    #[error("sub-scene `{name}` ({url}) failed to load: {reason}")]
    SubScene {
        name: String,
        url: String,
        reason: String,
    },

    #[error("camera description `{url}` failed to load: {reason}")]
    Cameras { url: String, reason: String },

    #[error("camera description `{url}` contains no cameras")]
    NoCameras { url: String },
}
