// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the capture core

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Main application error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Photo capture errors
    Photo(PhotoError),
    /// Configuration errors
    Config(String),
    /// Storage/filesystem errors
    Storage(String),
    /// Generic error with message
    Other(String),
}

/// Per-shot capture errors
///
/// None of these abort a capture sequence; the failed shot is skipped and the
/// sequence moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// Live frame source is not ready (device not started, no frame yet)
    FrameUnavailable,
    /// Frame buffer does not match its declared dimensions
    InvalidFrame(String),
    /// Image codec failure
    EncodingFailed(String),
    /// Writing an exported image failed
    SaveFailed(String),
}

/// Filter descriptor parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Function name is not a supported filter operation
    UnknownFunction(String),
    /// Argument could not be parsed for the given function
    InvalidArgument { function: String, argument: String },
    /// Descriptor is not a sequence of `name(arg)` calls
    Malformed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Photo(e) => write!(f, "Photo error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for PhotoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoError::FrameUnavailable => write!(f, "No frame available for capture"),
            PhotoError::InvalidFrame(msg) => write!(f, "Invalid frame: {}", msg),
            PhotoError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            PhotoError::SaveFailed(msg) => write!(f, "Save failed: {}", msg),
        }
    }
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::UnknownFunction(name) => write!(f, "Unknown filter function: {}", name),
            FilterError::InvalidArgument { function, argument } => {
                write!(f, "Invalid argument '{}' for {}()", argument, function)
            }
            FilterError::Malformed(msg) => write!(f, "Malformed filter descriptor: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for PhotoError {}
impl std::error::Error for FilterError {}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Photo(err)
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Other(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Other(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for PhotoError {
    fn from(err: std::io::Error) -> Self {
        PhotoError::SaveFailed(err.to_string())
    }
}

impl From<image::ImageError> for PhotoError {
    fn from(err: image::ImageError) -> Self {
        PhotoError::EncodingFailed(err.to_string())
    }
}
