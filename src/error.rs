//! # Error Types
//!
//! Custom error types for the PTZ joystick using `thiserror`.
//!
//! Only construction, configuration loading and the session call itself can
//! fail. Pointer handlers never surface errors.

use thiserror::Error;

/// Main error type for the PTZ joystick
#[derive(Debug, Error)]
pub enum JoystickError {
    /// Travel zone cannot host the handle (zero size or negative limit)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Live session missing, closed or saturated
    #[error("Session unavailable: {0}")]
    SessionUnavailable(String),

    /// Remote call could not be encoded
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for the PTZ joystick
pub type Result<T> = std::result::Result<T, JoystickError>;
