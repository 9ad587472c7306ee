/*!
 * Error types for the subshift application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timecode field did not match the fixed 12-character layout
    #[error("Malformed timecode '{0}': expected HH:MM:SS.mmm")]
    MalformedTimecode(String),

    /// A line matched the time pattern but not the fixed column layout
    #[error("Malformed time-range line '{0}': expected 'HH:MM:SS.mmm --> HH:MM:SS.mmm'")]
    MalformedRangeLine(String),

    /// The input file extension maps to no supported dialect
    #[error("Unsupported subtitle extension for '{0}': expected .srt or .vtt")]
    UnsupportedExtension(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
