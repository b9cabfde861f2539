// WaveMark - LSB Audio Watermarking
// Copyright (C) 2026 WaveMark contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Error types for WaveMark
//!
//! This module defines error types using thiserror for ergonomic error
//! handling. Errors are categorized by domain (codec, container, storage)
//! for better error handling and reporting.
//!
//! Note that "no watermark found" is never an error anywhere in this crate:
//! extraction returns `Option` and verification returns a
//! [`VerificationOutcome`](crate::verify::VerificationOutcome) variant.
//! Only genuine failures (capacity, malformed containers, storage faults)
//! surface through [`WatermarkError`].

use thiserror::Error;

/// Result type alias using our WatermarkError type
pub type Result<T> = std::result::Result<T, WatermarkError>;

/// Main error type for WaveMark
///
/// Each variant includes descriptive error messages and relevant context.
#[derive(Error, Debug)]
pub enum WatermarkError {
    // ===== Codec Errors =====

    /// Framed message does not fit into the carrier buffer.
    ///
    /// `required` is the framed message length in bits; `available` is the
    /// carrier's raw size in bits (eight per byte). Each message bit
    /// occupies the LSB of one whole carrier byte, so embedding fails when
    /// `required > available / 8`. Not retryable without a shorter payload
    /// or a larger carrier; no partial write occurs.
    #[error("carrier too small for watermark: message needs {required} bits but the carrier holds {available} bits (one writable LSB per byte)")]
    CapacityExceeded {
        /// Framed message length in bits
        required: usize,
        /// Carrier size in bits (8 per byte; one LSB slot per byte)
        available: usize,
    },

    /// Token failed validation (empty or non-ASCII)
    #[error("invalid watermark token: {0}")]
    InvalidToken(String),

    // ===== Container Errors =====

    /// Byte buffer is not a parseable RIFF/WAVE container
    #[error("invalid WAV data: {0}")]
    InvalidWavData(String),

    /// WAV container holds compressed or otherwise non-PCM sample data.
    ///
    /// The codec only operates on uncompressed PCM; compressed containers
    /// must be transcoded by an external collaborator first (which destroys
    /// any previously embedded watermark).
    #[error("unsupported WAV encoding (format tag {format_tag}): only uncompressed PCM is supported")]
    UnsupportedEncoding {
        /// Raw `fmt ` chunk audio format tag
        format_tag: u16,
    },

    /// Replacement frame data does not match the container's data chunk size
    #[error("frame data size mismatch: data chunk holds {expected} bytes, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },

    // ===== Storage Errors =====

    /// A watermark token is already registered (tokens are unique)
    #[error("watermark token already registered: {0}")]
    DuplicateToken(String),

    /// Referenced track does not exist
    #[error("track not found: {0}")]
    TrackNotFound(i64),

    /// Generic database error
    #[error("database error: {0}")]
    DatabaseError(String),

    // ===== General Errors =====

    /// Generic input validation error
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error that should not normally occur
    #[error("internal error: {0}")]
    InternalError(String),

    // ===== External Library Errors =====

    /// Database driver error from sqlx
    #[error("database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper methods for creating common errors
impl WatermarkError {
    /// Create an InvalidWavData error with a message
    pub fn invalid_wav<S: Into<String>>(message: S) -> Self {
        WatermarkError::InvalidWavData(message.into())
    }

    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        WatermarkError::InvalidInput(message.into())
    }

    /// Create an InternalError with a message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        WatermarkError::InternalError(message.into())
    }

    /// Check if error originated in the codec itself (capacity, token)
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            WatermarkError::CapacityExceeded { .. } | WatermarkError::InvalidToken(_)
        )
    }

    /// Check if error is related to the WAV container
    pub fn is_container_error(&self) -> bool {
        matches!(
            self,
            WatermarkError::InvalidWavData(_)
                | WatermarkError::UnsupportedEncoding { .. }
                | WatermarkError::FrameSizeMismatch { .. }
        )
    }

    /// Check if error is related to registry storage
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            WatermarkError::DuplicateToken(_)
                | WatermarkError::TrackNotFound(_)
                | WatermarkError::DatabaseError(_)
                | WatermarkError::SqlxError(_)
        )
    }

    /// Get user-friendly error message suitable for display
    ///
    /// Returns actionable error messages that can be shown to end users,
    /// with technical details omitted where appropriate.
    pub fn user_message(&self) -> String {
        match self {
            WatermarkError::CapacityExceeded {
                required,
                available,
            } => {
                format!(
                    "The audio file is too short to hold a watermark ({} bits needed, {} available). Use a longer recording.",
                    required, available
                )
            }
            WatermarkError::UnsupportedEncoding { .. } => {
                "Only uncompressed PCM WAV files can be watermarked. Convert the file to standard WAV first.".to_string()
            }
            WatermarkError::InvalidWavData(_) => {
                "The file does not look like a valid WAV file.".to_string()
            }
            WatermarkError::DuplicateToken(_) => {
                "This watermark code is already registered. Please try again.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let capacity = WatermarkError::CapacityExceeded {
            required: 208,
            available: 80,
        };
        assert!(capacity.is_codec_error());
        assert!(!capacity.is_container_error());
        assert!(!capacity.is_storage_error());

        let encoding = WatermarkError::UnsupportedEncoding { format_tag: 85 };
        assert!(encoding.is_container_error());

        let dup = WatermarkError::DuplicateToken("abcd1234".to_string());
        assert!(dup.is_storage_error());
    }

    #[test]
    fn test_capacity_message_carries_counts() {
        let err = WatermarkError::CapacityExceeded {
            required: 208,
            available: 80,
        };
        let msg = err.to_string();
        assert!(msg.contains("208"));
        assert!(msg.contains("80"));
    }
}
