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


//! Watermark token generation and validation
//!
//! A token is the short opaque identifier that gets embedded into the audio
//! carrier and later matched against the registry. Tokens are 8 lowercase
//! hex characters taken from a freshly generated v4 UUID, so collisions are
//! unlikely (but uniqueness is ultimately enforced by the registry's UNIQUE
//! constraint, not here).
//!
//! # Sentinel collision caveat
//!
//! [`WatermarkToken::parse`] accepts any non-empty printable ASCII string and
//! deliberately does **not** reject tokens containing the sentinel literal
//! `#####END`. Embedding such a token would truncate later decoding at the
//! collision point. Generated tokens are lowercase hex and can never contain
//! `#`, so the case cannot arise through normal operation; it is documented
//! here rather than papered over with validation the rest of the system
//! never relied on.

use crate::error::{Result, WatermarkError};
use std::fmt;
use uuid::Uuid;

/// Newtype wrapper around a watermark token to provide type safety
///
/// Guarantees the contained string is non-empty printable ASCII. Use
/// [`WatermarkToken::generate`] for new protection events and
/// [`WatermarkToken::parse`] when reconstructing a token from stored or
/// decoded text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatermarkToken(String);

impl WatermarkToken {
    /// Length of generated tokens in characters
    pub const GENERATED_LEN: usize = 8;

    /// Generate a fresh token for a new protection event
    ///
    /// Takes the first 8 hex characters of a random v4 UUID.
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(hex[..Self::GENERATED_LEN].to_string())
    }

    /// Validate and wrap an existing token string
    ///
    /// # Errors
    /// Returns `InvalidToken` if the string is empty or contains characters
    /// outside printable ASCII (which could not round-trip through the
    /// 8-bit-per-character framing).
    pub fn parse<S: Into<String>>(token: S) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(WatermarkError::InvalidToken("token is empty".to_string()));
        }
        if !token.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return Err(WatermarkError::InvalidToken(format!(
                "token contains non-printable or non-ASCII characters: {:?}",
                token
            )));
        }
        Ok(Self(token))
    }

    /// Get the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WatermarkToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<WatermarkToken> for String {
    fn from(token: WatermarkToken) -> String {
        token.0
    }
}
