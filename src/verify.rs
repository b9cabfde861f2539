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


//! Verification resolution
//!
//! Classifies whatever the extractor recovered from a carrier. Every
//! possible result is a normal value, never an error: an unwatermarked file
//! is [`Clean`](VerificationOutcome::Clean), a message in the wrong tagging
//! convention is [`UnrecognizedFormat`](VerificationOutcome::UnrecognizedFormat),
//! and a well-formed watermark whose token the registry does not know is an
//! [`OrphanToken`](VerificationOutcome::OrphanToken).
//!
//! The registry is injected as a plain synchronous lookup function, keeping
//! this module free of storage concerns and testable with a closure over a
//! map. Callers with an async registry (see
//! [`ProtectionService`](crate::service::ProtectionService)) prefetch the
//! metadata and hand it in as a capturing closure. Retry and backoff for a
//! slow registry belong to the caller; the resolver calls the lookup at most
//! once and never caches.

use crate::stego::framing;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Owning metadata for a registered watermark token
///
/// The registry maps tokens to this; the resolver only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Rights owner (free text; user accounts live outside this crate)
    pub owner: String,
    /// International Standard Recording Code, if assigned
    pub isrc: Option<String>,
}

/// Result of verifying a carrier against the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationOutcome {
    /// No embedded message detected at all
    Clean,
    /// A message was decoded but it is not in the recognized tagging
    /// convention. Kept distinct from `Clean` for audit purposes.
    UnrecognizedFormat {
        /// The decoded message, as recovered
        payload: String,
    },
    /// Structurally valid watermark whose token is not registered: possible
    /// data corruption, registry loss, or a forged tag.
    OrphanToken {
        /// The recovered token
        token: String,
    },
    /// Watermark recovered and matched to a registration
    Protected {
        /// The recovered token
        token: String,
        /// Owning metadata from the registry
        metadata: RecordMetadata,
    },
}

impl VerificationOutcome {
    /// Whether the carrier matched a registered watermark
    pub fn is_protected(&self) -> bool {
        matches!(self, VerificationOutcome::Protected { .. })
    }

    /// The recovered token, if the message was structurally valid
    pub fn token(&self) -> Option<&str> {
        match self {
            VerificationOutcome::OrphanToken { token }
            | VerificationOutcome::Protected { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Status string for end-user display
    ///
    /// Orphan tokens and unrecognized messages are presented the same as
    /// clean files; the distinction only matters for audit logs, which this
    /// crate emits at resolution time.
    pub fn public_status(&self) -> &'static str {
        match self {
            VerificationOutcome::Protected { .. } => "PROTECTED",
            _ => "CLEAN",
        }
    }
}

/// Classify a decoded message and match it against the registry
///
/// `decoded` is the output of
/// [`extract_message`](crate::stego::extract_message); `lookup` is called at
/// most once, only when a recognized tag yields a token.
pub fn resolve<F>(decoded: Option<String>, lookup: F) -> VerificationOutcome
where
    F: FnOnce(&str) -> Option<RecordMetadata>,
{
    let Some(message) = decoded else {
        debug!("no embedded message detected");
        return VerificationOutcome::Clean;
    };

    let Some(token) = framing::strip(&message).map(str::to_string) else {
        warn!(
            payload_len = message.len(),
            "embedded message present but not in the recognized tag format"
        );
        return VerificationOutcome::UnrecognizedFormat { payload: message };
    };

    match lookup(&token) {
        Some(metadata) => {
            debug!(%token, title = %metadata.title, "watermark matched registration");
            VerificationOutcome::Protected { token, metadata }
        }
        None => {
            warn!(%token, "structurally valid watermark with unregistered token");
            VerificationOutcome::OrphanToken { token }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metadata() -> RecordMetadata {
        RecordMetadata {
            title: "Hit Song".to_string(),
            artist: "Me".to_string(),
            owner: "artist@example.com".to_string(),
            isrc: Some("UA-ABC-26-00001".to_string()),
        }
    }

    #[test]
    fn test_none_resolves_clean() {
        let outcome = resolve(None, |_| panic!("lookup must not run"));
        assert_eq!(outcome, VerificationOutcome::Clean);
        assert_eq!(outcome.public_status(), "CLEAN");
        assert_eq!(outcome.token(), None);
    }

    #[test]
    fn test_untagged_message_is_unrecognized() {
        let outcome = resolve(Some("hello world".to_string()), |_| {
            panic!("lookup must not run for unrecognized formats")
        });
        assert_eq!(
            outcome,
            VerificationOutcome::UnrecognizedFormat {
                payload: "hello world".to_string()
            }
        );
        // Presented as clean, distinct in the outcome itself
        assert_eq!(outcome.public_status(), "CLEAN");
    }

    #[test]
    fn test_registered_token_is_protected() {
        let outcome = resolve(Some("COPYRIGHT|abcd1234".to_string()), |token| {
            assert_eq!(token, "abcd1234");
            Some(sample_metadata())
        });
        assert!(outcome.is_protected());
        assert_eq!(outcome.token(), Some("abcd1234"));
        assert_eq!(outcome.public_status(), "PROTECTED");
    }

    #[test]
    fn test_unregistered_token_is_orphan() {
        let outcome = resolve(Some("COPYRIGHT|ffff0000".to_string()), |_| None);
        assert_eq!(
            outcome,
            VerificationOutcome::OrphanToken {
                token: "ffff0000".to_string()
            }
        );
        assert_eq!(outcome.public_status(), "CLEAN");
        assert_eq!(outcome.token(), Some("ffff0000"));
    }
}
