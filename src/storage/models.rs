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


//! Database models for the watermark registry
//!
//! Two entities: the audio track being protected and the watermark record
//! binding a unique token to it. User accounts are out of scope, so the
//! rights owner is carried as free text on the track.
//!
//! # SQLite Adaptations
//! - DateTime stored as TEXT in RFC 3339 form (bound from chrono, not
//!   CURRENT_TIMESTAMP, so decoding is symmetric)
//! - Token uniqueness enforced by a UNIQUE constraint, surfaced to callers
//!   as `DuplicateToken`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A protected audio track
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct AudioTrack {
    pub track_id: i64,
    pub title: String,
    pub artist: String,
    /// Rights owner, free text (e.g. an email address)
    pub owner: String,
    /// International Standard Recording Code, if assigned
    pub isrc: Option<String>,
    /// Filename of the protected rendition, if one was persisted
    pub filename: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert form for a new track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAudioTrack {
    pub title: String,
    pub artist: String,
    pub owner: String,
    pub isrc: Option<String>,
    pub filename: Option<String>,
}

impl NewAudioTrack {
    pub fn new<S: Into<String>>(title: S, artist: S, owner: S) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            owner: owner.into(),
            isrc: None,
            filename: None,
        }
    }

    pub fn with_isrc<S: Into<String>>(mut self, isrc: S) -> Self {
        self.isrc = Some(isrc.into());
        self
    }

    pub fn with_filename<S: Into<String>>(mut self, filename: S) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// A registered watermark: one token, one track, one protection event
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct WatermarkRecord {
    pub watermark_id: i64,
    pub track_id: i64,
    /// The embedded token; unique across the registry
    pub token: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_track_builder() {
        let track = NewAudioTrack::new("Hit Song", "Me", "artist@example.com")
            .with_isrc("UA-ABC-26-00001")
            .with_filename("protected_abcd1234_song.wav");
        assert_eq!(track.title, "Hit Song");
        assert_eq!(track.isrc.as_deref(), Some("UA-ABC-26-00001"));
        assert_eq!(track.filename.as_deref(), Some("protected_abcd1234_song.wav"));
    }
}
