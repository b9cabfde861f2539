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


//! Protection and verification orchestration
//!
//! Ties the pieces together: WAV container access, token generation, the
//! LSB codec, and the registry. Buffers in, buffers out — reading and
//! writing files (and converting lossy formats to WAV beforehand) stay with
//! the caller.

use crate::audio::wav::WavBuffer;
use crate::error::Result;
use crate::stego;
use crate::storage::models::{NewAudioTrack, WatermarkRecord};
use crate::storage::{queries, Database};
use crate::token::WatermarkToken;
use crate::verify::{self, VerificationOutcome};
use tracing::info;

/// Result of protecting a track: the watermarked container bytes plus the
/// registration that now backs them
#[derive(Debug, Clone)]
pub struct ProtectedTrack {
    /// Complete WAV container with the token embedded in its frame LSBs
    pub bytes: Vec<u8>,
    /// The embedded token
    pub token: WatermarkToken,
    /// Track row created for this protection event
    pub track_id: i64,
    /// Watermark registration row
    pub record: WatermarkRecord,
}

/// High-level protect/verify flows over a registry database
#[derive(Debug, Clone)]
pub struct ProtectionService {
    db: Database,
}

impl ProtectionService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Access the underlying registry database
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Watermark a WAV buffer and register the new token
    ///
    /// Parses the container, generates a fresh token, embeds the framed
    /// token into the PCM frame LSBs, splices the marked frames back into
    /// the container, and records the track + watermark in the registry.
    /// The input buffer is never modified.
    ///
    /// # Errors
    /// - container errors if `wav_bytes` is not uncompressed PCM WAV
    /// - `CapacityExceeded` if the audio is too short for the framed token
    /// - storage errors if registration fails (the marked buffer is only
    ///   returned on a fully registered protection event)
    pub async fn protect(&self, wav_bytes: &[u8], track: NewAudioTrack) -> Result<ProtectedTrack> {
        let wav = WavBuffer::parse(wav_bytes)?;
        let token = WatermarkToken::generate();

        let marked_frames = stego::embed_token(wav.frames(), &token)?;
        let bytes = wav.with_frames(&marked_frames)?;

        let track_id = queries::insert_track(self.db.pool(), &track).await?;
        let record = queries::insert_watermark(self.db.pool(), track_id, token.as_str()).await?;

        info!(
            %token,
            track_id,
            title = %track.title,
            frames = wav.frames().len(),
            "track protected and registered"
        );

        Ok(ProtectedTrack {
            bytes,
            token,
            track_id,
            record,
        })
    }

    /// Check a WAV buffer for a registered watermark
    ///
    /// Extraction and classification follow the codec contract: a carrier
    /// with no embedded message is `Clean`, a foreign message is
    /// `UnrecognizedFormat`, a well-formed token unknown to the registry is
    /// `OrphanToken`, and a registered token is `Protected` with the
    /// owning metadata.
    ///
    /// # Errors
    /// Container errors if `wav_bytes` is not parseable PCM WAV, and
    /// storage errors from the registry lookup. Absence of a watermark is
    /// never an error.
    pub async fn verify(&self, wav_bytes: &[u8]) -> Result<VerificationOutcome> {
        let wav = WavBuffer::parse(wav_bytes)?;
        let decoded = stego::extract_message(wav.frames());

        // The resolver wants a synchronous lookup; prefetch the async
        // registry answer for the token (if any) and hand it in.
        let prefetched = match decoded.as_deref().and_then(stego::strip) {
            Some(token) => queries::find_protection_info(self.db.pool(), token).await?,
            None => None,
        };

        Ok(verify::resolve(decoded, move |_| prefetched))
    }
}
