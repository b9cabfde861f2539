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


//! # WaveMark
//!
//! Embeds a short provenance token into PCM audio by modulating the
//! least-significant bit of each sample byte, and verifies suspect files by
//! recovering the token and matching it against a SQLite registry.
//!
//! The crate is layered:
//!
//! - [`stego`] — the pure LSB codec (framing, embed, extract); no I/O
//! - [`verify`] — classifies decoded messages against an injected lookup
//! - [`token`] — token generation and validation
//! - [`audio`] — in-memory WAV container access
//! - [`storage`] — the SQLite-backed watermark registry
//! - [`service`] — protect/verify orchestration over all of the above
//!
//! File reading/writing and lossy-format conversion are deliberately left
//! to callers (or the feature-gated CLI binary).
//!
//! # Quick start
//!
//! ```no_run
//! use wavemark::service::ProtectionService;
//! use wavemark::storage::{models::NewAudioTrack, Database};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = ProtectionService::new(Database::new("./registry.db").await?);
//!
//! let wav = std::fs::read("song.wav")?;
//! let protected = svc
//!     .protect(&wav, NewAudioTrack::new("Hit Song", "Me", "artist@example.com"))
//!     .await?;
//! std::fs::write("protected.wav", &protected.bytes)?;
//!
//! let outcome = svc.verify(&protected.bytes).await?;
//! assert!(outcome.is_protected());
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod error;
pub mod service;
pub mod stego;
pub mod storage;
pub mod token;
pub mod verify;

pub use error::{Result, WatermarkError};
pub use service::{ProtectedTrack, ProtectionService};
pub use token::WatermarkToken;
pub use verify::{RecordMetadata, VerificationOutcome};
