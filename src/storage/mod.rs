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


//! Watermark registry storage
//!
//! SQLite-backed persistence for tracks and watermark registrations. The
//! codec never touches this module; it sees the registry only through the
//! lookup closure handed to [`verify::resolve`](crate::verify::resolve).
//!
//! # Database Schema
//! - AudioTracks: title, artist, owner (free text), optional ISRC/filename
//! - WatermarkRecords: token (UNIQUE) → track, one row per protection event
//!
//! # Usage Example
//! ```no_run
//! use wavemark::storage::{queries, Database};
//! use wavemark::storage::models::NewAudioTrack;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new("./registry.db").await?;
//!
//! let track = NewAudioTrack::new("Hit Song", "Me", "artist@example.com");
//! let track_id = queries::insert_track(db.pool(), &track).await?;
//! queries::insert_watermark(db.pool(), track_id, "abcd1234").await?;
//!
//! let metadata = queries::find_protection_info(db.pool(), "abcd1234").await?;
//! assert!(metadata.is_some());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::{Database, DatabaseStats};
pub use models::{AudioTrack, NewAudioTrack, WatermarkRecord};
