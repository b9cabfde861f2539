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


//! Registry query functions
//!
//! Repository-style typed queries over the registry tables. All functions
//! take a pool reference so callers control transactions and lifetimes.
//! `find_protection_info` is the registry lookup the verification resolver
//! consumes: token in, owning metadata out.

use crate::error::{Result, WatermarkError};
use crate::storage::models::{AudioTrack, NewAudioTrack, WatermarkRecord};
use crate::verify::RecordMetadata;
use chrono::Utc;
use sqlx::SqlitePool;

// ============================================================================
// TRACK QUERIES
// ============================================================================

/// Insert a new track
///
/// Returns the track_id of the inserted track.
pub async fn insert_track(pool: &SqlitePool, track: &NewAudioTrack) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO AudioTracks (title, artist, owner, isrc, filename, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&track.title)
    .bind(&track.artist)
    .bind(&track.owner)
    .bind(&track.isrc)
    .bind(&track.filename)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Find track by ID
pub async fn find_track_by_id(pool: &SqlitePool, track_id: i64) -> Result<Option<AudioTrack>> {
    let track =
        sqlx::query_as::<_, AudioTrack>("SELECT * FROM AudioTracks WHERE track_id = ?")
            .bind(track_id)
            .fetch_optional(pool)
            .await?;

    Ok(track)
}

/// List all tracks registered to an owner, newest first
pub async fn list_tracks_by_owner(pool: &SqlitePool, owner: &str) -> Result<Vec<AudioTrack>> {
    let tracks = sqlx::query_as::<_, AudioTrack>(
        "SELECT * FROM AudioTracks WHERE owner = ? ORDER BY created_at DESC, track_id DESC",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(tracks)
}

// ============================================================================
// WATERMARK QUERIES
// ============================================================================

/// Register a watermark token against a track
///
/// # Errors
/// - `TrackNotFound` if the track does not exist
/// - `DuplicateToken` if the token is already registered
pub async fn insert_watermark(
    pool: &SqlitePool,
    track_id: i64,
    token: &str,
) -> Result<WatermarkRecord> {
    if find_track_by_id(pool, track_id).await?.is_none() {
        return Err(WatermarkError::TrackNotFound(track_id));
    }

    let result = sqlx::query(
        "INSERT INTO WatermarkRecords (track_id, token, created_at) VALUES (?, ?, ?)",
    )
    .bind(track_id)
    .bind(token)
    .bind(Utc::now())
    .execute(pool)
    .await;

    let result = match result {
        Ok(result) => result,
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            return Err(WatermarkError::DuplicateToken(token.to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    let record = find_watermark_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| {
            WatermarkError::internal("inserted watermark record not found on readback")
        })?;

    Ok(record)
}

/// Find watermark record by ID
pub async fn find_watermark_by_id(
    pool: &SqlitePool,
    watermark_id: i64,
) -> Result<Option<WatermarkRecord>> {
    let record = sqlx::query_as::<_, WatermarkRecord>(
        "SELECT * FROM WatermarkRecords WHERE watermark_id = ?",
    )
    .bind(watermark_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Find watermark record by its embedded token
pub async fn find_watermark_by_token(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<WatermarkRecord>> {
    let record =
        sqlx::query_as::<_, WatermarkRecord>("SELECT * FROM WatermarkRecords WHERE token = ?")
            .bind(token)
            .fetch_optional(pool)
            .await?;

    Ok(record)
}

/// Registry lookup for the verification resolver: token → owning metadata
///
/// Joins the watermark record with its track. `None` means the token is not
/// registered (the resolver classifies that as an orphan).
pub async fn find_protection_info(
    pool: &SqlitePool,
    token: &str,
) -> Result<Option<RecordMetadata>> {
    let metadata = sqlx::query_as::<_, RecordMetadataRow>(
        r#"
        SELECT t.title, t.artist, t.owner, t.isrc
        FROM WatermarkRecords w
        JOIN AudioTracks t ON t.track_id = w.track_id
        WHERE w.token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(metadata.map(RecordMetadataRow::into_metadata))
}

/// Row shape for `find_protection_info` (RecordMetadata lives in `verify`
/// and stays free of sqlx derives)
#[derive(sqlx::FromRow)]
struct RecordMetadataRow {
    title: String,
    artist: String,
    owner: String,
    isrc: Option<String>,
}

impl RecordMetadataRow {
    fn into_metadata(self) -> RecordMetadata {
        RecordMetadata {
            title: self.title,
            artist: self.artist,
            owner: self.owner,
            isrc: self.isrc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    async fn setup() -> Database {
        Database::new_in_memory().await.unwrap()
    }

    fn sample_track() -> NewAudioTrack {
        NewAudioTrack::new("Hit Song", "Me", "artist@example.com").with_isrc("UA-ABC-26-00001")
    }

    #[tokio::test]
    async fn test_insert_and_find_track() {
        let db = setup().await;
        let track_id = insert_track(db.pool(), &sample_track()).await.unwrap();

        let track = find_track_by_id(db.pool(), track_id).await.unwrap().unwrap();
        assert_eq!(track.title, "Hit Song");
        assert_eq!(track.owner, "artist@example.com");
        assert_eq!(track.isrc.as_deref(), Some("UA-ABC-26-00001"));

        assert!(find_track_by_id(db.pool(), track_id + 1)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_tracks_by_owner() {
        let db = setup().await;
        insert_track(db.pool(), &sample_track()).await.unwrap();
        insert_track(
            db.pool(),
            &NewAudioTrack::new("Other", "Them", "other@example.com"),
        )
        .await
        .unwrap();

        let mine = list_tracks_by_owner(db.pool(), "artist@example.com")
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].title, "Hit Song");
    }

    #[tokio::test]
    async fn test_insert_watermark_and_lookup() {
        let db = setup().await;
        let track_id = insert_track(db.pool(), &sample_track()).await.unwrap();

        let record = insert_watermark(db.pool(), track_id, "abcd1234")
            .await
            .unwrap();
        assert_eq!(record.track_id, track_id);
        assert_eq!(record.token, "abcd1234");

        let found = find_watermark_by_token(db.pool(), "abcd1234")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.watermark_id, record.watermark_id);

        let metadata = find_protection_info(db.pool(), "abcd1234")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(metadata.title, "Hit Song");
        assert_eq!(metadata.artist, "Me");
        assert_eq!(metadata.owner, "artist@example.com");
        assert_eq!(metadata.isrc.as_deref(), Some("UA-ABC-26-00001"));
    }

    #[tokio::test]
    async fn test_unknown_token_yields_none() {
        let db = setup().await;
        assert!(find_watermark_by_token(db.pool(), "ffff0000")
            .await
            .unwrap()
            .is_none());
        assert!(find_protection_info(db.pool(), "ffff0000")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_token_rejected() {
        let db = setup().await;
        let track_id = insert_track(db.pool(), &sample_track()).await.unwrap();
        insert_watermark(db.pool(), track_id, "abcd1234")
            .await
            .unwrap();

        match insert_watermark(db.pool(), track_id, "abcd1234").await {
            Err(WatermarkError::DuplicateToken(token)) => assert_eq!(token, "abcd1234"),
            other => panic!("expected DuplicateToken, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_watermark_requires_track() {
        let db = setup().await;
        match insert_watermark(db.pool(), 42, "abcd1234").await {
            Err(WatermarkError::TrackNotFound(42)) => {}
            other => panic!("expected TrackNotFound, got {:?}", other),
        }
    }
}
