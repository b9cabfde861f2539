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


use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wavemark::audio::wav::WavBuffer;
use wavemark::service::ProtectionService;
use wavemark::stego;
use wavemark::storage::{models::NewAudioTrack, Database};

#[derive(Parser)]
#[command(name = "wavemark-cli")]
#[command(about = "WaveMark CLI - watermark and verify WAV files", long_about = None)]
struct Cli {
    /// Path to the registry database
    #[arg(long, default_value = "wavemark.db", global = true)]
    database: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a fresh watermark and register it
    Protect {
        /// Input WAV file (uncompressed PCM)
        input: PathBuf,
        /// Where to write the protected copy
        output: PathBuf,
        /// Track title
        #[arg(long)]
        title: String,
        /// Performing artist
        #[arg(long)]
        artist: String,
        /// Rights owner (e.g. an email address)
        #[arg(long)]
        owner: String,
        /// ISRC code, if assigned
        #[arg(long)]
        isrc: Option<String>,
    },
    /// Check a file for a registered watermark
    Verify {
        /// WAV file to inspect
        input: PathBuf,
        /// Print the outcome as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show how many payload characters a file can carry
    Capacity {
        /// WAV file to inspect
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wavemark=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Protect {
            input,
            output,
            title,
            artist,
            owner,
            isrc,
        } => {
            let wav = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;

            let db = Database::new(&cli.database).await?;
            let svc = ProtectionService::new(db);

            let mut track = NewAudioTrack::new(title, artist, owner);
            if let Some(isrc) = isrc {
                track = track.with_isrc(isrc);
            }
            if let Some(name) = output.file_name().and_then(|n| n.to_str()) {
                track = track.with_filename(name);
            }

            let protected = svc.protect(&wav, track).await?;
            std::fs::write(&output, &protected.bytes)
                .with_context(|| format!("failed to write {}", output.display()))?;

            println!("Protected: {}", output.display());
            println!("Token:     {}", protected.token);
            println!("Track ID:  {}", protected.track_id);
        }
        Commands::Verify { input, json } => {
            let wav = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;

            let db = Database::new(&cli.database).await?;
            let svc = ProtectionService::new(db);

            let outcome = svc.verify(&wav).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                println!("Status: {}", outcome.public_status());
                if let wavemark::VerificationOutcome::Protected { token, metadata } = &outcome {
                    println!("Token:  {}", token);
                    println!("Title:  {}", metadata.title);
                    println!("Artist: {}", metadata.artist);
                    println!("Owner:  {}", metadata.owner);
                    if let Some(isrc) = &metadata.isrc {
                        println!("ISRC:   {}", isrc);
                    }
                }
            }
        }
        Commands::Capacity { input } => {
            let bytes = std::fs::read(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let wav = WavBuffer::parse(&bytes)?;

            let capacity = wav.capacity_bits();
            let overhead = stego::framed_bit_len(0);
            let payload_chars = (capacity.saturating_sub(overhead)) / 8;
            println!("Frame bytes:        {}", capacity);
            println!("Framing overhead:   {} bits", overhead);
            println!("Max token length:   {} characters", payload_chars);
        }
    }

    Ok(())
}
