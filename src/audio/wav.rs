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


//! In-memory RIFF/WAVE container access
//!
//! Locates the PCM frame bytes (`data` chunk) inside a WAV byte buffer and
//! splices modified frames back in, leaving every other container byte
//! untouched. No file I/O happens here: callers read and write files, this
//! module only interprets buffers.
//!
//! # Container Layout
//! - `RIFF` + chunk size (LE u32) + `WAVE`
//! - sequence of chunks: 4-byte id, LE u32 size, payload (odd sizes padded)
//! - `fmt ` chunk: format tag, channels, sample rate, block align, bit depth
//! - `data` chunk: raw PCM frames — the codec's carrier
//!
//! Only uncompressed encodings (format tag 1 = integer PCM, 3 = IEEE float)
//! are accepted. Compressed WAV variants must be transcoded externally,
//! which destroys any previously embedded watermark.

use crate::error::{Result, WatermarkError};

/// PCM format tag in the `fmt ` chunk
const FORMAT_PCM: u16 = 1;
/// IEEE float format tag in the `fmt ` chunk
const FORMAT_IEEE_FLOAT: u16 = 3;

/// Basic sample parameters from the `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Raw audio format tag (1 = PCM, 3 = IEEE float)
    pub format_tag: u16,
    /// Number of interleaved channels
    pub channels: u16,
    /// Frames per second
    pub sample_rate: u32,
    /// Bits per sample per channel
    pub bits_per_sample: u16,
}

/// Parsed view of a WAV byte buffer
///
/// Owns a copy of the container bytes and remembers where the `data` chunk
/// payload sits, so frames can be read in place and replacements spliced
/// without disturbing the header, `fmt ` chunk, or any trailing chunks.
#[derive(Debug, Clone)]
pub struct WavBuffer {
    bytes: Vec<u8>,
    format: WavFormat,
    data_start: usize,
    data_len: usize,
}

impl WavBuffer {
    /// Parse a WAV container from a byte buffer
    ///
    /// # Errors
    /// - `InvalidWavData` if the RIFF/WAVE structure is malformed or the
    ///   `fmt `/`data` chunks are missing
    /// - `UnsupportedEncoding` if the sample data is not uncompressed PCM
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 12 {
            return Err(WatermarkError::invalid_wav("buffer shorter than RIFF header"));
        }
        if &bytes[0..4] != b"RIFF" {
            return Err(WatermarkError::invalid_wav("missing RIFF signature"));
        }
        if &bytes[8..12] != b"WAVE" {
            return Err(WatermarkError::invalid_wav("missing WAVE form type"));
        }

        let mut format: Option<WavFormat> = None;
        let mut data: Option<(usize, usize)> = None;

        let mut pos = 12;
        while pos + 8 <= bytes.len() {
            let id = &bytes[pos..pos + 4];
            let size = u32::from_le_bytes([
                bytes[pos + 4],
                bytes[pos + 5],
                bytes[pos + 6],
                bytes[pos + 7],
            ]) as usize;
            let payload_start = pos + 8;
            if payload_start + size > bytes.len() {
                return Err(WatermarkError::invalid_wav(format!(
                    "chunk {:?} overruns buffer ({} bytes declared, {} remain)",
                    String::from_utf8_lossy(id),
                    size,
                    bytes.len() - payload_start
                )));
            }

            match id {
                b"fmt " => {
                    if size < 16 {
                        return Err(WatermarkError::invalid_wav("fmt chunk too short"));
                    }
                    let f = &bytes[payload_start..payload_start + 16];
                    format = Some(WavFormat {
                        format_tag: u16::from_le_bytes([f[0], f[1]]),
                        channels: u16::from_le_bytes([f[2], f[3]]),
                        sample_rate: u32::from_le_bytes([f[4], f[5], f[6], f[7]]),
                        bits_per_sample: u16::from_le_bytes([f[14], f[15]]),
                    });
                }
                b"data" => {
                    data = Some((payload_start, size));
                }
                _ => {}
            }

            // Chunk payloads are word-aligned; odd sizes carry a pad byte
            pos = payload_start + size + (size & 1);
        }

        let format = format
            .ok_or_else(|| WatermarkError::invalid_wav("no fmt chunk found"))?;
        let (data_start, data_len) =
            data.ok_or_else(|| WatermarkError::invalid_wav("no data chunk found"))?;

        if format.format_tag != FORMAT_PCM && format.format_tag != FORMAT_IEEE_FLOAT {
            return Err(WatermarkError::UnsupportedEncoding {
                format_tag: format.format_tag,
            });
        }

        Ok(Self {
            bytes: bytes.to_vec(),
            format,
            data_start,
            data_len,
        })
    }

    /// Sample parameters from the `fmt ` chunk
    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// The raw PCM frame bytes — the codec's carrier buffer
    pub fn frames(&self) -> &[u8] {
        &self.bytes[self.data_start..self.data_start + self.data_len]
    }

    /// Watermark capacity of this file in bits (one per frame byte)
    pub fn capacity_bits(&self) -> usize {
        self.data_len
    }

    /// Rebuild the container with replacement frame data
    ///
    /// Every byte outside the `data` chunk payload is preserved exactly.
    /// The replacement must match the original frame length: sample
    /// parameters are part of the header and LSB embedding never changes
    /// the frame count.
    ///
    /// # Errors
    /// `FrameSizeMismatch` if `frames` differs in length from the original
    /// data chunk.
    pub fn with_frames(&self, frames: &[u8]) -> Result<Vec<u8>> {
        if frames.len() != self.data_len {
            return Err(WatermarkError::FrameSizeMismatch {
                expected: self.data_len,
                actual: frames.len(),
            });
        }
        let mut out = self.bytes.clone();
        out[self.data_start..self.data_start + self.data_len].copy_from_slice(frames);
        Ok(out)
    }
}

/// Build a minimal mono 16-bit PCM WAV container around raw frame bytes
///
/// Intended for tests and fixtures; production callers already have real
/// containers.
pub fn build_pcm_wav(sample_rate: u32, frames: &[u8]) -> Vec<u8> {
    let data_len = frames.len() as u32;
    let riff_len = 4 + 24 + 8 + data_len;
    let byte_rate = sample_rate * 2;

    let mut out = Vec::with_capacity(12 + 24 + 8 + frames.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&riff_len.to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // channels
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes()); // block align
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(frames);
    out
}
