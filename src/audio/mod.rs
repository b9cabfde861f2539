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


//! Audio container handling
//!
//! Currently limited to in-memory WAV access: the codec needs raw PCM frame
//! bytes, and `wav` is the collaborator that finds them inside a container
//! buffer and splices modified frames back. Lossy formats (MP3 and friends)
//! are out of scope here; converting them to WAV is an external concern and
//! any such conversion is lossy with respect to previously embedded
//! watermarks.

pub mod wav;

pub use wav::{build_pcm_wav, WavBuffer, WavFormat};
