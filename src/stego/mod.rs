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


//! The LSB watermark codec
//!
//! Hides a short identifying token inside raw PCM sample bytes by modulating
//! the least-significant bit of each byte, and recovers it later to confirm
//! provenance.
//!
//! # Module Organization
//!
//! ## framing
//! The bit-level message envelope: `COPYRIGHT|<token>#####END` expanded to
//! one bit per carrier byte, MSB first.
//!
//! ## embed
//! Capacity-checked LSB substitution producing a fresh buffer.
//!
//! ## extract
//! Lazy LSB reading plus the incremental sentinel scanner.
//!
//! # Contract
//!
//! All operations are pure, synchronous, and CPU-bound; the codec never
//! performs file I/O and never interprets sample structure. Recovery is only
//! guaranteed from the exact byte buffer shape the embedder wrote: any lossy
//! recompression, resampling, or format conversion afterwards destroys the
//! watermark. The scheme offers no confidentiality or tamper-resistance —
//! LSB modulation is trivially detectable and strippable by a motivated
//! adversary. It answers "did we mark this exact file", nothing stronger.
//!
//! # Example
//!
//! ```
//! use wavemark::stego;
//! use wavemark::token::WatermarkToken;
//!
//! let carrier = vec![0u8; 10_000];
//! let token = WatermarkToken::parse("abcd1234").unwrap();
//!
//! let marked = stego::embed_token(&carrier, &token).unwrap();
//! assert_eq!(
//!     stego::extract_message(&marked).as_deref(),
//!     Some("COPYRIGHT|abcd1234")
//! );
//! ```

pub mod embed;
pub mod extract;
pub mod framing;

pub use embed::embed;
pub use extract::{extract_bits, unframe};
pub use framing::{frame, framed_bit_len, strip, SENTINEL, TAG_PREFIX};

use crate::error::Result;
use crate::token::WatermarkToken;

/// Frame a token and embed it into a carrier in one step
///
/// # Errors
/// `CapacityExceeded` if the framed token does not fit the carrier.
pub fn embed_token(carrier: &[u8], token: &WatermarkToken) -> Result<Vec<u8>> {
    embed(carrier, &frame(token.as_str()))
}

/// Extract and unframe whatever message the carrier holds, if any
///
/// `None` is the normal result for an unwatermarked carrier.
pub fn extract_message(carrier: &[u8]) -> Option<String> {
    unframe(extract_bits(carrier))
}

/// Maximum embeddable bit count for a carrier: one bit per byte
pub fn capacity_bits(carrier: &[u8]) -> usize {
    carrier.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatermarkError;

    #[test]
    fn test_embed_token_round_trip() {
        let carrier = vec![0x55u8; 1024];
        let token = WatermarkToken::parse("deadbeef").unwrap();
        let marked = embed_token(&carrier, &token).unwrap();

        let message = extract_message(&marked).unwrap();
        assert_eq!(strip(&message), Some("deadbeef"));
    }

    #[test]
    fn test_embed_token_capacity_error() {
        let carrier = vec![0u8; 10];
        let token = WatermarkToken::parse("abcd1234").unwrap();
        match embed_token(&carrier, &token) {
            Err(WatermarkError::CapacityExceeded {
                required,
                available,
            }) => {
                assert_eq!(required, 208);
                assert_eq!(available, 80);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_capacity_bits() {
        assert_eq!(capacity_bits(&[0u8; 10_000]), 10_000);
        assert_eq!(capacity_bits(&[]), 0);
    }
}
