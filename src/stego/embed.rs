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


//! Bit embedding into carrier LSBs
//!
//! Every carrier byte is an independent 1-bit slot regardless of which
//! multi-byte sample or channel it belongs to. This is deliberately
//! imprecise about sample structure: the codec treats PCM frame data as an
//! opaque byte sequence, which keeps it agnostic to sample width, channel
//! count, and frame rate.

use crate::error::{Result, WatermarkError};

/// Write a bit sequence into the least-significant bits of a carrier
///
/// Returns a new buffer; the source carrier is never mutated, so a caller
/// can retry with a different payload or carrier after a failure without
/// side effects. Bytes at indices `>= bits.len()` are copied through
/// byte-for-byte.
///
/// Pure and deterministic; safe to call concurrently on independent buffers.
///
/// # Errors
/// `CapacityExceeded` if the bit sequence is longer than the carrier (one
/// LSB slot per byte). The error reports the required message bits against
/// the carrier's raw bit size; nothing is written on failure.
pub fn embed(carrier: &[u8], bits: &[u8]) -> Result<Vec<u8>> {
    if bits.len() > carrier.len() {
        return Err(WatermarkError::CapacityExceeded {
            required: bits.len(),
            available: carrier.len() * 8,
        });
    }

    let mut out = carrier.to_vec();
    for (slot, bit) in out.iter_mut().zip(bits) {
        *slot = (*slot & 0xFE) | (bit & 1);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_sets_lsbs() {
        let carrier = vec![0xFFu8; 8];
        let bits = [1, 0, 1, 0, 1, 0, 1, 0];
        let out = embed(&carrier, &bits).unwrap();
        assert_eq!(out, vec![0xFF, 0xFE, 0xFF, 0xFE, 0xFF, 0xFE, 0xFF, 0xFE]);
    }

    #[test]
    fn test_embed_preserves_upper_bits() {
        let carrier = vec![0b1010_1010u8; 4];
        let out = embed(&carrier, &[1, 1, 1, 1]).unwrap();
        for byte in out {
            assert_eq!(byte >> 1, 0b101_0101);
            assert_eq!(byte & 1, 1);
        }
    }

    #[test]
    fn test_embed_leaves_tail_untouched() {
        let carrier: Vec<u8> = (0..32).collect();
        let bits = [1u8; 10];
        let out = embed(&carrier, &bits).unwrap();
        assert_eq!(&out[10..], &carrier[10..]);
    }

    #[test]
    fn test_embed_does_not_mutate_input() {
        let carrier = vec![0u8; 16];
        let original = carrier.clone();
        let _ = embed(&carrier, &[1u8; 16]).unwrap();
        assert_eq!(carrier, original);
    }

    #[test]
    fn test_exact_capacity_succeeds() {
        let carrier = vec![0u8; 8];
        assert!(embed(&carrier, &[1u8; 8]).is_ok());
    }

    #[test]
    fn test_one_bit_over_capacity_fails() {
        let carrier = vec![0u8; 8];
        match embed(&carrier, &[1u8; 9]) {
            Err(WatermarkError::CapacityExceeded {
                required,
                available,
            }) => {
                assert_eq!(required, 9);
                assert_eq!(available, 64);
            }
            other => panic!("expected CapacityExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_bits_is_identity() {
        let carrier = vec![7u8, 8, 9];
        assert_eq!(embed(&carrier, &[]).unwrap(), carrier);
    }
}
