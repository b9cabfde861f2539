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


//! Bit extraction and incremental sentinel scanning
//!
//! Extraction is the mirror of embedding: read one LSB per carrier byte,
//! reassemble characters in 8-bit groups, and stop the moment the trailing
//! eight characters equal the sentinel. The scanner never looks ahead past
//! the characters assembled so far, so the worst case is a single linear
//! pass over the carrier.
//!
//! Running out of bits without a sentinel match is the *expected* result
//! for an unwatermarked or tampered carrier and is reported as `None`,
//! never as an error.

use super::framing::SENTINEL;

/// Extract the least-significant bit of every carrier byte, in order
///
/// Lazy and restartable: the iterator borrows the carrier and can be
/// recreated or re-sliced at will; the carrier is never mutated.
pub fn extract_bits(carrier: &[u8]) -> impl Iterator<Item = u8> + '_ {
    carrier.iter().map(|byte| byte & 1)
}

/// Result of feeding one decoded character into the sentinel scanner
enum ScanState {
    /// Sentinel not yet seen; keep feeding characters
    Scanning,
    /// Trailing window matched the sentinel; scanning is complete
    Found,
}

/// Incremental sentinel scanner
///
/// Accumulates decoded characters and checks the trailing window against
/// [`SENTINEL`] after every push. Partial sentinel matches never terminate
/// the scan; only the full 8-character literal does.
struct SentinelScanner {
    assembled: String,
}

impl SentinelScanner {
    fn new() -> Self {
        Self {
            assembled: String::new(),
        }
    }

    fn push(&mut self, ch: char) -> ScanState {
        self.assembled.push(ch);
        if self.assembled.len() >= SENTINEL.len() && self.assembled.ends_with(SENTINEL) {
            ScanState::Found
        } else {
            ScanState::Scanning
        }
    }

    /// The message collected before the sentinel (sentinel excluded).
    /// Only meaningful after `push` returned `Found`.
    fn into_message(mut self) -> String {
        self.assembled.truncate(self.assembled.len() - SENTINEL.len());
        self.assembled
    }
}

/// Reassemble a framed message from a bit sequence
///
/// Consumes bits in consecutive groups of eight (MSB first), converting each
/// group to a character and scanning for the sentinel incrementally. On a
/// match, returns everything decoded before the sentinel. Returns `None` if
/// the bits run out first — including a trailing group of fewer than eight
/// bits, which is discarded rather than padded.
pub fn unframe<I>(bits: I) -> Option<String>
where
    I: IntoIterator<Item = u8>,
{
    let mut bits = bits.into_iter();
    let mut scanner = SentinelScanner::new();

    loop {
        let mut value: u8 = 0;
        for _ in 0..8 {
            value = (value << 1) | (bits.next()? & 1);
        }
        // Byte-to-char as Latin-1, matching the byte-per-character framing
        if let ScanState::Found = scanner.push(value as char) {
            return Some(scanner.into_message());
        }
    }
}
