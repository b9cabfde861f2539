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


//! Payload framing: the bit-level message envelope
//!
//! A framed message is `COPYRIGHT|<token>#####END`, expanded to one bit per
//! carrier byte, each character MSB-first. The tag prefix marks the message
//! as ours at verification time; the sentinel marks the end of the message
//! so extraction knows when to stop scanning.
//!
//! Both literals are fixed and never configurable: changing either would
//! silently orphan every previously protected file.

/// Tag prefix identifying a WaveMark payload (fixed, 10 bytes)
pub const TAG_PREFIX: &str = "COPYRIGHT|";

/// Terminator sentinel marking the end of an embedded message (fixed, 8 bytes)
pub const SENTINEL: &str = "#####END";

/// Build the framed bit sequence for a token
///
/// Concatenates `TAG_PREFIX + token + SENTINEL` and expands every byte to
/// eight bits, most significant bit first. Each element of the returned
/// vector is 0 or 1. No token validation happens here; capacity is checked
/// at embed time and token shape at [`WatermarkToken::parse`].
///
/// Tokens are expected to be ASCII; a multi-byte UTF-8 character would be
/// framed byte-by-byte and reassemble as individual Latin-1 characters on
/// extraction.
///
/// [`WatermarkToken::parse`]: crate::token::WatermarkToken::parse
pub fn frame(token: &str) -> Vec<u8> {
    let message = format!("{TAG_PREFIX}{token}{SENTINEL}");
    let mut bits = Vec::with_capacity(message.len() * 8);
    for byte in message.bytes() {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1);
        }
    }
    bits
}

/// Number of bits `frame` will produce for a token of the given length
///
/// Useful for capacity checks before building the full bit sequence.
pub fn framed_bit_len(token_len: usize) -> usize {
    (TAG_PREFIX.len() + token_len + SENTINEL.len()) * 8
}

/// Recover the token from a decoded message
///
/// `decoded` is the string produced by [`unframe`](super::extract::unframe),
/// sentinel already removed. Returns the token slice if the message carries
/// the recognized tag prefix, `None` otherwise. A `None` here means "a
/// message was decoded but it is not in our tagging convention" — distinct
/// from no message having been found at all, and the verification resolver
/// keeps the two apart.
pub fn strip(decoded: &str) -> Option<&str> {
    decoded.strip_prefix(TAG_PREFIX)
}
