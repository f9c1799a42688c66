// SPDX-License-Identifier: MPL-2.0
//! Fallback glyph derivation.

/// Glyph shown when the display name is empty.
pub const DEFAULT_GLYPH: char = 'U';

/// Derives the single-character fallback glyph from a display name.
///
/// The glyph is the uppercase mapping of the first character. Multi-character
/// uppercase expansions keep only their first character so the glyph stays a
/// single char.
#[must_use]
pub fn glyph(nick_name: &str) -> char {
    nick_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().next().unwrap_or(c))
        .unwrap_or(DEFAULT_GLYPH)
}
