//! Character constants for the petal trail.

/// Glyphs drawn for trail petals.
pub const PETAL_CHARS: &[char] = &['❀', '❁', '❃', '✿', '✧'];
