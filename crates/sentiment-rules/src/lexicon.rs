use once_cell::sync::Lazy;
use std::collections::HashSet;

// All word entries are lowercase and accent free so they compare against
// `text_normalize::normalize` output.

pub static NEGATORS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["khong", "chang", "cha", "deo", "khg", "k", "ko", "k0", "kh"]
        .into_iter()
        .collect()
});

pub static BOOSTERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["rat", "very", "qua", "too", "cuc", "kha", "quite"].into_iter().collect()
});

pub static DAMPENERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["hoi", "slightly", "a-bit", "abit", "it", "slight"].into_iter().collect()
});

/// Positive entries. Multi-word phrases never equal a single token.
pub static POSITIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["tot", "tuyet", "vui", "ung ho", "cam on", "giup", "ho tro", "co ich", "an toan"]
        .into_iter()
        .collect()
});

pub static NEGATIVE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["te", "toi", "tuc", "khong tot", "xau", "ngap", "ngap lut", "thiet hai", "nguy hiem"]
        .into_iter()
        .collect()
});

/// Glyphs searched in the raw text; each one counts at most once.
pub const POSITIVE_EMOJI: &[&str] = &[
    "\u{1f642}",          // slightly smiling face
    "\u{1f60a}",          // smiling face with smiling eyes
    "\u{2764}\u{fe0f}",   // red heart
    "\u{1f44d}",          // thumbs up
    "\u{1f4aa}",          // flexed biceps
    "\u{2728}",           // sparkles
    "\u{1f389}",          // party popper
];

pub const NEGATIVE_EMOJI: &[&str] = &[
    "\u{1f641}",          // slightly frowning face
    "\u{1f622}",          // crying face
    "\u{1f61e}",          // disappointed face
    "\u{1f621}",          // pouting face
    "\u{1f494}",          // broken heart
    "\u{1f44e}",          // thumbs down
];

/// Lexical polarity of a single token: `1`, `-1` or `0`.
pub fn polarity(token: &str) -> i8 {
    let pos = POSITIVE.contains(token) as i8;
    let neg = NEGATIVE.contains(token) as i8;
    pos - neg
}

pub fn is_negator(token: &str) -> bool {
    NEGATORS.contains(token)
}

pub fn is_booster(token: &str) -> bool {
    BOOSTERS.contains(token)
}

pub fn is_dampener(token: &str) -> bool {
    DAMPENERS.contains(token)
}

/// Number of distinct listed glyphs present in `text`.
pub fn count_glyphs(text: &str, glyphs: &[&str]) -> usize {
    glyphs.iter().filter(|g| text.contains(**g)).count()
}
