use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// ASCII punctuation, or any character in a Unicode punctuation category (`\p{P}`)
fn is_punctuation(c: char) -> bool {
    static PUNCTUATION: OnceLock<Option<Regex>> = OnceLock::new();

    if c.is_ascii() {
        return c.is_ascii_punctuation();
    }

    let Some(pattern) = PUNCTUATION.get_or_init(|| Regex::new(r"^\p{P}$").ok()) else {
        return false;
    };
    let mut buf = [0u8; 4];
    pattern.is_match(c.encode_utf8(&mut buf))
}

/// Map ingredient text to the key used for matching.
///
/// Lower-cases, decomposes (NFD) and drops combining marks so `"Crème"` and
/// `"creme"` compare equal, keeps letters, digits, whitespace and
/// punctuation, then collapses whitespace runs to a single space.
/// The key is only ever compared, never displayed.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || is_punctuation(*c))
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
