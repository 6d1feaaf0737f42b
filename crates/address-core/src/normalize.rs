//! Text normalization used for country name matching
//!
//! [`normalize`] is the primary form: lowercase, diacritics removed,
//! whitespace collapsed. [`normalize_ascii`] is the stricter fallback which
//! additionally repairs mis-decoded text and folds everything to ASCII.

use std::borrow::Cow;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase, canonical decomposition, combining marks dropped.
///
/// `"België"`, `"BELGIE"` and `" belgie "` all normalize to `"belgie"`.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    collapse_whitespace(&stripped)
}

/// ASCII-only form of `text`.
///
/// Mis-decoded UTF-8 (`"BelgiÃ«"`) is repaired first, then the text is
/// compatibility-decomposed, stripped of marks and transliterated. Characters
/// without an ASCII counterpart are dropped.
pub fn normalize_ascii(text: &str) -> String {
    let repaired = repair_legacy_encoding(text);
    let mut out = String::with_capacity(repaired.len());
    for c in repaired.to_lowercase().nfkd() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(ascii) = transliterate(c) {
            out.push_str(ascii);
        }
    }
    collapse_whitespace(&out)
}

/// Whether every letter of `text` survives [`normalize_ascii`]
pub fn folds_to_ascii(text: &str) -> bool {
    normalize(&repair_legacy_encoding(text))
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_ascii() || transliterate(c).is_some())
}

/// Undo UTF-8 bytes that were decoded as Latin-1.
///
/// Only applies when every character fits in a byte and the resulting bytes
/// form valid UTF-8; anything else is returned unchanged.
pub fn repair_legacy_encoding(text: &str) -> Cow<'_, str> {
    if text.is_ascii() || text.chars().any(|c| c as u32 > 0xFF) {
        return Cow::Borrowed(text);
    }

    let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
    match String::from_utf8(bytes) {
        Ok(repaired) => Cow::Owned(repaired),
        Err(_) => Cow::Borrowed(text),
    }
}

fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'ł' => "l",
        'đ' | 'ð' => "d",
        'þ' => "th",
        'ı' => "i",
        'ħ' => "h",
        'ŧ' => "t",
        'ŋ' => "n",
        '\u{2018}' | '\u{2019}' => "'",
        '\u{2010}'..='\u{2015}' => "-",
        '\u{00a0}' => " ",
        _ => return None,
    };
    Some(ascii)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_case_and_accent_insensitive() {
        assert_eq!(normalize("België"), "belgie");
        assert_eq!(normalize("BELGIE"), "belgie");
        assert_eq!(normalize("belgie"), "belgie");
        assert_eq!(normalize("Belgiė"), "belgie");
        assert_eq!(normalize("  United   Kingdom "), "united kingdom");
    }

    #[test]
    fn test_normalize_keeps_letters_without_decomposition() {
        assert_eq!(normalize("Deutschland"), "deutschland");
        assert_eq!(normalize("Danmark"), "danmark");
        assert_eq!(normalize("Ísland"), "island");
    }

    #[test]
    fn test_normalize_ascii_transliterates() {
        assert_eq!(normalize_ascii("Großbritannien"), "grossbritannien");
        assert_eq!(normalize_ascii("Færøerne"), "faeroerne");
        assert_eq!(normalize_ascii("Polska Łódź"), "polska lodz");
    }

    #[test]
    fn test_folds_to_ascii() {
        assert!(folds_to_ascii("Nieuw-Zeeland"));
        assert!(folds_to_ascii("Færøerne"));
        assert!(folds_to_ascii("BelgiÃ«"));
        assert!(!folds_to_ascii("Кот-д'Ивуар"));
        assert!(!folds_to_ascii("Tchad (Чад)"));
    }

    #[test]
    fn test_repair_legacy_encoding() {
        assert_eq!(repair_legacy_encoding("BelgiÃ«"), "België");
        assert_eq!(repair_legacy_encoding("België"), "België");
        assert_eq!(repair_legacy_encoding("plain"), "plain");
        assert_eq!(normalize_ascii("BelgiÃ«"), "belgie");
    }
}
