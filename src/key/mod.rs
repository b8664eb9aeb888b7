//! Address key composition.
//!
//! Turns free-text addresses into a compact, reversed key so that addresses
//! sharing a country or region suffix share a key prefix:
//!
//! ```text
//! Bedfordshire,England         -> dnalgneerihsdrofdeb
//! Northamptonshire, , England  -> dnalgneerihsnotpmahtron
//! Bedfordshire,,England        -> dnalgneerihsdrofdeb
//! ```
//!
//! Splitting such keys at a fixed offset groups most English counties under
//! one storage partition.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compose the lookup key for an address.
///
/// Total and pure: blank input yields an empty key, and punctuation or
/// whitespace never survives.
///
/// # Examples
///
/// ```
/// use geomux::key::compose;
///
/// assert_eq!(compose("Carrick-on-Suir"), "riusnokcirrac");
/// assert_eq!(compose("Le\u{301}s"), "sel");
/// assert_eq!(compose("--a--"), "a");
/// assert_eq!(compose("   "), "");
/// ```
pub fn compose(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    strip_diacritics(text)
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| is_key_char(*c))
        .rev()
        .collect()
}

/// Letters and decimal digits. Numeric letters such as `Ⅻ` and
/// superscripts such as `²` are dropped.
fn is_key_char(c: char) -> bool {
    (c.is_alphabetic() && !c.is_numeric()) || c.is_ascii_digit()
}

/// [`compose`] for optional input; `None` behaves like a blank string.
pub fn compose_opt(text: Option<&str>) -> String {
    text.map(compose).unwrap_or_default()
}

/// Decompose, drop combining marks, recompose.
fn strip_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_input() {
        for input in ["", " ", "  ", " \t ", " \n\r \r\n \t "] {
            assert_eq!(compose(input), "", "input {:?}", input);
        }
        assert_eq!(compose_opt(None), "");
        assert_eq!(compose_opt(Some("   ")), "");
    }

    #[test]
    fn test_punctuation_only() {
        for input in ["?", "-", "--", "---", "----", " ---- ", ".", "..", "...", ",,,"] {
            assert_eq!(compose(input), "", "input {:?}", input);
        }
        assert_eq!(compose("--a--"), "a");
    }

    #[test]
    fn test_repeated_letters_kept() {
        assert_eq!(compose("aa"), "aa");
        assert_eq!(compose("  aaa  "), "aaa");
    }

    #[test]
    fn test_diacritics_removed() {
        assert_eq!(compose("Le\u{301}s"), "sel");
        assert_eq!(compose("Zürich"), "hciruz");
        assert_eq!(compose("São Paulo"), "oluapoas");
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(compose("10 Downing St, London SW1A"), "a1wsnodnoltsgninwod01");
    }

    #[test]
    fn test_non_latin_letters_kept() {
        assert_eq!(compose("東京"), "京東");
    }

    #[test]
    fn test_numeric_symbols_dropped() {
        assert_eq!(compose("x²"), "x");
        assert_eq!(compose("Louis Ⅻ"), "siuol");
        assert_eq!(compose("Flat ½, 3 High St"), "tshgih3talf");
    }
}
