//! Kana script normalization
//!
//! Readings are stored in hiragana. Lookups fold katakana input into
//! hiragana before matching; every other character passes through.

/// First katakana code point with a hiragana counterpart (ァ)
const KATAKANA_START: u32 = 0x30A1;

/// Last katakana code point with a hiragana counterpart (ヶ)
const KATAKANA_END: u32 = 0x30F6;

/// Distance between a katakana code point and its hiragana counterpart
const KATAKANA_HIRAGANA_SHIFT: u32 = 0x60;

/// Map a single katakana character to hiragana, leaving anything else untouched
pub fn katakana_char_to_hiragana(c: char) -> char {
    let code = c as u32;
    if (KATAKANA_START..=KATAKANA_END).contains(&code) {
        char::from_u32(code - KATAKANA_HIRAGANA_SHIFT).unwrap_or(c)
    } else {
        c
    }
}

/// Convert every katakana character in `text` to hiragana
///
/// # Examples
/// ```
/// use yta_common::kana::katakana_to_hiragana;
///
/// assert_eq!(katakana_to_hiragana("ガッコウ"), "がっこう");
/// assert_eq!(katakana_to_hiragana("ラーメン"), "らーめん");
/// assert_eq!(katakana_to_hiragana("猫ネコ"), "猫ねこ");
/// ```
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars().map(katakana_char_to_hiragana).collect()
}
