//! Hangul initial-consonant (chosung) transliteration.
//!
//! Each precomposed syllable in U+AC00..=U+D7A3 is replaced by the
//! compatibility jamo of its leading consonant; every other character is
//! copied through. The output always has as many chars as the input.

/// First precomposed Hangul syllable (가).
const SYLLABLE_BASE: u32 = 0xAC00;
/// Last precomposed Hangul syllable (힣).
const SYLLABLE_LAST: u32 = 0xD7A3;
/// Syllables per leading consonant: 21 vowels x 28 trailing consonants.
const SYLLABLES_PER_LEAD: u32 = 21 * 28;

/// Leading consonants in Unicode order, as compatibility jamo.
const LEADS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Leading consonant of a precomposed syllable, if `c` is one.
pub fn initial_of(c: char) -> Option<char> {
    let code = c as u32;
    if !(SYLLABLE_BASE..=SYLLABLE_LAST).contains(&code) {
        return None;
    }
    LEADS
        .get(((code - SYLLABLE_BASE) / SYLLABLES_PER_LEAD) as usize)
        .copied()
}

/// Map every syllable of `text` to its leading consonant.
pub fn transliterate(text: &str) -> String {
    text.chars().map(|c| initial_of(c).unwrap_or(c)).collect()
}
