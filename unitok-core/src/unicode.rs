//! Code point classification for the scanner and detectors.
//!
//! General categories come from `unicode-properties`; the handful of block
//! ranges the engine cares about (emoticons, pictograms, and the
//! case-distinguishing scripts) are plain range matches.

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::token::TokenClass;

/// Any punctuation category (Pc, Pd, Ps, Pe, Pi, Pf, Po).
pub fn is_punct(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Punctuation
}

/// Decimal digit (Nd).
pub fn is_digit(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
}

/// Any letter category (Lu, Ll, Lt, Lm, Lo).
pub fn is_alpha(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Letter
}

/// Any symbol category (Sc, Sm, Sk, So).
pub fn is_symbol(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Symbol
}

/// Currency symbol (Sc).
pub fn is_currency(c: char) -> bool {
    c.general_category() == GeneralCategory::CurrencySymbol
}

pub fn is_uppercase(c: char) -> bool {
    c.general_category() == GeneralCategory::UppercaseLetter
}

pub fn is_titlecase(c: char) -> bool {
    c.general_category() == GeneralCategory::TitlecaseLetter
}

/// Member of the Emoticons block.
pub fn is_emoticon(c: char) -> bool {
    matches!(c, '\u{1F600}'..='\u{1F64F}')
}

/// Member of the pictographic blocks (miscellaneous symbols and
/// pictographs, transport, supplemental symbols).
pub fn is_pictogram(c: char) -> bool {
    matches!(
        c,
        '\u{1F300}'..='\u{1F5FF}' | '\u{1F680}'..='\u{1F6FF}' | '\u{1F900}'..='\u{1F9FF}'
    )
}

/// The Unicode `Quotation_Mark` property, plus the spacing grave and acute
/// accents which are widely (mis)used as apostrophes and do not carry the
/// property.
pub fn has_quotation_mark(c: char) -> bool {
    matches!(
        c,
        '"' | '\''
            | '\u{00AB}'
            | '\u{00BB}'
            | '\u{2018}'..='\u{201F}'
            | '\u{2039}'
            | '\u{203A}'
            | '\u{2E42}'
            | '\u{300C}'..='\u{300F}'
            | '\u{301D}'..='\u{301F}'
            | '\u{FE41}'..='\u{FE44}'
            | '\u{FF02}'
            | '\u{FF07}'
            | '\u{FF62}'
            | '\u{FF63}'
            | '`'
            | '\u{00B4}'
    )
}

/// True when `c` can plausibly start a sentence: an uppercase or titlecase
/// letter in a script that distinguishes case (Basic Latin, Greek,
/// Cyrillic, Armenian, Georgian, Deseret).
pub fn is_bos_candidate(c: char) -> bool {
    let case_block = matches!(
        c,
        '\u{0000}'..='\u{007F}'
            | '\u{0370}'..='\u{03FF}'
            | '\u{0400}'..='\u{04FF}'
            | '\u{0530}'..='\u{058F}'
            | '\u{10A0}'..='\u{10FF}'
            | '\u{10400}'..='\u{1044F}'
    );
    case_block && (is_uppercase(c) || is_titlecase(c))
}

/// Semantic class of a single code point, used by the singleton fast path
/// of the word tokenizer. Order matters: currency wins over symbol,
/// punctuation over the emoji blocks.
pub fn detect_type(c: char) -> TokenClass {
    if c.is_whitespace() {
        TokenClass::space()
    } else if is_currency(c) {
        TokenClass::currency()
    } else if is_punct(c) {
        TokenClass::punctuation()
    } else if is_emoticon(c) {
        TokenClass::emoticon()
    } else if is_pictogram(c) {
        TokenClass::pictogram()
    } else if is_alpha(c) {
        TokenClass::word()
    } else if is_digit(c) {
        TokenClass::number()
    } else if is_symbol(c) {
        TokenClass::symbol()
    } else {
        TokenClass::unknown()
    }
}

/// Process `\uXXXX`, `\UXXXXXXXX`, `\t`, `\n`, and `\\` escapes in
/// configuration entries. Returns `None` on a malformed escape.
pub fn unescape(input: &str) -> Option<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'u' => out.push(hex_escape(&mut chars, 4)?),
            'U' => out.push(hex_escape(&mut chars, 8)?),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            '\\' => out.push('\\'),
            other => {
                // unrecognized escape: keep the character as written
                out.push(other);
            }
        }
    }
    Some(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, len: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..len {
        let d = chars.next()?.to_digit(16)?;
        value = value * 16 + d;
    }
    char::from_u32(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_checks() {
        assert!(is_punct(','));
        assert!(is_punct('\u{201C}'));
        assert!(is_digit('7'));
        assert!(!is_digit('Ⅶ'));
        assert!(is_alpha('ß'));
        assert!(is_currency('€'));
        assert!(is_symbol('+'));
        assert!(!is_punct('+'));
    }

    #[test]
    fn test_detect_type() {
        assert_eq!(detect_type('a'), TokenClass::word());
        assert_eq!(detect_type('5'), TokenClass::number());
        assert_eq!(detect_type('.'), TokenClass::punctuation());
        assert_eq!(detect_type('$'), TokenClass::currency());
        assert_eq!(detect_type('='), TokenClass::symbol());
        assert_eq!(detect_type('😀'), TokenClass::emoticon());
        assert_eq!(detect_type('🚀'), TokenClass::pictogram());
        assert_eq!(detect_type(' '), TokenClass::space());
    }

    #[test]
    fn test_quotation_marks() {
        for c in ['"', '\'', '“', '”', '„', '«', '»', '`', '´', '「', '」'] {
            assert!(has_quotation_mark(c), "{c} should be a quotation mark");
        }
        assert!(!has_quotation_mark('a'));
        assert!(!has_quotation_mark(','));
    }

    #[test]
    fn test_bos_candidates() {
        assert!(is_bos_candidate('A'));
        assert!(is_bos_candidate('Ж'));
        assert!(is_bos_candidate('Ω'));
        assert!(!is_bos_candidate('a'));
        // Han has no case distinction
        assert!(!is_bos_candidate('中'));
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("\\u0021").as_deref(), Some("!"));
        assert_eq!(unescape("\\U0001F600").as_deref(), Some("😀"));
        assert_eq!(unescape("a\\tb").as_deref(), Some("a\tb"));
        assert_eq!(unescape("plain").as_deref(), Some("plain"));
        assert!(unescape("\\u00").is_none());
    }
}
