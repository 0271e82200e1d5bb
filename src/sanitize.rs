//! ASCII sanitization applied before and after ALTO conversion.
//!
//! The search index only accepts ASCII payloads, and non-ASCII bytes must
//! never reach the XML tokenizer. Characters with a compatibility
//! decomposition (accents, ligatures, full-width forms) are reduced to their
//! ASCII base; a small table covers punctuation that has no decomposition.
//! Everything else is dropped.

use unicode_normalization::UnicodeNormalization;

/// Punctuation without an NFKD mapping to ASCII.
///
/// Typographic double quotes map to `'` so that they can never terminate a
/// double-quoted XML attribute once they become ASCII.
const PUNCTUATION_MAP: &[(char, &str)] = &[
    ('\u{2018}', "'"),   // ‘
    ('\u{2019}', "'"),   // ’
    ('\u{201A}', "'"),   // ‚
    ('\u{201B}', "'"),   // ‛
    ('\u{201C}', "'"),   // “
    ('\u{201D}', "'"),   // ”
    ('\u{201E}', "'"),   // „
    ('\u{00AB}', "'"),   // «
    ('\u{00BB}', "'"),   // »
    ('\u{2010}', "-"),   // ‐
    ('\u{2011}', "-"),   // ‑
    ('\u{2012}', "-"),   // ‒
    ('\u{2013}', "-"),   // –
    ('\u{2014}', "-"),   // —
    ('\u{2015}', "-"),   // ―
    ('\u{2022}', "*"),   // •
    ('\u{00A0}', " "),   // no-break space
    ('\u{00DF}', "ss"),  // ß
    ('\u{00C6}', "AE"),  // Æ
    ('\u{00E6}', "ae"),  // æ
    ('\u{0152}', "OE"),  // Œ
    ('\u{0153}', "oe"),  // œ
    ('\u{00D8}', "O"),   // Ø
    ('\u{00F8}', "o"),   // ø
    ('\u{0141}', "L"),   // Ł
    ('\u{0142}', "l"),   // ł
    ('\u{0110}', "D"),   // Đ
    ('\u{0111}', "d"),   // đ
    ('\u{017F}', "s"),   // ſ (long s)
];

/// Map a string to an ASCII-only equivalent.
///
/// Never fails and is idempotent: ASCII input is returned unchanged.
pub fn to_ascii(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }
        if let Some((_, replacement)) = PUNCTUATION_MAP.iter().find(|(from, _)| *from == c) {
            out.push_str(replacement);
            continue;
        }
        out.extend(std::iter::once(c).nfkd().filter_map(markup_safe));
    }
    out
}

/// Keep an ASCII character from a compatibility decomposition.
///
/// Full-width and small forms (`＂`, `＆`, `﹤`, ...) and negated relations
/// such as `≮` decompose to XML metacharacters. These must not appear in
/// the sanitized text as markup, so ampersands and angle brackets become
/// look-alikes and quotes are dropped.
fn markup_safe(c: char) -> Option<char> {
    match c {
        '&' => Some('+'),
        '<' => Some('('),
        '>' => Some(')'),
        '"' | '\'' => None,
        c if c.is_ascii() => Some(c),
        _ => None,
    }
}
