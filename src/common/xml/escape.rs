use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

const SPECIAL: [&str; 5] = ["&", "<", ">", "\"", "'"];
const ENTITIES: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

// Built once, shared by every text run and attribute value.
static ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(SPECIAL).expect("static escape patterns are valid")
});

static UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(ENTITIES)
        .expect("static entity patterns are valid")
});

/// Escape the five XML special characters in text or attribute content.
///
/// Characters XML 1.0 cannot carry at all (C0 controls other than tab, line
/// feed and carriage return, U+FFFE, U+FFFF) are written in the OOXML
/// `_xHHHH_` form.
///
/// # Examples
///
/// ```
/// use deckforge::common::xml::escape_xml;
/// assert_eq!(escape_xml("Apple & Google"), "Apple &amp; Google");
/// assert_eq!(escape_xml("'passing trend'"), "&apos;passing trend&apos;");
/// assert_eq!(escape_xml("bell\u{7}"), "bell_x0007_");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    let escaped = if s.bytes().any(|b| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'')) {
        ESCAPER.replace_all(s, &ENTITIES)
    } else {
        s.to_string()
    };
    if !escaped.chars().any(is_restricted) {
        return escaped;
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for ch in escaped.chars() {
        if is_restricted(ch) {
            out.push_str(&format!("_x{:04X}_", ch as u32));
        } else {
            out.push(ch);
        }
    }
    out
}

#[inline]
fn is_restricted(ch: char) -> bool {
    (ch < '\u{20}' && !matches!(ch, '\t' | '\n' | '\r')) || matches!(ch, '\u{FFFE}' | '\u{FFFF}')
}

/// Reverse [`escape_xml`] for the five predefined entities.
///
/// Unknown entities are left as they are; quick-xml already resolves them
/// when reading, this is used on raw attribute values.
#[inline]
pub fn unescape_xml(s: &str) -> String {
    UNESCAPER.replace_all(s, &SPECIAL)
}
