use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b[\w’'-]+\b").unwrap();
}

/// Number of words, where a word is a run of word characters, apostrophes and hyphens.
pub fn count_words(s: &str) -> usize {
    WORD.find_iter(s).count()
}

/// Escapes `& < > " '` so stored text can be embedded in HTML as-is.
pub fn safe_text(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut ret = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => ret.push_str("&amp;"),
            '<' => ret.push_str("&lt;"),
            '>' => ret.push_str("&gt;"),
            '"' => ret.push_str("&quot;"),
            '\'' => ret.push_str("&#x27;"),
            _ => ret.push(c),
        }
    }
    Cow::Owned(ret)
}
