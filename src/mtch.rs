/// One occurrence of a banned token in the working buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Match<'a> {
    /// The token that matched, as stored in the `Banned` set.
    pub token: &'a str,
    /// Char offset of the first matched character.
    pub start: usize,
    /// Char offset one past the last matched character.
    pub end: usize,
    /// Whether the match was preceded by a boundary (or the start of the text).
    pub space_before: bool,
    /// Whether the match was followed by a boundary (or the end of the text).
    pub space_after: bool,
}

impl Match<'_> {
    /// Tokens longer than this are redacted wherever they occur.
    pub const UNAMBIGUOUS_LEN: usize = 4;

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Long tokens always qualify. Short ones only as a standalone word, so they don't
    /// eat into unrelated longer words.
    pub fn is_eligible(&self) -> bool {
        self.len() > Self::UNAMBIGUOUS_LEN || (self.space_before && self.space_after)
    }
}
