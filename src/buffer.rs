use crate::banned::Banned;
use crate::is_boundary;
use crate::mtch::Match;

/// What a redacted span is replaced with, regardless of its length.
pub(crate) const MASK: [char; 3] = ['*'; 3];

/// Text being censored, kept as two parallel views of equal length: a lowercase one to match
/// against and the original-case one to return.
pub(crate) struct Buffer {
    lower: Vec<char>,
    original: Vec<char>,
}

impl Buffer {
    pub fn new(text: &str) -> Self {
        let original: Vec<char> = text.chars().collect();
        let lower = original.iter().map(|&c| fold(c)).collect();
        Self { lower, original }
    }

    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Finds the leftmost occurrence of any token starting at or after `cursor`.
    pub fn find_from<'b>(&self, cursor: usize, banned: &'b Banned) -> Option<Match<'b>> {
        (cursor..self.lower.len()).find_map(|start| {
            banned
                .iter()
                .find_map(|token| self.matches_at(start, token).map(|end| (token, end)))
                .map(|(token, end)| Match {
                    token,
                    start,
                    end,
                    space_before: start == 0 || is_boundary(self.lower[start - 1]),
                    space_after: self.lower.get(end).map_or(true, |&c| is_boundary(c)),
                })
        })
    }

    /// Returns the exclusive end if `token` occurs at `start`.
    fn matches_at(&self, start: usize, token: &str) -> Option<usize> {
        let mut end = start;
        for c in token.chars() {
            if self.lower.get(end) != Some(&c) {
                return None;
            }
            end += 1;
        }
        Some(end)
    }

    /// Replaces the matched span in both views with the mask.
    pub fn redact(&mut self, m: &Match<'_>) {
        self.lower.splice(m.start..m.end, MASK);
        self.original.splice(m.start..m.end, MASK);
        debug_assert_eq!(self.lower.len(), self.original.len());
    }

    pub fn into_string(self) -> String {
        self.original.into_iter().collect()
    }
}

/// Lowercases a single char, leaving it unchanged if its lowercase form spans several chars.
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::{fold, Buffer};
    use crate::banned::Banned;

    #[test]
    fn views_stay_parallel() {
        // 'İ' lowercases to two chars.
        let buffer = Buffer::new("İstanbul ABC");
        assert_eq!(buffer.lower.len(), buffer.original.len());
        assert_eq!(fold('İ'), 'İ');
        assert_eq!(fold('Q'), 'q');
    }

    #[test]
    fn leftmost_then_earliest_token() {
        let banned = Banned::from_tokens(["bc", "abc", "ab"]);
        let buffer = Buffer::new("xxABCab");

        let m = buffer.find_from(0, &banned).unwrap();
        assert_eq!((m.token, m.start, m.end), ("abc", 2, 5));

        let m = buffer.find_from(3, &banned).unwrap();
        assert_eq!((m.token, m.start, m.end), ("bc", 3, 5));

        let m = buffer.find_from(5, &banned).unwrap();
        assert_eq!((m.token, m.start, m.end), ("ab", 5, 7));
        assert!(!m.space_before);
        assert!(m.space_after);

        assert!(buffer.find_from(6, &banned).is_none());
        assert!(buffer.find_from(100, &banned).is_none());
    }

    #[test]
    fn redact_both_views() {
        let banned = Banned::from_tokens(["bad"]);
        let mut buffer = Buffer::new("so BAD today");
        let m = buffer.find_from(0, &banned).unwrap();
        buffer.redact(&m);
        assert_eq!(buffer.lower.iter().collect::<String>(), "so *** today");
        assert_eq!(buffer.into_string(), "so *** today");
    }
}
