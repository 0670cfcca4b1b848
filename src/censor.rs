use crate::banned::{Banned, BANNED};
use crate::buffer::Buffer;
use std::borrow::Cow;

/// Censor redacts banned tokens from arbitrary text.
///
/// Matching is case-insensitive, but every character that survives is returned exactly as it was
/// given. Each redacted span becomes `***`, whatever its length. Tokens longer than four
/// characters are redacted wherever they occur, even inside a longer word; shorter tokens only
/// when they stand alone between spaces (or the ends of the text).
///
/// You can also make use of `Censor` via the `CensorStr` trait, or the free functions `censor` and
/// `censor_opt`, all of which use the built-in list.
#[derive(Clone, Debug)]
pub struct Censor<'a> {
    banned: Cow<'a, Banned>,
}

/// Output of `Censor::censor_and_analyze`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Censored {
    /// The censored text.
    pub text: String,
    /// Every redaction, in the order performed.
    pub redactions: Vec<Redaction>,
    /// How many short tokens were found embedded in longer words and left alone.
    pub rejections: usize,
}

/// A single redacted span. `start` is a char offset into the text as it was at the time of the
/// redaction (earlier redactions already applied).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Redaction {
    pub token: String,
    pub start: usize,
    pub len: usize,
}

impl Default for Censor<'static> {
    fn default() -> Self {
        Self {
            banned: Cow::Borrowed(&*BANNED),
        }
    }
}

impl<'a> Censor<'a> {
    /// Allocates a new `Censor` matching against `banned`.
    pub fn new(banned: &'a Banned) -> Self {
        Self {
            banned: Cow::Borrowed(banned),
        }
    }

    /// Takes ownership of `banned`.
    pub fn with_banned(banned: Banned) -> Censor<'static> {
        Censor {
            banned: Cow::Owned(banned),
        }
    }

    pub fn banned(&self) -> &Banned {
        &self.banned
    }

    /// Produces a censored copy of `text`.
    pub fn censor(&self, text: &str) -> String {
        self.censor_and_analyze(text).text
    }

    /// Produces a censored copy of `text`, along with what was redacted.
    pub fn censor_and_analyze(&self, text: &str) -> Censored {
        if text.is_empty() {
            return Censored::default();
        }

        let mut buffer = Buffer::new(text);
        let mut redactions = Vec::new();
        let mut rejections = 0;
        // Strictly increases every iteration.
        let mut cursor = 0;

        while let Some(m) = buffer.find_from(cursor, &self.banned) {
            let token = m.token;
            if m.is_eligible() {
                tracing::trace!(token, start = m.start, "redacting");
                buffer.redact(&m);
                redactions.push(Redaction {
                    token: token.to_owned(),
                    start: m.start,
                    len: m.len(),
                });
                // Resume just inside the mask so text pulled together by the redaction is rescanned.
                cursor = m.start + 1;
            } else {
                tracing::trace!(token, start = m.start, "embedded in a longer word, skipping");
                rejections += 1;
                cursor = m.end;
            }
            debug_assert!(cursor <= buffer.len());
        }

        Censored {
            text: buffer.into_string(),
            redactions,
            rejections,
        }
    }

    /// Returns `true` if censoring performs at least one redaction. With the built-in list that
    /// means the text changes; a custom token such as `***` can be redacted without changing it.
    pub fn contains_banned(&self, text: &str) -> bool {
        !self.censor_and_analyze(text).redactions.is_empty()
    }
}

/// Censors `text` against the built-in list.
pub fn censor(text: &str) -> String {
    Censor::default().censor(text)
}

/// Censors possibly absent text against the built-in list. Absent text censors to `""`.
pub fn censor_opt(text: Option<&str>) -> String {
    text.map(censor).unwrap_or_default()
}

/// CensorStr makes it easy to sanitize a `String` or `&str` by calling `.censor()`.
pub trait CensorStr: Sized {
    /// The output is a newly allocated, censored string.
    fn censor(self) -> String;

    /// Returns `true` if the text contains something that would be redacted.
    fn contains_banned(self) -> bool;
}

impl CensorStr for &str {
    fn censor(self) -> String {
        censor(self)
    }

    fn contains_banned(self) -> bool {
        Censor::default().contains_banned(self)
    }
}
