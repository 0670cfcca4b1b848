use crate::Set;
use lazy_static::lazy_static;
use std::iter::FromIterator;

lazy_static! {
    pub(crate) static ref BANNED: Banned = include_str!("banned_tokens.txt")
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect();
}

/// Immutable, ordered set of lowercase tokens to redact.
///
/// Order matters only when two tokens match at the same position; the one added first wins.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<String>", into = "Vec<String>"))]
pub struct Banned {
    tokens: Vec<String>,
}

impl Default for Banned {
    /// The built-in list.
    fn default() -> Self {
        BANNED.clone()
    }
}

impl Banned {
    /// Empty.
    pub fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Builds a set from arbitrary tokens. Tokens are trimmed and lowercased; empty tokens and
    /// duplicates are dropped, keeping the position of the first occurrence.
    pub fn from_tokens<T: AsRef<str>>(tokens: impl IntoIterator<Item = T>) -> Self {
        let mut seen = Set::default();
        let tokens = tokens
            .into_iter()
            .map(|token| token.as_ref().trim().to_lowercase())
            .filter(|token| !token.is_empty() && seen.insert(token.clone()))
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.tokens.iter().any(|t| *t == token)
    }

    /// Tokens in precedence order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().map(String::as_str)
    }
}

impl<T: AsRef<str>> FromIterator<T> for Banned {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_tokens(iter)
    }
}

impl From<Vec<String>> for Banned {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<Banned> for Vec<String> {
    fn from(banned: Banned) -> Self {
        banned.tokens
    }
}
