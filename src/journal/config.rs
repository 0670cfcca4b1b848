use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tunables for [`Journal`](super::Journal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Longest entry accepted, in words.
    pub max_words: usize,
    /// Entries returned by `all_recent` when the caller gives no usable limit.
    pub recent_limit: usize,
    /// Replace a user's existing entry for the same UTC day instead of adding another.
    pub one_entry_per_day: bool,
    /// Reported by `version`.
    pub version: String,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            max_words: 10,
            recent_limit: 200,
            one_entry_per_day: false,
            version: String::from("ts-only-epoch-utc-2025-10-18"),
        }
    }
}

impl JournalConfig {
    /// Defaults, overridden by `JOURNAL_MAX_WORDS`, `JOURNAL_RECENT_LIMIT`, `JOURNAL_ONE_PER_DAY`
    /// and `JOURNAL_VERSION` where set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        override_parsed(&lookup, "JOURNAL_MAX_WORDS", &mut config.max_words);
        override_parsed(&lookup, "JOURNAL_RECENT_LIMIT", &mut config.recent_limit);
        override_parsed(&lookup, "JOURNAL_ONE_PER_DAY", &mut config.one_entry_per_day);
        if let Some(version) = lookup("JOURNAL_VERSION").filter(|v| !v.trim().is_empty()) {
            config.version = version;
        }
        config
    }
}

fn override_parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    value: &mut T,
) {
    if let Some(raw) = lookup(key) {
        match raw.trim().parse() {
            Ok(parsed) => *value = parsed,
            Err(_) => tracing::warn!(key, raw = raw.as_str(), "ignoring unparsable setting"),
        }
    }
}
