//! Redacts a fixed list of banned tokens from user-supplied text, and hosts the small journaling
//! service that runs every name and entry through it on the way in and on the way out.
//!
//! ```
//! use journal_censor::CensorStr;
//!
//! assert_eq!("a NiGa b".censor(), "a *** b");
//! assert_eq!("xNIGGERx".censor(), "x***x");
//! // Short tokens are left alone inside longer words.
//! assert_eq!("banigax".censor(), "banigax");
//! ```

#[cfg(feature = "censor")]
pub(crate) mod banned;
#[cfg(feature = "censor")]
pub(crate) mod buffer;
#[cfg(feature = "censor")]
pub(crate) mod censor;
#[cfg(feature = "censor")]
pub(crate) mod mtch;

#[cfg(feature = "journal")]
pub mod journal;

#[cfg(feature = "censor")]
pub use banned::Banned;
#[cfg(feature = "censor")]
pub use censor::{censor, censor_opt, Censor, CensorStr, Censored, Redaction};

#[cfg(feature = "censor")]
pub(crate) type Set<V> = rustc_hash::FxHashSet<V>;
#[cfg(feature = "censor")]
#[allow(unused)]
pub(crate) type Map<K, V> = rustc_hash::FxHashMap<K, V>;

/// Returns true iff the character separates a standalone word from its neighbors.
///
/// Only the literal ASCII space counts. Punctuation, tabs and newlines do not, so `"niga."` is not
/// considered a standalone word.
pub fn is_boundary(c: char) -> bool {
    c == ' '
}


#[cfg(all(feature = "censor", feature = "journal"))]
use doc_comment::doctest;
#[cfg(all(feature = "censor", feature = "journal"))]
doctest!("../README.md");
