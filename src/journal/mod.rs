//! The journaling service: users post short timestamped entries and read them back sorted by time.
//!
//! Every name and entry body passes through [`censor`](crate::censor) before it is stored and
//! again before it is returned. Transport is left to the caller; request and response types
//! serialize to the JSON shapes the service has always used.

mod config;
mod error;
mod model;
mod service;
mod store;
mod text;
mod time;

pub use config::JournalConfig;
pub use error::{ErrorBody, JournalError, Result, StoreError};
pub use model::{
    Calendar, EntryRequest, EntryResponse, EntryView, Health, Recent, RecentEntry, Timestamp,
    UserEntries, Users, Version,
};
pub use service::Journal;
pub use store::{EntryRecord, MemoryStore, Store, UserRecord};
pub use text::{count_words, safe_text};
pub use time::{coerce_ts, now_epoch_utc_seconds, utc_day_bounds};
