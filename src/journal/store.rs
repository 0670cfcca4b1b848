use super::error::StoreError;
use crate::Map;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub user: String,
    pub ts: i64,
    pub text: String,
}

/// Persistence used by [`Journal`](super::Journal). Entries are keyed by `(user, ts)`.
pub trait Store: Send + Sync {
    fn get_user(&self, name: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Fails with `StoreError::AlreadyExists` rather than overwriting.
    fn create_user(&self, user: UserRecord) -> Result<(), StoreError>;

    /// Replaces any entry with the same `(user, ts)`.
    fn put_entry(&self, entry: EntryRecord) -> Result<(), StoreError>;

    /// Deleting a missing entry is not an error.
    fn delete_entry(&self, user: &str, ts: i64) -> Result<(), StoreError>;

    /// Entries of `user` with `ts` in `range`, ordered by `ts`.
    fn query_user_range(
        &self,
        user: &str,
        range: RangeInclusive<i64>,
        limit: Option<usize>,
        ascending: bool,
    ) -> Result<Vec<EntryRecord>, StoreError>;

    /// Every entry of `user`, oldest first.
    fn query_user(&self, user: &str) -> Result<Vec<EntryRecord>, StoreError> {
        self.query_user_range(user, i64::MIN..=i64::MAX, None, true)
    }

    /// Every user, in no particular order.
    fn scan_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Every entry, in no particular order.
    fn scan_entries(&self) -> Result<Vec<EntryRecord>, StoreError>;

    fn ping(&self) -> Result<(), StoreError>;
}

/// Process-local `Store`.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Map<String, UserRecord>>,
    entries: RwLock<Map<String, BTreeMap<i64, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get_user(&self, name: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().get(name).cloned())
    }

    fn create_user(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write();
        if users.contains_key(&user.name) {
            return Err(StoreError::AlreadyExists(user.name));
        }
        users.insert(user.name.clone(), user);
        Ok(())
    }

    fn put_entry(&self, entry: EntryRecord) -> Result<(), StoreError> {
        self.entries
            .write()
            .entry(entry.user)
            .or_default()
            .insert(entry.ts, entry.text);
        Ok(())
    }

    fn delete_entry(&self, user: &str, ts: i64) -> Result<(), StoreError> {
        if let Some(entries) = self.entries.write().get_mut(user) {
            entries.remove(&ts);
        }
        Ok(())
    }

    fn query_user_range(
        &self,
        user: &str,
        range: RangeInclusive<i64>,
        limit: Option<usize>,
        ascending: bool,
    ) -> Result<Vec<EntryRecord>, StoreError> {
        let entries = self.entries.read();
        let entries = match entries.get(user) {
            Some(entries) if range.start() <= range.end() => entries,
            _ => return Ok(Vec::new()),
        };
        let to_record = |(&ts, text): (&i64, &String)| EntryRecord {
            user: user.to_owned(),
            ts,
            text: text.clone(),
        };
        let limit = limit.unwrap_or(usize::MAX);
        let range = entries.range(range);
        Ok(if ascending {
            range.take(limit).map(to_record).collect()
        } else {
            range.rev().take(limit).map(to_record).collect()
        })
    }

    fn scan_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.read().values().cloned().collect())
    }

    fn scan_entries(&self) -> Result<Vec<EntryRecord>, StoreError> {
        Ok(self
            .entries
            .read()
            .iter()
            .flat_map(|(user, entries)| {
                entries.iter().map(move |(&ts, text)| EntryRecord {
                    user: user.clone(),
                    ts,
                    text: text.clone(),
                })
            })
            .collect())
    }

    fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
