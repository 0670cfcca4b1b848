use super::config::JournalConfig;
use super::error::{JournalError, Result, StoreError};
use super::model::{
    Calendar, EntryRequest, EntryResponse, EntryView, Health, Recent, RecentEntry, UserEntries,
    Users, Version,
};
use super::store::{EntryRecord, MemoryStore, Store, UserRecord};
use super::text::{count_words, safe_text};
use super::time::{coerce_ts, utc_day_bounds};
use crate::Censor;
use itertools::Itertools;

/// Journal accepts entries on behalf of users and serves them back, censoring every name and
/// entry body on the way in and again on the way out.
///
/// A user is created by their first submission; later submissions must repeat the same password.
pub struct Journal<S: Store = MemoryStore> {
    store: S,
    config: JournalConfig,
    censor: Censor<'static>,
}

impl Default for Journal<MemoryStore> {
    fn default() -> Self {
        Self::new(MemoryStore::new(), JournalConfig::default())
    }
}

impl<S: Store> Journal<S> {
    /// Uses the built-in banned-token list.
    pub fn new(store: S, config: JournalConfig) -> Self {
        Self::with_censor(store, config, Censor::default())
    }

    pub fn with_censor(store: S, config: JournalConfig, censor: Censor<'static>) -> Self {
        Self {
            store,
            config,
            censor,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &JournalConfig {
        &self.config
    }

    /// Validates, censors and stores an entry, creating its user if needed.
    pub fn submit_entry(&self, req: &EntryRequest) -> Result<EntryResponse> {
        let name = self.censor.censor(req.name.as_deref().unwrap_or_default());
        let name = name.trim();
        let text = self.censor.censor(req.text.as_deref().unwrap_or_default());
        let text = text.trim();

        if name.is_empty() {
            return Err(JournalError::bad_request("name required"));
        }
        if text.is_empty() {
            return Err(JournalError::bad_request("text required"));
        }
        if count_words(text) > self.config.max_words {
            return Err(JournalError::bad_request(format!(
                "text exceeds {} words",
                self.config.max_words
            )));
        }

        let ts = coerce_ts(req.ts.as_ref())?;
        let day = if self.config.one_entry_per_day {
            Some(utc_day_bounds(ts)?)
        } else {
            None
        };
        self.authenticate(name, req.password.as_deref().unwrap_or_default())?;

        let mut overwritten = false;
        if let Some((day_start, day_end)) = day {
            for existing in self
                .store
                .query_user_range(name, day_start..=day_end, None, true)?
            {
                tracing::debug!(user = name, ts = existing.ts, "replacing entry for the same day");
                self.store.delete_entry(name, existing.ts)?;
                overwritten = true;
            }
        }

        self.store.put_entry(EntryRecord {
            user: name.to_owned(),
            ts,
            text: text.to_owned(),
        })?;
        tracing::debug!(user = name, ts, overwritten, "stored entry");

        Ok(EntryResponse {
            ok: true,
            overwritten,
            ts,
        })
    }

    /// Creates the user on first sight, otherwise checks the password.
    fn authenticate(&self, name: &str, password: &str) -> Result<()> {
        let user = match self.store.get_user(name)? {
            Some(user) => user,
            None => {
                let user = UserRecord {
                    name: name.to_owned(),
                    password: password.to_owned(),
                };
                match self.store.create_user(user) {
                    Ok(()) => {
                        tracing::info!(user = name, "created user");
                        return Ok(());
                    }
                    // Someone else created it in the meantime; their password stands.
                    Err(StoreError::AlreadyExists(_)) => self
                        .store
                        .get_user(name)?
                        .ok_or_else(|| StoreError::Unavailable(format!("user {name:?} vanished")))?,
                    Err(e) => return Err(e.into()),
                }
            }
        };

        if user.password != password {
            tracing::debug!(user = name, "rejected credentials");
            return Err(JournalError::Forbidden(String::from("invalid credentials")));
        }
        Ok(())
    }

    /// Every entry of `name`, oldest first.
    pub fn user_entries(&self, name: &str) -> Result<UserEntries> {
        Ok(UserEntries {
            name: self.censor.censor(name),
            entries: self.views(name)?,
        })
    }

    /// Same entries as `user_entries`, for calendar rendering.
    pub fn calendar(&self, name: &str) -> Result<Calendar> {
        Ok(Calendar {
            entries: self.views(name)?,
        })
    }

    fn views(&self, name: &str) -> Result<Vec<EntryView>> {
        Ok(self
            .store
            .query_user(name)?
            .into_iter()
            .map(|entry| EntryView {
                ts: entry.ts,
                text: self.present(&entry.text),
            })
            .collect())
    }

    /// Stored text is escaped for HTML, then censored again in case it predates censoring.
    fn present(&self, text: &str) -> String {
        self.censor.censor(&safe_text(text))
    }

    /// All user names, sorted case-insensitively.
    pub fn list_users(&self) -> Result<Users> {
        let users = self
            .store
            .scan_users()?
            .into_iter()
            .map(|user| self.censor.censor(&user.name))
            .sorted_by_key(|name| name.to_lowercase())
            .collect();
        Ok(Users { users })
    }

    /// Newest entries across all users. `limit` comes straight from the query string; anything
    /// that isn't an integer falls back to the configured default. A negative limit drops that
    /// many of the oldest entries instead.
    pub fn all_recent(&self, limit: Option<&str>) -> Result<Recent> {
        let limit = limit
            .and_then(|limit| limit.trim().parse::<i64>().ok())
            .unwrap_or_else(|| i64::try_from(self.config.recent_limit).unwrap_or(i64::MAX));

        let entries = self.store.scan_entries()?;
        let keep = if limit < 0 {
            entries.len().saturating_sub(limit.unsigned_abs() as usize)
        } else {
            usize::try_from(limit).unwrap_or(usize::MAX)
        };

        let entries = entries
            .into_iter()
            .sorted_by(|a, b| (b.ts, &b.user).cmp(&(a.ts, &a.user)))
            .take(keep)
            .map(|entry| RecentEntry {
                user: self.censor.censor(&entry.user),
                ts: entry.ts,
                text: self.present(&entry.text),
            })
            .collect();
        Ok(Recent { entries })
    }

    pub fn health(&self) -> Health {
        match self.store.ping() {
            Ok(()) => Health {
                ok: true,
                err: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                Health {
                    ok: false,
                    err: Some(e.to_string()),
                }
            }
        }
    }

    pub fn version(&self) -> Version {
        Version {
            v: self.config.version.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Journal;
    use crate::journal::{
        EntryRecord, EntryRequest, JournalConfig, JournalError, MemoryStore, Store, StoreError,
        Timestamp, UserRecord,
    };
    use crate::{Banned, Censor};
    use std::ops::RangeInclusive;

    fn request(name: &str, password: &str, text: &str, ts: i64) -> EntryRequest {
        EntryRequest {
            name: Some(String::from(name)),
            password: Some(String::from(password)),
            text: Some(String::from(text)),
            ts: Some(Timestamp::Seconds(ts)),
        }
    }

    const DAY: i64 = 1760745600;

    fn journal() -> Journal {
        Journal::default()
    }

    #[test]
    fn submit_and_read_back() {
        let journal = journal();
        let res = journal
            .submit_entry(&request("ann", "pw", "  walked the dog  ", DAY + 60))
            .unwrap();
        assert!(res.ok);
        assert!(!res.overwritten);
        assert_eq!(res.ts, DAY + 60);

        journal
            .submit_entry(&request("ann", "pw", "first", DAY - 60))
            .unwrap();

        let entries = journal.user_entries("ann").unwrap();
        assert_eq!(entries.name, "ann");
        let texts: Vec<_> = entries.entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["first", "walked the dog"]);
        assert_eq!(journal.calendar("ann").unwrap().entries, entries.entries);
        assert!(journal.user_entries("nobody").unwrap().entries.is_empty());
    }

    #[test]
    fn censors_before_storing() {
        let journal = journal();
        journal
            .submit_entry(&request("Niggerman", "pw", "you NIGGA", DAY))
            .unwrap();

        let stored = journal.store().scan_entries().unwrap();
        assert_eq!(stored[0].user, "***man");
        assert_eq!(stored[0].text, "you ***");
        assert_eq!(journal.list_users().unwrap().users, ["***man"]);
    }

    #[test]
    fn censors_on_read() {
        let journal = journal();
        // Written behind the service's back, e.g. before censoring existed.
        journal
            .store()
            .put_entry(EntryRecord {
                user: String::from("old niga"),
                ts: DAY,
                text: String::from("<i>niga</i> & ni99er"),
            })
            .unwrap();

        let entries = journal.user_entries("old niga").unwrap();
        assert_eq!(entries.name, "old ***");
        assert_eq!(entries.entries[0].text, "&lt;i&gt;niga&lt;/i&gt; &amp; ***");

        let recent = journal.all_recent(None).unwrap();
        assert_eq!(recent.entries[0].user, "old ***");
    }

    #[test]
    fn validation() {
        let journal = journal();
        let err = |req: EntryRequest| journal.submit_entry(&req).unwrap_err();

        assert_eq!(
            err(request("  ", "pw", "text", DAY)),
            JournalError::BadRequest(String::from("name required"))
        );
        assert_eq!(
            err(EntryRequest::default()),
            JournalError::BadRequest(String::from("name required"))
        );
        assert_eq!(
            err(request("ann", "pw", " ", DAY)),
            JournalError::BadRequest(String::from("text required"))
        );
        assert_eq!(
            err(request("ann", "pw", "a b c d e f g h i j k", DAY)),
            JournalError::BadRequest(String::from("text exceeds 10 words"))
        );
        let mut bad_ts = request("ann", "pw", "hi", DAY);
        bad_ts.ts = Some(Timestamp::Text(String::from("tomorrow-ish")));
        assert_eq!(err(bad_ts).status(), 400);

        // Nothing was created along the way.
        assert!(journal.list_users().unwrap().users.is_empty());
        assert!(journal
            .submit_entry(&request("ann", "pw", "a b c d e f g h i j", DAY))
            .is_ok());
    }

    #[test]
    fn credentials() {
        let journal = journal();
        journal.submit_entry(&request("ann", "pw", "one", DAY)).unwrap();

        let err = journal
            .submit_entry(&request("ann", "wrong", "two", DAY + 1))
            .unwrap_err();
        assert_eq!(err, JournalError::Forbidden(String::from("invalid credentials")));
        assert_eq!(err.status(), 403);
        assert_eq!(journal.user_entries("ann").unwrap().entries.len(), 1);

        // Missing password is the empty password.
        let mut req = request("bob", "", "hello", DAY);
        req.password = None;
        journal.submit_entry(&req).unwrap();
        journal.submit_entry(&request("bob", "", "again", DAY + 1)).unwrap();
    }

    #[test]
    fn one_entry_per_day() {
        let journal = journal();
        journal.submit_entry(&request("ann", "pw", "one", DAY + 10)).unwrap();
        let res = journal.submit_entry(&request("ann", "pw", "two", DAY + 20)).unwrap();
        assert!(!res.overwritten);
        assert_eq!(journal.user_entries("ann").unwrap().entries.len(), 2);

        let config = JournalConfig {
            one_entry_per_day: true,
            ..JournalConfig::default()
        };
        let journal = Journal::new(MemoryStore::new(), config);
        journal.submit_entry(&request("ann", "pw", "one", DAY + 10)).unwrap();
        journal.submit_entry(&request("ann", "pw", "next day", DAY + 86_400)).unwrap();
        let res = journal
            .submit_entry(&request("ann", "pw", "two", DAY + 86_399))
            .unwrap();
        assert!(res.overwritten);

        let entries = journal.user_entries("ann").unwrap().entries;
        let texts: Vec<_> = entries.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["two", "next day"]);
    }

    #[test]
    fn far_future_day_is_rejected() {
        let config = JournalConfig {
            one_entry_per_day: true,
            ..JournalConfig::default()
        };
        let per_day = Journal::new(MemoryStore::new(), config);
        let err = per_day
            .submit_entry(&request("ann", "pw", "hi", i64::MAX))
            .unwrap_err();
        assert_eq!(err.status(), 400);
        assert!(per_day.list_users().unwrap().users.is_empty());

        // Without the per-day rule the timestamp is stored as given.
        let res = journal()
            .submit_entry(&request("ann", "pw", "hi", i64::MAX))
            .unwrap();
        assert_eq!(res.ts, i64::MAX);
    }

    #[test]
    fn users_sorted_case_insensitively() {
        let journal = journal();
        for name in ["bob", "Carol", "alice", "Bea"] {
            journal.submit_entry(&request(name, "", "hi", DAY)).unwrap();
        }
        assert_eq!(
            journal.list_users().unwrap().users,
            ["alice", "Bea", "bob", "Carol"]
        );
    }

    #[test]
    fn all_recent() {
        let journal = journal();
        journal.submit_entry(&request("bob", "", "b1", DAY)).unwrap();
        journal.submit_entry(&request("ann", "", "a1", DAY)).unwrap();
        journal.submit_entry(&request("ann", "", "a2", DAY + 5)).unwrap();

        let order = |limit: Option<&str>| {
            journal
                .all_recent(limit)
                .unwrap()
                .entries
                .into_iter()
                .map(|e| e.text)
                .collect::<Vec<_>>()
        };
        assert_eq!(order(None), ["a2", "b1", "a1"]);
        assert_eq!(order(Some("2")), ["a2", "b1"]);
        assert_eq!(order(Some("0")), Vec::<String>::new());
        assert_eq!(order(Some("many")), ["a2", "b1", "a1"]);
        assert_eq!(order(Some("-1")), ["a2", "b1"]);
        assert_eq!(order(Some("-3")), Vec::<String>::new());
        assert_eq!(order(Some("-10")), Vec::<String>::new());
    }

    #[test]
    fn custom_censor() {
        let banned = Banned::from_tokens(["heck"]);
        let journal = Journal::with_censor(
            MemoryStore::new(),
            JournalConfig::default(),
            Censor::with_banned(banned),
        );
        journal.submit_entry(&request("ann", "", "oh heck", DAY)).unwrap();
        assert_eq!(journal.user_entries("ann").unwrap().entries[0].text, "oh ***");
    }

    #[test]
    fn health_and_version() {
        let journal = journal();
        assert!(journal.health().ok);
        assert_eq!(journal.version().v, "ts-only-epoch-utc-2025-10-18");

        let journal = Journal::new(Offline, JournalConfig::default());
        let health = journal.health();
        assert!(!health.ok);
        assert_eq!(health.err.as_deref(), Some("store unavailable: offline"));

        let err = journal.submit_entry(&request("ann", "", "hi", DAY)).unwrap_err();
        assert_eq!(err.status(), 500);
    }

    struct Offline;

    impl Offline {
        fn err<T>(&self) -> Result<T, StoreError> {
            Err(StoreError::Unavailable(String::from("offline")))
        }
    }

    impl Store for Offline {
        fn get_user(&self, _: &str) -> Result<Option<UserRecord>, StoreError> {
            self.err()
        }

        fn create_user(&self, _: UserRecord) -> Result<(), StoreError> {
            self.err()
        }

        fn put_entry(&self, _: EntryRecord) -> Result<(), StoreError> {
            self.err()
        }

        fn delete_entry(&self, _: &str, _: i64) -> Result<(), StoreError> {
            self.err()
        }

        fn query_user_range(
            &self,
            _: &str,
            _: RangeInclusive<i64>,
            _: Option<usize>,
            _: bool,
        ) -> Result<Vec<EntryRecord>, StoreError> {
            self.err()
        }

        fn scan_users(&self) -> Result<Vec<UserRecord>, StoreError> {
            self.err()
        }

        fn scan_entries(&self) -> Result<Vec<EntryRecord>, StoreError> {
            self.err()
        }

        fn ping(&self) -> Result<(), StoreError> {
            self.err()
        }
    }
}
