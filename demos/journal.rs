use journal_censor::journal::{EntryRequest, Journal, JournalConfig, MemoryStore};

fn main() {
    let journal = Journal::new(MemoryStore::new(), JournalConfig::from_env());

    let req: EntryRequest = serde_json::from_str(
        r#"{"name": "ann", "password": "pw", "text": "Rainy day, NIGGA", "ts": "2025-10-18T02:00:00Z"}"#,
    )
    .unwrap();
    match journal.submit_entry(&req) {
        Ok(res) => println!("{}", serde_json::to_string(&res).unwrap()),
        Err(e) => println!("{} {}", e.status(), serde_json::to_string(&e.to_body()).unwrap()),
    }

    let entries = journal.user_entries("ann").unwrap();
    println!("{}", serde_json::to_string_pretty(&entries).unwrap());
}
