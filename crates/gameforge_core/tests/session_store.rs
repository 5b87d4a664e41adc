use gameforge_core::{
    KeyValueStore, MemoryKeyValueStore, SessionError, SessionStore, SqliteKeyValueStore,
    AUTH_STORAGE_KEY,
};

#[test]
fn login_trims_and_persists_credentials() {
    let gateway = MemoryKeyValueStore::new();
    let sessions = SessionStore::new(&gateway);

    let session = sessions.login("  steve ", " ghp_token\n").unwrap();
    assert_eq!(session.username, "steve");
    assert_eq!(session.github_token, "ghp_token");

    let raw = gateway.get(AUTH_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["username"], "steve");
    assert_eq!(value["githubToken"], "ghp_token");

    assert_eq!(sessions.load(), Some(session));
}

#[test]
fn blank_credentials_are_rejected_without_writing() {
    let gateway = MemoryKeyValueStore::new();
    let sessions = SessionStore::new(&gateway);

    assert!(matches!(
        sessions.login("   ", "token"),
        Err(SessionError::BlankUsername)
    ));
    assert!(matches!(
        sessions.login("steve", ""),
        Err(SessionError::BlankToken)
    ));
    assert!(gateway.is_empty());
    assert!(sessions.load().is_none());
}

#[test]
fn logout_clears_session_and_is_repeatable() {
    let sessions = SessionStore::new(MemoryKeyValueStore::new());
    sessions.login("alex", "token").unwrap();

    sessions.logout().unwrap();
    assert!(sessions.load().is_none());
    sessions.logout().unwrap();
}

#[test]
fn corrupt_or_incomplete_session_reads_as_logged_out() {
    let corrupt = SessionStore::new(MemoryKeyValueStore::with_entry(AUTH_STORAGE_KEY, "nope"));
    assert!(corrupt.load().is_none());

    let incomplete = SessionStore::new(MemoryKeyValueStore::with_entry(
        AUTH_STORAGE_KEY,
        r#"{"username": "steve", "githubToken": "  "}"#,
    ));
    assert!(incomplete.load().is_none());
}

#[test]
fn session_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gameforge.sqlite3");

    SessionStore::new(SqliteKeyValueStore::open(&path).unwrap())
        .login("steve", "ghp_token")
        .unwrap();

    let reopened = SessionStore::new(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(reopened.load().map(|session| session.username).as_deref(), Some("steve"));
}
