use super::*;
use crate::storage::KeyValueStore;
use tempfile::TempDir;

#[test]
fn test_in_memory_starts_empty() {
    let db = Database::in_memory().unwrap();
    assert!(!db.is_encrypted());
    assert!(db.keys().unwrap().is_empty());
    assert_eq!(db.get("missing").unwrap(), None);
}

#[test]
fn test_set_get_overwrite() {
    let db = Database::in_memory().unwrap();
    db.set("pfc_user_profile", "Rahim").unwrap();
    assert_eq!(db.get("pfc_user_profile").unwrap().as_deref(), Some("Rahim"));

    db.set("pfc_user_profile", "Karim").unwrap();
    assert_eq!(db.get("pfc_user_profile").unwrap().as_deref(), Some("Karim"));
    assert_eq!(db.keys().unwrap(), vec!["pfc_user_profile".to_string()]);
}

#[test]
fn test_remove_and_clear() {
    let db = Database::in_memory().unwrap();
    db.set("a", "1").unwrap();
    db.set("b", "2").unwrap();

    db.remove("a").unwrap();
    assert_eq!(db.get("a").unwrap(), None);
    // removing twice is fine
    db.remove("a").unwrap();

    db.clear().unwrap();
    assert!(db.keys().unwrap().is_empty());
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pfc.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new_unencrypted(path).unwrap();
        db.set("pfc_financial_data", "[]").unwrap();
    }

    let db = Database::new_unencrypted(path).unwrap();
    assert_eq!(db.get("pfc_financial_data").unwrap().as_deref(), Some("[]"));
    assert_eq!(db.path(), path);
}

#[test]
fn test_encrypted_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secret.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new_with_key(path, Some("correct horse")).unwrap();
        assert!(db.is_encrypted());
        db.set("pfc_user_profile", "Salma").unwrap();
    }

    let db = Database::new_with_key(path, Some("correct horse")).unwrap();
    assert_eq!(db.get("pfc_user_profile").unwrap().as_deref(), Some("Salma"));
}

#[test]
fn test_wrong_passphrase_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secret.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new_with_key(path, Some("right")).unwrap();
        db.set("k", "v").unwrap();
    }

    assert!(Database::new_with_key(path, Some("wrong")).is_err());
}

#[test]
fn test_derive_key_is_stable() {
    let a = derive_key("passphrase").unwrap();
    let b = derive_key("passphrase").unwrap();
    let c = derive_key("other").unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
}
