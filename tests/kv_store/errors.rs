//! KeyValueStore Error Handling Tests
//!
//! Tests for rejected writes, invalid keys and corrupt entries.

use crate::*;
use serde::Deserialize;
use serde_json::json;
use stowage::{Error, Key, UnavailableReason};

// =============================================================================
// STORAGE UNAVAILABLE TESTS
// =============================================================================

#[test]
fn test_quota_exceeded_rejects_write() {
    // "big" (3 bytes) + "\"xxxxxxxx\"" (10 bytes) = 13 > 12
    let shell = Shell::builder().quota_bytes(12).ephemeral().unwrap();

    let err: Error = shell.store().create_item("big", &"xxxxxxxx").unwrap_err().into();
    match err {
        Error::StorageUnavailable(UnavailableReason::QuotaExceeded { limit, requested }) => {
            assert_eq!(limit, 12);
            assert_eq!(requested, 13);
        }
        other => panic!("expected QuotaExceeded, got {:?}", other),
    }
}

#[test]
fn test_rejected_write_leaves_previous_value() {
    let shell = Shell::builder().quota_bytes(16).ephemeral().unwrap();
    let store = shell.store();

    store.create_item("k", &"small").unwrap();
    let err = store.create_item("k", &"far too large to fit").unwrap_err();
    assert!(err.is_storage_unavailable());

    assert_eq!(store.get_item::<String>("k").unwrap(), Some("small".to_string()));
}

#[test]
fn test_overwrite_frees_old_bytes() {
    // 1 + 3 bytes per entry; two overwrites must not double count
    let shell = Shell::builder().quota_bytes(4).ephemeral().unwrap();
    let store = shell.store();

    store.create_item("k", &100).unwrap();
    store.create_item("k", &200).unwrap();
    assert_eq!(store.backend().used_bytes(), 4);
}

#[test]
fn test_disabled_storage() {
    let shell = Shell::builder().quota_bytes(0).ephemeral().unwrap();

    let err: Error = shell.store().create_item("k", &1).unwrap_err().into();
    assert!(matches!(
        err,
        Error::StorageUnavailable(UnavailableReason::Disabled)
    ));
    assert_eq!(shell.store().get_value("k").unwrap(), None);
}

#[test]
fn test_read_only_storage() {
    let shell = Shell::builder().read_only().ephemeral().unwrap();

    let err: Error = shell.store().create_item("k", &1).unwrap_err().into();
    assert!(matches!(
        err,
        Error::StorageUnavailable(UnavailableReason::ReadOnly)
    ));
}

#[test]
fn test_read_only_file_store_reads_existing_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    {
        let shell = Shell::open(&path).unwrap();
        shell.store().create_item("kept", &json!([1, 2])).unwrap();
        shell.flush().unwrap();
    }

    let shell = Shell::builder().path(&path).read_only().open().unwrap();
    assert_eq!(shell.store().get_value("kept").unwrap(), Some(json!([1, 2])));
    assert!(shell.store().create_item("new", &1).unwrap_err().is_storage_unavailable());
}

// =============================================================================
// SERIALIZATION TESTS
// =============================================================================

#[derive(Debug, serde::Serialize, Deserialize)]
struct Reading {
    celsius: f64,
}

#[test]
fn test_non_finite_float_is_serialization_error() {
    for (backend, store, _dir) in all_stores() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err: Error = store
                .create_item("r", &Reading { celsius: bad })
                .unwrap_err()
                .into();
            assert!(matches!(err, Error::Serialization(_)), "{} on {}", bad, backend);
        }

        assert_eq!(store.get_value("r").unwrap(), None, "backend {}", backend);
        assert_eq!(store.backend().used_bytes(), 0);
    }
}

// =============================================================================
// INVALID KEY TESTS
// =============================================================================

#[test]
fn test_invalid_keys_rejected() {
    let store = create_store();
    let long = "k".repeat(stowage_core::MAX_KEY_LEN + 1);

    for key in ["", "nul\0byte", long.as_str()] {
        let err: Error = store.create_item(key, &1).unwrap_err().into();
        assert!(err.is_invalid_key(), "key {:?} should be rejected", key);

        let err: Error = store.get_value(key).unwrap_err().into();
        assert!(err.is_invalid_key());
    }
}

#[test]
fn test_max_length_key_accepted() {
    let store = create_store();
    let key = "k".repeat(stowage_core::MAX_KEY_LEN);

    store.create_item(&key, &true).unwrap();
    assert_eq!(store.get_item::<bool>(&key).unwrap(), Some(true));
}

// =============================================================================
// DESERIALIZATION TESTS
// =============================================================================

#[test]
fn test_corrupt_entry_reports_deserialization_error() {
    for (backend, store, _dir) in all_stores() {
        let key = Key::new("broken").unwrap();
        raw_backend(&store)
            .set(store.namespace(), &key, "{not json".to_string())
            .unwrap();

        let err: Error = store.get_value("broken").unwrap_err().into();
        match err {
            Error::Deserialization { key, .. } => assert_eq!(key, "broken", "backend {}", backend),
            other => panic!("expected Deserialization on {}, got {:?}", backend, other),
        }
    }
}

#[test]
fn test_type_mismatch_reports_deserialization_error() {
    #[derive(Debug, Deserialize)]
    struct Point {
        #[allow(dead_code)]
        x: i32,
    }

    let store = create_store();
    store.create_item("p", &json!({"x": "not a number"})).unwrap();

    let err = store.get_item::<Point>("p").unwrap_err();
    assert!(err.is_deserialization());
}

#[test]
fn test_corrupt_entry_does_not_affect_others() {
    let store = create_store();
    store.create_item("good", &json!("fine")).unwrap();
    raw_backend(&store)
        .set(store.namespace(), &Key::new("bad").unwrap(), "][".to_string())
        .unwrap();

    assert!(store.get_value("bad").is_err());
    assert_eq!(store.get_value("good").unwrap(), Some(json!("fine")));
}
