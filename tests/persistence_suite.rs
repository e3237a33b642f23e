use bizledger::{
    errors::LedgerError,
    ledger::{Business, Transaction, TransactionKind},
    storage::{JsonStore, LedgerStore, LEDGER_SCHEMA_VERSION},
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn sample_transaction(amount: f64) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
        Business::new("MotorWash"),
        TransactionKind::Income,
        "Wash",
        "sedan, full wash",
        amount,
    )
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn missing_file_loads_as_empty_ledger() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(temp.path()).unwrap();
    assert!(store.load().expect("empty load").is_empty());
}

#[test]
fn save_writes_versioned_envelope() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(temp.path()).unwrap();
    store.save(&[sample_transaction(150.0)]).expect("save");

    let raw = fs::read_to_string(store.path()).expect("read ledger file");
    let value: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["schema_version"], json!(LEDGER_SCHEMA_VERSION));
    assert_eq!(value["transactions"].as_array().unwrap().len(), 1);

    let loaded = store.load().expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].amount, 150.0);
}

#[test]
fn legacy_bare_array_still_loads() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(temp.path()).unwrap();
    let legacy = serde_json::to_string(&vec![sample_transaction(75.0)]).unwrap();
    fs::write(store.path(), legacy).unwrap();

    let loaded = store.load().expect("legacy load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].category, "Wash");
}

#[test]
fn legacy_row_with_bad_date_loads_undated() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(temp.path()).unwrap();
    let blob = json!([{
        "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        "date": "03/10/2024",
        "business": "MotorWash",
        "type": "Income",
        "category": "Wash",
        "description": "",
        "amount": 40.0
    }]);
    fs::write(store.path(), blob.to_string()).unwrap();

    let loaded = store.load().expect("tolerant load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].date, None);
}

#[test]
fn newer_schema_version_is_refused() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(temp.path()).unwrap();
    let blob = json!({
        "schema_version": LEDGER_SCHEMA_VERSION + 1,
        "transactions": []
    });
    fs::write(store.path(), blob.to_string()).unwrap();

    let err = store.load().expect_err("newer version must not load");
    assert!(matches!(err, LedgerError::Storage(_)));
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let store = JsonStore::new(temp.path()).unwrap();
    store.save(&[sample_transaction(42.0)]).expect("initial save");
    let original = fs::read_to_string(store.path()).expect("read original file");

    // Create a directory that collides with the temp file name to force the
    // write to fail before the rename.
    let tmp = tmp_path_for(store.path());
    fs::create_dir_all(&tmp).unwrap();

    let result = store.save(&[sample_transaction(99.0)]);
    assert!(
        result.is_err(),
        "expected save to fail when temp path is a directory"
    );

    let current = fs::read_to_string(store.path()).expect("read after failure");
    assert_eq!(
        current, original,
        "atomic save failure must not corrupt the original file"
    );

    let _ = fs::remove_dir_all(&tmp);
}
