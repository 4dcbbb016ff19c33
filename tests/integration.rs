use std::str::from_utf8;

use rust_decimal::Decimal;

use passbook::account::{Account, AccountKind};
use passbook::bin_utils::Service;
use passbook::storage::Registry;
use passbook::storage::file_storage::FileStorage;
use passbook::storage::in_memory_storage::InMemoryStorage;
use passbook::store::LedgerStore;

fn seeded_store() -> LedgerStore<InMemoryStorage> {
    let mut registry = Registry::new();
    registry.insert(
        "10001".to_owned(),
        Account::restore(
            "10001".to_owned(),
            "1234".to_owned(),
            AccountKind::Personal,
            Decimal::from(1000),
            Decimal::ZERO,
            Vec::new(),
        ),
    );
    registry.insert(
        "10002".to_owned(),
        Account::restore(
            "10002".to_owned(),
            "5678".to_owned(),
            AccountKind::Business,
            Decimal::from(200),
            Decimal::ZERO,
            Vec::new(),
        ),
    );
    LedgerStore::open(InMemoryStorage::seeded(registry)).unwrap()
}

#[test]
fn scripted_session_covers_the_operation_set() {
    const SESSION: &str = "\
2 10001 1234
3 10001 1234 500
5 10001 1234 10002 400
6 10001 1234
8 10001 1234 100
9 10001 1234
4 10001 9999
5 10001 1234 77777 10
0
";

    let mut output = Vec::new();
    let service = Service {
        store: seeded_store(),
        input: SESSION.as_bytes(),
        output: &mut output,
    };
    service.run().unwrap();

    let text = from_utf8(&output).unwrap();
    assert!(text.contains("Welcome Personal account 10001"));
    assert!(text.contains("Added 500. New balance: 1500"));
    assert!(text.contains("Sent 400 to 10002"));
    assert!(text.contains("Balance: 1100\nPhone credit: 0"));
    assert!(text.contains("Added 100 phone credit. Phone credit: 100"));
    // history, in insertion order
    assert!(text.contains("Added 500\nTook 400\nSent 400 to 10002\nPhone +100"));
    assert!(text.contains("Error: Wrong password for account 10001"));
    assert!(text.contains("Error: Account 77777 not found"));
}

#[test]
fn counterparty_state_is_visible_in_the_same_session() {
    const SESSION: &str = "\
5 10001 1234 10002 400
6 10002 5678
9 10002 5678
0
";

    let mut output = Vec::new();
    let service = Service {
        store: seeded_store(),
        input: SESSION.as_bytes(),
        output: &mut output,
    };
    service.run().unwrap();

    let text = from_utf8(&output).unwrap();
    assert!(text.contains("Balance: 600\nPhone credit: 0"));
    assert!(text.contains("Added 400\nGot 400 from 10001"));
}

#[test]
fn blank_and_unknown_input_lines_do_not_stop_the_session() {
    const SESSION: &str = "\

hello
6 10001 1234
0
";

    let mut output = Vec::new();
    let service = Service {
        store: seeded_store(),
        input: SESSION.as_bytes(),
        output: &mut output,
    };
    service.run().unwrap();

    let text = from_utf8(&output).unwrap();
    assert!(text.contains("Error: Unknown operation code `hello`"));
    assert!(text.contains("Balance: 1000\nPhone credit: 0"));
}

#[test]
fn ledger_state_survives_a_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.txt");

    let mut store = LedgerStore::open(FileStorage::new(path.clone())).unwrap();
    let (number, password) = store.create_account(AccountKind::Personal).unwrap();
    store
        .dispatch("3", &[number.clone(), password.clone(), "500".to_owned()])
        .unwrap();
    drop(store);

    let mut reopened = LedgerStore::open(FileStorage::new(path)).unwrap();
    let balance = reopened
        .dispatch("6", &[number.clone(), password.clone()])
        .unwrap();
    assert_eq!(balance, "Balance: 500\nPhone credit: 0");
    let history = reopened.dispatch("9", &[number, password]).unwrap();
    assert_eq!(history, "Added 500");
}
