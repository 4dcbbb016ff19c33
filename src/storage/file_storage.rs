use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::PathBuf;

use csv::Trim;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Registry, Storage, StorageError};
use crate::account::{Account, AccountKind};

/// One row per account: `number|password|kind|balance|phone_credit|history`
/// where `history` is the log entries joined by `;`. The history field may
/// be absent or empty for accounts without transactions.
#[derive(Debug, Serialize, Deserialize)]
struct AccountRecord {
    number: String,
    password: String,
    kind: AccountKind,
    balance: Decimal,
    phone_credit: Decimal,
    #[serde(default)]
    history: Option<String>,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            number: account.number().to_owned(),
            password: account.password().to_owned(),
            kind: account.kind(),
            balance: account.balance(),
            phone_credit: account.phone_credit(),
            history: Some(account.history().join(";")),
        }
    }
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        let history = record
            .history
            .filter(|joined| !joined.is_empty())
            .map(|joined| joined.split(';').map(str::to_owned).collect())
            .unwrap_or_default();
        Account::restore(
            record.number,
            record.password,
            record.kind,
            record.balance,
            record.phone_credit,
            history,
        )
    }
}

pub fn read_registry<R: Read>(source: R) -> Result<Registry, StorageError> {
    let reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut registry = Registry::new();
    for row in reader.into_deserialize::<AccountRecord>() {
        let record = row?;
        if record.number.is_empty() {
            return Err(StorageError::EmptyNumber);
        }
        let number = record.number.clone();
        if registry.insert(number.clone(), Account::from(record)).is_some() {
            return Err(StorageError::DuplicateNumber(number));
        }
    }
    Ok(registry)
}

pub fn write_registry<W: Write>(output: W, registry: &Registry) -> Result<(), StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .from_writer(output);
    for account in registry.values() {
        writer.serialize(AccountRecord::from(account))?;
    }
    // Ensure all rows reach the underlying writer
    writer.flush()?;
    Ok(())
}

/// Flat-file backend. Every save rewrites the whole file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Registry, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            // A missing file is a fresh ledger, not an error
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Registry::new()),
            Err(err) => return Err(err.into()),
        };
        read_registry(file)
    }

    fn save(&mut self, registry: &Registry) -> Result<(), StorageError> {
        let file = File::create(&self.path)?;
        write_registry(file, registry)
    }
}
