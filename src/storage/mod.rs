use std::collections::HashMap;

use thiserror::Error;

use crate::account::{Account, AccountNumber};

pub mod file_storage;
pub mod in_memory_storage;

pub type Registry = HashMap<AccountNumber, Account>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access the ledger file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed account record: {0}")]
    Malformed(#[from] csv::Error),
    #[error("Account record with an empty number")]
    EmptyNumber,
    #[error("Duplicate account number `{0}` in the ledger file")]
    DuplicateNumber(AccountNumber),
}

/// Persistence backend for the account registry. Every mutating store
/// operation saves the whole registry before reporting success.
pub trait Storage {
    fn load(&self) -> Result<Registry, StorageError>;
    fn save(&mut self, registry: &Registry) -> Result<(), StorageError>;
}
