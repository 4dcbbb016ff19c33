use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::account::{Account, AccountError, AccountKind, AccountNumber};
use crate::command::{CommandError, Operation};
use crate::storage::{Registry, Storage, StorageError};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Account {0} not found")]
    AccountNotFound(AccountNumber),
    #[error("Wrong password for account {0}")]
    InvalidCredentials(AccountNumber),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the account registry and a persistence backend. All mutating
/// operations save the registry before reporting success, so the file
/// and the in-memory state stay in sync.
pub struct LedgerStore<S> {
    registry: Registry,
    storage: S,
}

impl<S: Storage> LedgerStore<S> {
    pub fn open(storage: S) -> Result<Self, LedgerError> {
        let registry = storage.load()?;
        debug!(accounts = registry.len(), "registry loaded");
        Ok(Self { registry, storage })
    }

    pub fn accounts(&self) -> &Registry {
        &self.registry
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Registers a new account under a fresh number and returns the
    /// generated credentials.
    pub fn create_account(
        &mut self,
        kind: AccountKind,
    ) -> Result<(AccountNumber, String), LedgerError> {
        let mut rng = rand::thread_rng();
        let number = loop {
            let candidate = rng.gen_range(10_000..=99_999u32).to_string();
            if !self.registry.contains_key(&candidate) {
                break candidate;
            }
        };
        let password = rng.gen_range(1_000..=9_999u32).to_string();

        let account = Account::new(number.clone(), password.clone(), kind);
        self.registry.insert(number.clone(), account);
        self.persist()?;
        info!(%number, %kind, "account created");
        Ok((number, password))
    }

    pub fn authenticate(&self, number: &str, password: &str) -> Result<&Account, LedgerError> {
        let account = self
            .registry
            .get(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_owned()))?;
        if account.password() != password {
            return Err(LedgerError::InvalidCredentials(number.to_owned()));
        }
        Ok(account)
    }

    /// Callers must authenticate first; the registry does not re-check
    /// credentials here.
    pub fn delete_account(&mut self, number: &str) -> Result<(), LedgerError> {
        if self.registry.remove(number).is_none() {
            return Err(LedgerError::AccountNotFound(number.to_owned()));
        }
        self.persist()?;
        info!(%number, "account deleted");
        Ok(())
    }

    /// The single entry point front-ends call with an operation code and
    /// positional arguments. Branches that need authentication perform it
    /// first; mutating branches persist the registry before returning.
    pub fn dispatch(&mut self, code: &str, args: &[String]) -> Result<String, LedgerError> {
        match Operation::parse(code, args)? {
            Operation::CreateAccount { kind } => {
                let (number, password) = self.create_account(kind)?;
                Ok(format!(
                    "New {kind} account:\nNumber: {number}\nPassword: {password}"
                ))
            }
            Operation::Login { number, password } => {
                let account = self.authenticate(&number, &password)?;
                Ok(format!(
                    "Welcome {} account {}",
                    account.kind(),
                    account.number()
                ))
            }
            Operation::Deposit {
                number,
                password,
                amount,
            } => {
                self.authenticate(&number, &password)?;
                let account = self.account_mut(&number)?;
                account.deposit(amount)?;
                let balance = account.balance();
                self.persist()?;
                Ok(format!("Added {amount}. New balance: {balance}"))
            }
            Operation::Withdraw {
                number,
                password,
                amount,
            } => {
                self.authenticate(&number, &password)?;
                let account = self.account_mut(&number)?;
                account.withdraw(amount)?;
                let balance = account.balance();
                self.persist()?;
                Ok(format!("Withdrew {amount}. New balance: {balance}"))
            }
            Operation::Transfer {
                number,
                password,
                to,
                amount,
            } => {
                self.authenticate(&number, &password)?;
                // The destination must exist before any source-side mutation
                if !self.registry.contains_key(&to) {
                    return Err(LedgerError::AccountNotFound(to));
                }
                let source = self
                    .registry
                    .get(&number)
                    .ok_or_else(|| LedgerError::AccountNotFound(number.clone()))?;
                let (out_event, in_event) = source.handle_transfer(amount, &to)?;
                self.account_mut(&number)?.apply(&out_event);
                self.account_mut(&to)?.apply(&in_event);
                self.persist()?;
                Ok(format!("Sent {amount} to {to}"))
            }
            Operation::Balance { number, password } => {
                let account = self.authenticate(&number, &password)?;
                Ok(format!(
                    "Balance: {}\nPhone credit: {}",
                    account.balance(),
                    account.phone_credit()
                ))
            }
            Operation::DeleteAccount { number, password } => {
                self.authenticate(&number, &password)?;
                self.delete_account(&number)?;
                Ok(format!("Account {number} deleted"))
            }
            Operation::TopUp {
                number,
                password,
                amount,
            } => {
                self.authenticate(&number, &password)?;
                let account = self.account_mut(&number)?;
                account.top_up_phone_credit(amount)?;
                let credit = account.phone_credit();
                self.persist()?;
                Ok(format!("Added {amount} phone credit. Phone credit: {credit}"))
            }
            Operation::History { number, password } => {
                let account = self.authenticate(&number, &password)?;
                if account.history().is_empty() {
                    Ok("No transactions".to_owned())
                } else {
                    Ok(account.history().join("\n"))
                }
            }
        }
    }

    fn account_mut(&mut self, number: &str) -> Result<&mut Account, LedgerError> {
        self.registry
            .get_mut(number)
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_owned()))
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        self.storage.save(&self.registry)?;
        debug!(accounts = self.registry.len(), "registry persisted");
        Ok(())
    }
}
