use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type AccountNumber = String;

/// Informational only, transactional behavior does not vary by kind.
/// The variant names are also the on-disk literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountKind {
    Personal,
    Business,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Personal => f.write_str("Personal"),
            AccountKind::Business => f.write_str("Business"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Amount must be positive")]
    InvalidAmount,
    #[error("Not enough funds")]
    InsufficientFunds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountEvent {
    Deposited {
        amount: Decimal,
    },
    Withdrawn {
        amount: Decimal,
    },
    TransferredOut {
        amount: Decimal,
        to: AccountNumber,
    },
    TransferredIn {
        amount: Decimal,
        from: AccountNumber,
    },
    PhoneToppedUp {
        amount: Decimal,
    },
}

#[derive(Debug, Clone)]
pub struct Account {
    number: AccountNumber,
    password: String,
    kind: AccountKind,
    balance: Decimal,
    phone_credit: Decimal,
    history: Vec<String>,
}

impl Account {
    pub fn new(number: AccountNumber, password: String, kind: AccountKind) -> Self {
        Self {
            number,
            password,
            kind,
            balance: Decimal::ZERO,
            phone_credit: Decimal::ZERO,
            history: Vec::new(),
        }
    }

    /// Rebuilds an account from persisted state.
    pub fn restore(
        number: AccountNumber,
        password: String,
        kind: AccountKind,
        balance: Decimal,
        phone_credit: Decimal,
        history: Vec<String>,
    ) -> Self {
        Self {
            number,
            password,
            kind,
            balance,
            phone_credit,
            history,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn phone_credit(&self) -> Decimal {
        self.phone_credit
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        Ok(AccountEvent::Deposited { amount })
    }

    pub fn handle_withdraw(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::InvalidAmount);
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }
        Ok(AccountEvent::Withdrawn { amount })
    }

    /// Validates the source side of a transfer and returns the event pair.
    /// The destination side cannot fail once the amount is validated here,
    /// so applying both events keeps the pair atomic.
    pub fn handle_transfer(
        &self,
        amount: Decimal,
        to: &str,
    ) -> Result<(AccountEvent, AccountEvent), AccountError> {
        self.handle_withdraw(amount)?;
        Ok((
            AccountEvent::TransferredOut {
                amount,
                to: to.to_owned(),
            },
            AccountEvent::TransferredIn {
                amount,
                from: self.number.clone(),
            },
        ))
    }

    pub fn handle_top_up(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        self.handle_withdraw(amount)?;
        Ok(AccountEvent::PhoneToppedUp { amount })
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        match event {
            AccountEvent::Deposited { amount } => {
                self.balance += *amount;
                self.history.push(format!("Added {amount}"));
            }
            AccountEvent::Withdrawn { amount } => {
                self.balance -= *amount;
                self.history.push(format!("Took {amount}"));
            }
            AccountEvent::TransferredOut { amount, to } => {
                self.balance -= *amount;
                self.history.push(format!("Took {amount}"));
                self.history.push(format!("Sent {amount} to {to}"));
            }
            AccountEvent::TransferredIn { amount, from } => {
                self.balance += *amount;
                self.history.push(format!("Added {amount}"));
                self.history.push(format!("Got {amount} from {from}"));
            }
            AccountEvent::PhoneToppedUp { amount } => {
                self.balance -= *amount;
                self.phone_credit += *amount;
                self.history.push(format!("Phone +{amount}"));
            }
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let event = self.handle_deposit(amount)?;
        self.apply(&event);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let event = self.handle_withdraw(amount)?;
        self.apply(&event);
        Ok(())
    }

    pub fn top_up_phone_credit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let event = self.handle_top_up(amount)?;
        self.apply(&event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personal(balance: u32) -> Account {
        Account::restore(
            "10001".to_owned(),
            "1234".to_owned(),
            AccountKind::Personal,
            Decimal::from(balance),
            Decimal::ZERO,
            Vec::new(),
        )
    }

    #[test]
    fn deposit_increases_balance_and_logs() {
        let mut acc = Account::new("10001".to_owned(), "1234".to_owned(), AccountKind::Personal);
        acc.deposit(Decimal::from(500)).unwrap();
        assert_eq!(acc.balance(), Decimal::from(500));
        assert_eq!(acc.history(), ["Added 500"]);

        acc.deposit(Decimal::from(300)).unwrap();
        assert_eq!(acc.balance(), Decimal::from(800));
        assert_eq!(acc.history(), ["Added 500", "Added 300"]);
    }

    #[test]
    fn non_positive_deposit_leaves_account_unchanged() {
        let mut acc = personal(100);
        for amount in [Decimal::ZERO, Decimal::from(-5)] {
            let err = acc.deposit(amount).unwrap_err();
            assert!(matches!(err, AccountError::InvalidAmount));
        }
        assert_eq!(acc.balance(), Decimal::from(100));
        assert_eq!(acc.phone_credit(), Decimal::ZERO);
        assert!(acc.history().is_empty());
    }

    #[test]
    fn deposit_then_withdraw_restores_balance() {
        let mut acc = personal(250);
        acc.deposit(Decimal::from(75)).unwrap();
        acc.withdraw(Decimal::from(75)).unwrap();
        assert_eq!(acc.balance(), Decimal::from(250));
        assert_eq!(acc.history(), ["Added 75", "Took 75"]);
    }

    #[test]
    fn overdraw_fails_and_balance_is_unchanged() {
        let mut acc = personal(100);
        let err = acc.withdraw(Decimal::from(150)).unwrap_err();
        assert!(matches!(err, AccountError::InsufficientFunds));
        assert_eq!(err.to_string(), "Not enough funds");
        assert_eq!(acc.balance(), Decimal::from(100));
        assert!(acc.history().is_empty());
    }

    #[test]
    fn non_positive_withdraw_is_invalid() {
        let mut acc = personal(100);
        assert!(matches!(
            acc.withdraw(Decimal::ZERO),
            Err(AccountError::InvalidAmount)
        ));
        assert_eq!(acc.balance(), Decimal::from(100));
    }

    #[test]
    fn top_up_moves_funds_between_balances() {
        let mut acc = personal(100);
        let before = acc.balance() + acc.phone_credit();
        acc.top_up_phone_credit(Decimal::from(30)).unwrap();
        assert_eq!(acc.balance(), Decimal::from(70));
        assert_eq!(acc.phone_credit(), Decimal::from(30));
        assert_eq!(acc.balance() + acc.phone_credit(), before);
        // a single combined entry
        assert_eq!(acc.history(), ["Phone +30"]);
    }

    #[test]
    fn top_up_beyond_balance_fails() {
        let mut acc = personal(10);
        let err = acc.top_up_phone_credit(Decimal::from(30)).unwrap_err();
        assert!(matches!(err, AccountError::InsufficientFunds));
        assert_eq!(acc.balance(), Decimal::from(10));
        assert_eq!(acc.phone_credit(), Decimal::ZERO);
    }

    #[test]
    fn transfer_events_apply_to_both_sides() {
        let mut src = personal(1000);
        let mut dst = Account::restore(
            "10002".to_owned(),
            "5678".to_owned(),
            AccountKind::Business,
            Decimal::from(200),
            Decimal::ZERO,
            Vec::new(),
        );

        let (out_event, in_event) = src
            .handle_transfer(Decimal::from(400), dst.number())
            .unwrap();
        src.apply(&out_event);
        dst.apply(&in_event);

        assert_eq!(src.balance(), Decimal::from(600));
        assert_eq!(dst.balance(), Decimal::from(600));
        assert_eq!(src.history(), ["Took 400", "Sent 400 to 10002"]);
        assert_eq!(dst.history(), ["Added 400", "Got 400 from 10001"]);
    }

    #[test]
    fn transfer_validation_creates_no_events_without_funds() {
        let src = personal(100);
        let err = src.handle_transfer(Decimal::from(150), "10002").unwrap_err();
        assert!(matches!(err, AccountError::InsufficientFunds));
        assert_eq!(src.balance(), Decimal::from(100));
    }
}
