use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::{AccountKind, AccountNumber};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown operation code `{0}`")]
    UnknownOperation(String),
    #[error("Operation {op} expects {expected} argument(s), got {got}")]
    WrongArgumentCount {
        op: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Amount must be a positive number, got `{0}`")]
    InvalidAmount(String),
    #[error("Account kind must be Personal or Business, got `{0}`")]
    InvalidAccountKind(String),
}

/// A fully validated ledger operation. Amounts are parsed and checked
/// positive here, once, at the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateAccount {
        kind: AccountKind,
    },
    Login {
        number: AccountNumber,
        password: String,
    },
    Deposit {
        number: AccountNumber,
        password: String,
        amount: Decimal,
    },
    Withdraw {
        number: AccountNumber,
        password: String,
        amount: Decimal,
    },
    Transfer {
        number: AccountNumber,
        password: String,
        to: AccountNumber,
        amount: Decimal,
    },
    Balance {
        number: AccountNumber,
        password: String,
    },
    DeleteAccount {
        number: AccountNumber,
        password: String,
    },
    TopUp {
        number: AccountNumber,
        password: String,
        amount: Decimal,
    },
    History {
        number: AccountNumber,
        password: String,
    },
}

impl Operation {
    pub fn parse(code: &str, args: &[String]) -> Result<Self, CommandError> {
        match code.trim() {
            "1" => {
                let [kind] = expect_args("create", args)?;
                Ok(Self::CreateAccount {
                    kind: parse_kind(kind)?,
                })
            }
            "2" => {
                let [number, password] = expect_args("login", args)?;
                Ok(Self::Login {
                    number: number.clone(),
                    password: password.clone(),
                })
            }
            "3" => {
                let [number, password, amount] = expect_args("deposit", args)?;
                Ok(Self::Deposit {
                    number: number.clone(),
                    password: password.clone(),
                    amount: parse_amount(amount)?,
                })
            }
            "4" => {
                let [number, password, amount] = expect_args("withdraw", args)?;
                Ok(Self::Withdraw {
                    number: number.clone(),
                    password: password.clone(),
                    amount: parse_amount(amount)?,
                })
            }
            "5" => {
                let [number, password, to, amount] = expect_args("transfer", args)?;
                Ok(Self::Transfer {
                    number: number.clone(),
                    password: password.clone(),
                    to: to.clone(),
                    amount: parse_amount(amount)?,
                })
            }
            "6" => {
                let [number, password] = expect_args("balance", args)?;
                Ok(Self::Balance {
                    number: number.clone(),
                    password: password.clone(),
                })
            }
            "7" => {
                let [number, password] = expect_args("delete", args)?;
                Ok(Self::DeleteAccount {
                    number: number.clone(),
                    password: password.clone(),
                })
            }
            "8" => {
                let [number, password, amount] = expect_args("top-up", args)?;
                Ok(Self::TopUp {
                    number: number.clone(),
                    password: password.clone(),
                    amount: parse_amount(amount)?,
                })
            }
            "9" => {
                let [number, password] = expect_args("history", args)?;
                Ok(Self::History {
                    number: number.clone(),
                    password: password.clone(),
                })
            }
            other => Err(CommandError::UnknownOperation(other.to_owned())),
        }
    }
}

fn expect_args<'a, const N: usize>(
    op: &'static str,
    args: &'a [String],
) -> Result<&'a [String; N], CommandError> {
    args.try_into()
        .map_err(|_| CommandError::WrongArgumentCount {
            op,
            expected: N,
            got: args.len(),
        })
}

fn parse_kind(raw: &str) -> Result<AccountKind, CommandError> {
    match raw {
        "Personal" => Ok(AccountKind::Personal),
        "Business" => Ok(AccountKind::Business),
        other => Err(CommandError::InvalidAccountKind(other.to_owned())),
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    let amount: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| CommandError::InvalidAmount(raw.to_owned()))?;
    if amount <= Decimal::ZERO {
        return Err(CommandError::InvalidAmount(raw.to_owned()));
    }
    Ok(amount)
}
