//! Line-mode front-end over the dispatch entry point. This module could
//! be a separate crate on its own, but keeping it in the library lets the
//! integration tests script whole sessions.

use std::io::{BufRead, BufReader, Read, Write};

use anyhow::Result;

use crate::storage::Storage;
use crate::store::LedgerStore;

const MENU: &str = "Passbook ledger
1 <kind>                             new account (Personal or Business)
2 <number> <password>                login
3 <number> <password> <amount>       deposit
4 <number> <password> <amount>       withdraw
5 <number> <password> <to> <amount>  transfer
6 <number> <password>                balance
7 <number> <password>                delete account
8 <number> <password> <amount>       phone top-up
9 <number> <password>                history
0                                    exit";

/// Reads whitespace-separated `code arg...` lines and prints the receipt
/// or the failure for each. The session state machine (who is logged in)
/// is the caller's concern; every line carries full credentials.
pub struct Service<'w, S, R, W: 'w> {
    pub store: LedgerStore<S>,
    pub input: R,
    pub output: &'w mut W,
}

impl<'w, S, R, W> Service<'w, S, R, W>
where
    S: Storage,
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        writeln!(self.output, "{MENU}")?;
        for line in BufReader::new(self.input).lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let Some(code) = parts.next() else {
                continue;
            };
            if code == "0" {
                break;
            }
            let args: Vec<String> = parts.map(str::to_owned).collect();
            match self.store.dispatch(code, &args) {
                Ok(receipt) => writeln!(self.output, "{receipt}")?,
                Err(err) => writeln!(self.output, "Error: {err}")?,
            }
        }
        Ok(())
    }
}
