use std::io::{stdin, stdout};

use anyhow::{Context, Result};
use passbook::bin_utils::Service;
use passbook::storage::file_storage::FileStorage;
use passbook::store::LedgerStore;
use tracing_subscriber::EnvFilter;

const DEFAULT_LEDGER_FILE: &str = "passbook.txt";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LEDGER_FILE.to_owned());
    let store = LedgerStore::open(FileStorage::new(path.as_str()))
        .with_context(|| format!("Failed to open ledger file `{path}`"))?;

    let service = Service {
        store,
        input: stdin(),
        output: &mut stdout(),
    };
    service.run()
}
