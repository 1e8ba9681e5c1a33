mod loader;

pub use loader::{LedgerLoader, LedgerLoaderError, LedgerRecord, PeriodMode};
