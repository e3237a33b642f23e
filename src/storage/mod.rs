pub mod json_backend;

use crate::{errors::Result, ledger::Transaction};

/// Abstraction over durable stores holding the full transaction set under one
/// logical key.
///
/// Every `save` rewrites the entire collection; there is no partial write.
/// Failures must surface to the caller so unsaved edits are not silently
/// dropped.
pub trait LedgerStore: Send + Sync {
    /// Loads the stored collection; an absent store yields an empty sequence.
    fn load(&self) -> Result<Vec<Transaction>>;
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
}

pub use json_backend::{JsonStore, LEDGER_SCHEMA_VERSION};
