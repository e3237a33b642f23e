//! Ledger domain models: businesses, transactions, and the category catalog.

pub mod catalog;
pub mod transaction;

pub use catalog::CategoryCatalog;
pub use transaction::{Business, Transaction, TransactionDraft, TransactionKind};
