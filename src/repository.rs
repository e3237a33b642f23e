//! In-memory transaction collection: CRUD, batch import, and persistence.

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    codec::{self, DecodedCsv},
    errors::{LedgerError, Result},
    ledger::{
        transaction::validate_amount, Business, CategoryCatalog, Transaction, TransactionDraft,
    },
    storage::LedgerStore,
};

/// Outcome of a batch import: rows accepted versus rows dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub rejected: usize,
}

/// Exclusive owner of the transaction set for one ledger.
///
/// Constructed explicitly and passed by handle; there is no ambient
/// singleton. Every mutation persists the full collection through the store,
/// and a failed save surfaces as an error while the in-memory state stays
/// authoritative for the session.
pub struct TransactionRepository {
    store: Box<dyn LedgerStore>,
    catalog: CategoryCatalog,
    transactions: Vec<Transaction>,
}

impl TransactionRepository {
    /// Hydrates the repository from the store.
    pub fn open(store: Box<dyn LedgerStore>, catalog: CategoryCatalog) -> Result<Self> {
        let transactions = store.load()?;
        info!(count = transactions.len(), "ledger hydrated");
        Ok(Self {
            store,
            catalog,
            transactions,
        })
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// The full collection in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Validates the draft, assigns a fresh id, appends, and persists.
    pub fn add(&mut self, draft: TransactionDraft) -> Result<Transaction> {
        draft.validate(&self.catalog)?;
        let transaction = draft.into_transaction();
        self.transactions.push(transaction.clone());
        self.persist()?;
        Ok(transaction)
    }

    /// Replaces the entity with the matching id, keeping the id itself.
    pub fn update(&mut self, updated: Transaction) -> Result<()> {
        if updated.date.is_none() {
            return Err(LedgerError::Validation("date is required".into()));
        }
        validate_amount(updated.amount)?;
        if !self
            .catalog
            .allows(&updated.business, updated.kind, &updated.category)
        {
            return Err(LedgerError::Validation(format!(
                "category `{}` is not valid for {} {}",
                updated.category,
                updated.business,
                updated.kind.as_str()
            )));
        }
        let slot = self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == updated.id)
            .ok_or(LedgerError::TransactionNotFound(updated.id))?;
        *slot = updated;
        self.persist()
    }

    /// Removes the entity with the matching id. Destructive and
    /// unconditional; any confirmation step belongs to the caller.
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != id);
        if self.transactions.len() == before {
            return Err(LedgerError::TransactionNotFound(id));
        }
        self.persist()
    }

    /// Transactions for one business, or all of them, in insertion order.
    /// Display ordering (e.g. by date) is the consumer's concern.
    pub fn list_by_business(&self, business: Option<&Business>) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| business.map_or(true, |wanted| &tx.business == wanted))
            .collect()
    }

    /// Imports decoded CSV rows for `business`, assigning fresh ids to the
    /// rows that validate and dropping the rest. The report's rejection count
    /// covers both rows that failed validation here and rows the decoder
    /// could not read at all. The collection persists once per batch, not
    /// once per row.
    ///
    /// Off-catalog categories are tolerated on import, matching what legacy
    /// files may contain; they are only logged.
    pub fn import_batch(
        &mut self,
        batch: impl Into<DecodedCsv>,
        business: &Business,
    ) -> Result<ImportReport> {
        if !self.catalog.contains_business(business) {
            return Err(LedgerError::Validation(format!(
                "unknown business `{business}`"
            )));
        }
        let batch = batch.into();
        let mut added = 0;
        let mut rejected = batch.skipped;
        for row in batch.rows {
            match row.into_draft(business.clone()) {
                Ok(draft) => {
                    if !self.catalog.allows(&draft.business, draft.kind, &draft.category) {
                        warn!(
                            business = %draft.business,
                            category = %draft.category,
                            "imported category is not in the catalog"
                        );
                    }
                    self.transactions.push(draft.into_transaction());
                    added += 1;
                }
                Err(err) => {
                    warn!(error = %err, "rejecting import row");
                    rejected += 1;
                }
            }
        }
        if added > 0 {
            self.persist()?;
        }
        Ok(ImportReport { added, rejected })
    }

    /// Encodes one business' transactions (or all of them) as CSV text.
    pub fn export_csv(&self, business: Option<&Business>) -> Result<String> {
        let rows: Vec<Transaction> = self
            .list_by_business(business)
            .into_iter()
            .cloned()
            .collect();
        codec::encode(&rows)
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.transactions).map_err(|err| {
            warn!(error = %err, "failed to persist ledger; in-memory state kept");
            err
        })
    }
}
