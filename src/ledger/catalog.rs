use super::transaction::{Business, TransactionKind};

/// Static taxonomy mapping (business, kind) to the allowed category names.
///
/// Read-only at runtime and never persisted; the catalog is deployment
/// configuration, not ledger state. Category order is preserved so entry
/// forms can present options as configured.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    business: Business,
    income: Vec<String>,
    expense: Vec<String>,
}

impl CategoryCatalog {
    /// An empty catalog; populate with [`CategoryCatalog::with_business`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a business with its income and expense category lists.
    pub fn with_business(
        mut self,
        business: impl Into<Business>,
        income: &[&str],
        expense: &[&str],
    ) -> Self {
        self.entries.push(CatalogEntry {
            business: business.into(),
            income: income.iter().map(|c| c.to_string()).collect(),
            expense: expense.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    /// The fixed set of businesses this catalog covers, in configured order.
    pub fn businesses(&self) -> Vec<&Business> {
        self.entries.iter().map(|entry| &entry.business).collect()
    }

    pub fn contains_business(&self, business: &Business) -> bool {
        self.entries.iter().any(|entry| &entry.business == business)
    }

    /// Ordered category names for the (business, kind) pair; empty when the
    /// business is unknown.
    pub fn categories_for(&self, business: &Business, kind: TransactionKind) -> &[String] {
        self.entries
            .iter()
            .find(|entry| &entry.business == business)
            .map(|entry| match kind {
                TransactionKind::Income => entry.income.as_slice(),
                TransactionKind::Expense => entry.expense.as_slice(),
            })
            .unwrap_or(&[])
    }

    pub fn allows(&self, business: &Business, kind: TransactionKind, category: &str) -> bool {
        self.categories_for(business, kind)
            .iter()
            .any(|name| name == category)
    }
}

impl Default for CategoryCatalog {
    /// The reference deployment: a motor wash and a piso wifi operation.
    fn default() -> Self {
        Self::new()
            .with_business(
                "MotorWash",
                &["Wash", "Vaccum", "Others"],
                &["Maintenance", "Water", "Electricity"],
            )
            .with_business(
                "PisoWifi",
                &["Sales"],
                &["Internet Subscription", "Electricity", "Maintenance"],
            )
    }
}
