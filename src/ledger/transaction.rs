use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

use super::catalog::CategoryCatalog;

/// Identifies one of the independently tracked operations (e.g. `MotorWash`).
///
/// The valid set is fixed per deployment and defined by the
/// [`CategoryCatalog`], not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Business(String);

impl Business {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Business {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Business {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Direction of a transaction's contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Income" => Some(Self::Income),
            "Expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

/// A recorded income or expense entry.
///
/// `amount` is always an unsigned magnitude; the sign of its contribution is
/// derived from `kind`. `date` is `None` only for legacy stored rows whose
/// date failed to parse; such rows are excluded from date-bucketed metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(with = "lenient_date")]
    pub date: Option<NaiveDate>,
    pub business: Business,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        business: Business,
        kind: TransactionKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Some(date),
            business,
            kind,
            category: category.into(),
            description: description.into(),
            amount,
        }
    }
}

/// Unsaved transaction data as submitted by an entry form or import row.
///
/// Validation against the catalog happens here, before an identity is
/// assigned; unchecked records never cross into the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub business: Business,
    pub kind: TransactionKind,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

impl TransactionDraft {
    /// Checks the draft's amount and its (business, kind, category) triple
    /// against the catalog.
    pub fn validate(&self, catalog: &CategoryCatalog) -> Result<()> {
        validate_amount(self.amount)?;
        if !catalog.contains_business(&self.business) {
            return Err(LedgerError::Validation(format!(
                "unknown business `{}`",
                self.business
            )));
        }
        if !catalog.allows(&self.business, self.kind, &self.category) {
            return Err(LedgerError::Validation(format!(
                "category `{}` is not valid for {} {}",
                self.category,
                self.business,
                self.kind.as_str()
            )));
        }
        Ok(())
    }

    pub fn into_transaction(self) -> Transaction {
        Transaction::new(
            self.date,
            self.business,
            self.kind,
            self.category,
            self.description,
            self.amount,
        )
    }
}

pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(LedgerError::Validation(format!(
            "amount must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}

/// Serializes dates as `YYYY-MM-DD` strings and tolerates unparseable or
/// missing values on load so one bad legacy row cannot fail hydration.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|value| NaiveDate::parse_from_str(value.trim(), FORMAT).ok()))
    }
}

pub(crate) use lenient_date::FORMAT as DATE_FORMAT;

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(category: &str) -> TransactionDraft {
        TransactionDraft {
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            business: Business::new("MotorWash"),
            kind: TransactionKind::Expense,
            category: category.into(),
            description: "pump repair".into(),
            amount: 350.0,
        }
    }

    #[test]
    fn draft_with_catalog_category_passes() {
        let catalog = CategoryCatalog::default();
        assert!(draft("Maintenance").validate(&catalog).is_ok());
    }

    #[test]
    fn draft_with_foreign_category_is_rejected() {
        let catalog = CategoryCatalog::default();
        let err = draft("Internet Subscription")
            .validate(&catalog)
            .expect_err("PisoWifi category must not pass for MotorWash");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn negative_or_non_finite_amounts_are_rejected() {
        let catalog = CategoryCatalog::default();
        let mut bad = draft("Maintenance");
        bad.amount = -5.0;
        assert!(bad.validate(&catalog).is_err());
        bad.amount = f64::NAN;
        assert!(bad.validate(&catalog).is_err());
    }

    #[test]
    fn unparseable_stored_date_loads_as_none() {
        let raw = r#"{
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "date": "not-a-date",
            "business": "MotorWash",
            "type": "Income",
            "category": "Wash",
            "description": "",
            "amount": 120.0
        }"#;
        let tx: Transaction = serde_json::from_str(raw).expect("row still loads");
        assert_eq!(tx.date, None);
        assert_eq!(tx.amount, 120.0);
    }

    #[test]
    fn date_round_trips_through_json() {
        let tx = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            Business::new("PisoWifi"),
            TransactionKind::Income,
            "Sales",
            "coin box",
            75.5,
        );
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"2024-12-31\""));
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }
}
