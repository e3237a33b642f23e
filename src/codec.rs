//! CSV mapping for the transaction entity.
//!
//! Export writes every field except `id`; import reads raw field-named rows
//! and leaves identity and business assignment to the repository, since a
//! CSV file is scoped to one business and carries no reliable id.

use chrono::NaiveDate;

use crate::{
    errors::{LedgerError, Result},
    ledger::{
        transaction::{validate_amount, DATE_FORMAT},
        Business, Transaction, TransactionDraft, TransactionKind,
    },
};

/// Fixed export column order.
pub const CSV_HEADER: [&str; 6] = [
    "date",
    "business",
    "type",
    "category",
    "description",
    "amount",
];

/// One decoded CSV row, fields still raw text. Columns the codec does not
/// know (`business`, `id`) are ignored; columns a short row lacks are empty
/// strings, so the row still reaches validation and counts as rejected there.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRow {
    pub date: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

/// Rows decoded from one CSV file, plus the count of rows the reader could
/// not parse at all. The count folds into an import's rejection total so a
/// skipped row is never invisible to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedCsv {
    pub rows: Vec<ImportRow>,
    pub skipped: usize,
}

impl From<Vec<ImportRow>> for DecodedCsv {
    fn from(rows: Vec<ImportRow>) -> Self {
        Self { rows, skipped: 0 }
    }
}

impl ImportRow {
    /// Parses the raw fields into a draft for `business`, rejecting rows
    /// missing a date, kind, category, or parseable amount.
    pub fn into_draft(self, business: Business) -> Result<TransactionDraft> {
        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| LedgerError::Validation("row is missing a parseable date".into()))?;
        let kind = TransactionKind::parse(&self.kind)
            .ok_or_else(|| LedgerError::Validation(format!("unknown type `{}`", self.kind)))?;
        let category = self.category.trim();
        if category.is_empty() {
            return Err(LedgerError::Validation("row is missing a category".into()));
        }
        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| LedgerError::Validation(format!("unparseable amount `{}`", self.amount)))?;
        validate_amount(amount)?;
        Ok(TransactionDraft {
            date,
            business,
            kind,
            category: category.to_string(),
            description: self.description,
            amount,
        })
    }
}

/// Encodes transactions as UTF-8 CSV with the fixed header
/// `date,business,type,category,description,amount`.
pub fn encode(transactions: &[Transaction]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for tx in transactions {
        let date = tx
            .date
            .map(|date| date.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        let amount = tx.amount.to_string();
        writer.write_record([
            date.as_str(),
            tx.business.as_str(),
            tx.kind.as_str(),
            &tx.category,
            &tx.description,
            &amount,
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| LedgerError::Parse(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| LedgerError::Parse(err.to_string()))
}

/// Decodes CSV text into raw rows by header-name lookup. Rows the reader
/// cannot parse are skipped individually and counted; one malformed row does
/// not abort the rest of the file.
pub fn decode(text: &str) -> DecodedCsv {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut decoded = DecodedCsv::default();
    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            tracing::warn!(error = %err, "CSV header row is unreadable");
            decoded.skipped = 1;
            return decoded;
        }
    };
    let field = |record: &csv::StringRecord, name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|index| record.get(index))
            .unwrap_or_default()
            .to_string()
    };
    for result in reader.records() {
        match result {
            Ok(record) => decoded.rows.push(ImportRow {
                date: field(&record, "date"),
                kind: field(&record, "type"),
                category: field(&record, "category"),
                description: field(&record, "description"),
                amount: field(&record, "amount"),
            }),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable CSV row");
                decoded.skipped += 1;
            }
        }
    }
    decoded
}
