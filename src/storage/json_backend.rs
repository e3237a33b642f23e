use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{LedgerError, Result},
    ledger::Transaction,
    utils::{base_dir, ensure_dir, tmp_path, write_atomic},
};

use super::LedgerStore;

const LEDGER_FILE: &str = "ledger.json";

/// Current version of the on-disk ledger envelope.
pub const LEDGER_SCHEMA_VERSION: u32 = 1;

/// Versioned envelope around the stored transaction array.
///
/// The original deployment persisted a bare array; loading falls back to that
/// shape so existing data migrates forward on the next save.
#[derive(Debug, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default = "LedgerFile::schema_version_default")]
    schema_version: u32,
    transactions: Vec<Transaction>,
}

impl LedgerFile {
    fn schema_version_default() -> u32 {
        LEDGER_SCHEMA_VERSION
    }
}

/// File-backed store keeping the whole ledger in one JSON document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Store rooted at the default application data directory.
    pub fn new_default() -> Result<Self> {
        Self::new(base_dir())
    }

    /// Store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self {
            path: root.join(LEDGER_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonStore {
    fn load(&self) -> Result<Vec<Transaction>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        match serde_json::from_str::<LedgerFile>(&data) {
            Ok(file) => {
                if file.schema_version > LEDGER_SCHEMA_VERSION {
                    return Err(LedgerError::Storage(format!(
                        "ledger file `{}` is from a newer schema version ({})",
                        self.path.display(),
                        file.schema_version
                    )));
                }
                Ok(file.transactions)
            }
            // Pre-versioning deployments stored the array directly.
            Err(_) => Ok(serde_json::from_str::<Vec<Transaction>>(&data)?),
        }
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        let file = LedgerFile {
            schema_version: LEDGER_SCHEMA_VERSION,
            transactions: transactions.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
