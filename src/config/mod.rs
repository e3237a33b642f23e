use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    utils::{base_dir, ensure_dir, tmp_path, write_atomic},
};

const CONFIG_FILE: &str = "config.json";

/// Consumer-facing preferences kept outside the ledger blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Currency symbol or ISO code the rendering layer should display.
    pub currency: String,
    /// Business tab the consumer last had open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_business: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "PHP".into(),
            last_business: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
