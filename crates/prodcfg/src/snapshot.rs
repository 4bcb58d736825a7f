//! Configuration snapshot files.
//!
//! A snapshot is the JSON export of everything one validation pass needs:
//! the two reference catalogs and one product's configuration row set.

use anyhow::{Context, Result};
use prodcfg_core::{ChartOfAccount, LedgerAccount, ProductConfiguration};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A full configuration snapshot, as exported from the back office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Chart-of-accounts entries.
    #[serde(default)]
    pub chart_of_accounts: Vec<ChartOfAccount>,
    /// Ledger accounts.
    #[serde(default)]
    pub ledger_accounts: Vec<LedgerAccount>,
    /// The product configuration to validate.
    pub configuration: ProductConfiguration,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("{} is not a valid snapshot", path.display()))
    }
}
