//! Read-through cache of the reference catalogs.
//!
//! Mapping forms need the active chart entries and active ledger accounts.
//! Both lists are fetched together on demand and held until the next
//! explicit refresh; staleness is tolerated because every submission is
//! re-validated against the server anyway.

use prodcfg_core::{AccountStatus, ChartOfAccount, LedgerAccount};
use tracing::debug;

use crate::{ClientError, ReferenceSource};

/// Cached catalogs of active chart entries and active ledger accounts.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    chart_of_accounts: Vec<ChartOfAccount>,
    ledger_accounts: Vec<LedgerAccount>,
    loaded: bool,
}

impl ReferenceData {
    /// An empty, not-yet-loaded cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the cache has been filled at least once.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch both catalogs, replacing any cached data.
    ///
    /// On failure the previous cache contents are kept.
    pub fn refresh(&mut self, source: &impl ReferenceSource) -> Result<(), ClientError> {
        let chart_of_accounts = source.fetch_chart_of_accounts(Some(true))?;
        let ledger_accounts = source.fetch_ledger_accounts(Some(AccountStatus::Active))?;
        debug!(
            charts = chart_of_accounts.len(),
            ledgers = ledger_accounts.len(),
            "reference data refreshed"
        );
        self.chart_of_accounts = chart_of_accounts;
        self.ledger_accounts = ledger_accounts;
        self.loaded = true;
        Ok(())
    }

    /// Load the cache if it has never been filled.
    pub fn ensure_loaded(&mut self, source: &impl ReferenceSource) -> Result<(), ClientError> {
        if self.loaded {
            return Ok(());
        }
        self.refresh(source)
    }

    /// The cached chart entries.
    #[must_use]
    pub fn chart_of_accounts(&self) -> &[ChartOfAccount] {
        &self.chart_of_accounts
    }

    /// The cached ledger accounts.
    #[must_use]
    pub fn ledger_accounts(&self) -> &[LedgerAccount] {
        &self.ledger_accounts
    }

    /// Look up a cached chart entry by code.
    #[must_use]
    pub fn chart_entry(&self, code: &str) -> Option<&ChartOfAccount> {
        self.chart_of_accounts.iter().find(|c| c.code == code)
    }

    /// Look up a cached ledger account by code.
    #[must_use]
    pub fn ledger_account(&self, code: &str) -> Option<&LedgerAccount> {
        self.ledger_accounts.iter().find(|a| a.code == code)
    }
}
