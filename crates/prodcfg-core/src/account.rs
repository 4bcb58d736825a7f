//! Chart-of-accounts and ledger-account types.
//!
//! The chart of accounts is the hierarchical catalog of accounting
//! categories; ledger accounts are concrete balance-bearing accounts each
//! tied to one chart entry. Both are reference data fetched from the
//! back-office service and treated as read-only here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ParseEnumError;

/// Maximum length of a chart-of-accounts code.
pub const MAX_CHART_CODE_LEN: usize = 20;

/// Accounting type of a chart entry or ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Assets (loans receivable, cash, nostro accounts).
    Asset,
    /// Liabilities (customer deposits).
    Liability,
    /// Equity.
    Equity,
    /// Revenue (fee and interest income).
    Revenue,
    /// Expenses (interest paid, fee waivers).
    Expense,
}

impl AccountType {
    /// Wire form of this account type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASSET" => Ok(Self::Asset),
            "LIABILITY" => Ok(Self::Liability),
            "EQUITY" => Ok(Self::Equity),
            "REVENUE" => Ok(Self::Revenue),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(ParseEnumError::new("AccountType", s)),
        }
    }
}

/// Lifecycle status of a ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    /// Account accepts postings and may be mapped to products.
    Active,
    /// Account is closed to new postings and mappings.
    Inactive,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("ACTIVE"),
            Self::Inactive => f.write_str("INACTIVE"),
        }
    }
}

impl FromStr for AccountStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            _ => Err(ParseEnumError::new("AccountStatus", s)),
        }
    }
}

/// An entry in the chart of accounts.
///
/// Chart entries form a tree: a non-root entry references its parent by
/// code, carries the same account type as the parent, and sits one level
/// below it. Root entries have `parent_code = None` and `level = 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOfAccount {
    /// Unique code, at most [`MAX_CHART_CODE_LEN`] characters.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Accounting type; equal to the parent's type for non-root entries.
    pub account_type: AccountType,
    /// Code of the parent entry, `None` for roots.
    pub parent_code: Option<String>,
    /// Depth in the tree; roots are level 1.
    pub level: u32,
    /// Whether the entry is offered for new ledger accounts.
    pub is_active: bool,
}

impl ChartOfAccount {
    /// Create a root chart entry (level 1, no parent).
    #[must_use]
    pub fn root(
        code: impl Into<String>,
        name: impl Into<String>,
        account_type: AccountType,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            parent_code: None,
            level: 1,
            is_active: true,
        }
    }

    /// Create a child of this entry, inheriting type and deriving level.
    #[must_use]
    pub fn child(&self, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type: self.account_type,
            parent_code: Some(self.code.clone()),
            level: self.level + 1,
            is_active: true,
        }
    }

    /// Mark this entry inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Whether this is a root entry.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_code.is_none()
    }
}

/// A concrete balance-bearing account used for GL postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccount {
    /// Unique account code.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Code of the chart entry this account belongs to.
    pub chart_of_account_code: String,
    /// Accounting type; must equal the referenced chart entry's type.
    pub account_type: AccountType,
    /// 3-letter ISO currency code.
    pub currency: String,
    /// Booked balance.
    pub balance: Decimal,
    /// Balance available for postings.
    pub available_balance: Decimal,
    /// Lifecycle status.
    pub status: AccountStatus,
}

impl LedgerAccount {
    /// Create an active, zero-balance ledger account under a chart entry.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        chart: &ChartOfAccount,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            chart_of_account_code: chart.code.clone(),
            account_type: chart.account_type,
            currency: currency.into(),
            balance: Decimal::ZERO,
            available_balance: Decimal::ZERO,
            status: AccountStatus::Active,
        }
    }

    /// Set the booked and available balances.
    #[must_use]
    pub const fn with_balance(mut self, balance: Decimal, available: Decimal) -> Self {
        self.balance = balance;
        self.available_balance = available;
        self
    }

    /// Mark the account inactive.
    #[must_use]
    pub const fn inactive(mut self) -> Self {
        self.status = AccountStatus::Inactive;
        self
    }

    /// Whether the account accepts new mappings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}
