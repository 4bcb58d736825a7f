//! Core types for prodcfg
//!
//! This crate provides the fundamental types used throughout the prodcfg
//! project:
//!
//! - [`ChartOfAccount`] - An entry in the hierarchical chart of accounts
//! - [`LedgerAccount`] - A balance-bearing account tied to one chart entry
//! - [`GlMapping`] - Product-to-ledger-account mapping for GL postings
//! - [`EffectiveWindow`] - The date range during which a configuration row applies
//! - Configuration rows: [`InterestRate`], [`Fee`], [`Limit`], [`Period`],
//!   [`Penalty`], [`EligibilityRule`]
//! - [`ProductConfiguration`] - The full row set for one product
//! - [`Loadable`] - Explicit load state for cross-entity references
//! - [`CreateRequest`] / [`UpdateRequest`] - Immutable mutation payloads
//!
//! All entities are immutable value records as received from the back-office
//! service. Edits go through explicit request types built from drafts; the
//! rows themselves are never mutated in place.
//!
//! # Example
//!
//! ```
//! use prodcfg_core::{AccountType, ChartOfAccount, LedgerAccount, AccountStatus};
//! use rust_decimal_macros::dec;
//!
//! let coa = ChartOfAccount::root("2000", "Customer Deposits", AccountType::Liability);
//! let child = coa.child("2001", "Current Account Deposits");
//! assert_eq!(child.level, 2);
//! assert_eq!(child.account_type, AccountType::Liability);
//!
//! let ledger = LedgerAccount::new("2001-001", "Current Deposits EUR", &child, "EUR");
//! assert_eq!(ledger.status, AccountStatus::Active);
//! assert_eq!(ledger.balance, dec!(0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod loadable;
pub mod product;
pub mod request;
pub mod window;

pub use account::{AccountStatus, AccountType, ChartOfAccount, LedgerAccount, MAX_CHART_CODE_LEN};
pub use loadable::Loadable;
pub use product::{
    ConfigKind, ConfigRow, EligibilityRule, EligibilityRuleSpec, Fee, FeeCalculationBase, FeeSpec,
    FeeType, GlMapping, GlMappingSpec, GlMappingType, InterestRate, InterestRateSpec, Limit,
    LimitSpec, LimitType, Penalty, PenaltySpec, PenaltyTrigger, Period, PeriodSpec, PeriodUnit,
    ProductCategory, ProductConfiguration, RuleDataType, RuleOperator, Stored, TransactionType,
};
pub use request::{CreateRequest, UpdateRequest};
pub use window::{EffectiveWindow, Windowed};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;

/// Identifier assigned by the back-office service to a stored entity.
pub type EntityId = u64;

/// Error returned when parsing an enum from its wire form fails.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    /// The enum type being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
