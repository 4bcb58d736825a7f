//! Product configuration consistency rules.
//!
//! This crate implements the client-side checks that keep a bank product's
//! configuration internally consistent before anything is submitted:
//!
//! - Chart-of-accounts hierarchy (type and level agreement with the parent)
//! - GL mapping type compatibility and per-type uniqueness
//! - Calculation-base field applicability for fees and penalties
//! - Effective-window well-formedness and overlap detection
//! - Eligibility rule value syntax per operator and data type
//!
//! # Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | C1001 | Chart code empty or too long |
//! | C1002 | Chart entry type differs from parent |
//! | C1003 | Chart entry level inconsistent with parent |
//! | C1004 | Referenced chart entry not found |
//! | C1005 | Ledger account type differs from its chart entry |
//! | M2001 | Ledger account type not allowed for mapping type |
//! | M2002 | Mapped ledger account not active |
//! | M2003 | Duplicate mapping for mapping type |
//! | M2004 | Required mapping missing for product category |
//! | M2005 | Mapped ledger account not found |
//! | F3001 | Amount not applicable for calculation base |
//! | F3002 | Percentage not applicable for calculation base |
//! | F3003 | Calculation base not allowed for fee kind |
//! | F3004 | Required amount/percentage missing |
//! | T4001 | Effective window ends before it starts |
//! | T4002 | Overlapping effective windows (warning) |
//! | R5001 | Rule value is not a JSON array |
//! | R5002 | Rule value does not match declared data type |
//! | R5003 | Rule value is empty |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chart;
pub mod compat;
pub mod gate;
pub mod rule;
pub mod temporal;

use prodcfg_core::{ChartOfAccount, LedgerAccount, ProductConfiguration};
use thiserror::Error;

pub use chart::{check_chart, check_chart_entry, check_ledger_account};
pub use compat::{
    allowed_types, check_mapping, check_required_mappings, is_compatible, would_duplicate,
};
pub use gate::{allowed_bases, check_fee, check_penalty, field_policy, normalize_fee, FieldPolicy};
pub use rule::validate_rule_value;
pub use temporal::{
    check_overlaps, check_window, currently_effective, is_currently_effective, open_count,
    overlaps, pick_effective,
};

/// Validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // === Chart / account errors (C1xxx) ===
    /// C1001: Chart code empty or over the length limit.
    ChartCodeInvalid,
    /// C1002: Chart entry's account type differs from its parent's.
    ChartTypeMismatch,
    /// C1003: Chart entry's level is not parent level + 1 (or root level != 1).
    ChartLevelInvalid,
    /// C1004: Referenced chart entry does not exist.
    ChartParentMissing,
    /// C1005: Ledger account's type differs from its chart entry's.
    LedgerTypeMismatch,

    // === Mapping errors (M2xxx) ===
    /// M2001: Ledger account type outside the allowed set for the mapping type.
    MappingTypeNotAllowed,
    /// M2002: Mapped ledger account is not active.
    MappingAccountInactive,
    /// M2003: A mapping of this type already exists for the product.
    DuplicateMapping,
    /// M2004: Product category requires a mapping type that is absent.
    RequiredMappingMissing,
    /// M2005: Mapped ledger account not found in the catalog.
    MappingAccountUnknown,

    // === Calculation-base errors (F3xxx) ===
    /// F3001: Amount set although the base makes it inapplicable.
    AmountNotApplicable,
    /// F3002: Percentage set although the base makes it inapplicable.
    PercentageNotApplicable,
    /// F3003: Calculation base outside the allowed set for the fee kind.
    BaseNotAllowed,
    /// F3004: No value supplied for a base that requires one.
    MissingBaseField,

    // === Temporal errors (T4xxx) ===
    /// T4001: `effective_to` earlier than `effective_from`.
    WindowInverted,
    /// T4002: Two active rows of the same kind overlap in time (warning).
    WindowOverlap,

    // === Eligibility rule errors (R5xxx) ===
    /// R5001: IN/NOT_IN rule value is not a JSON array literal.
    RuleValueNotList,
    /// R5002: Rule value does not parse as the declared data type.
    RuleValueTypeMismatch,
    /// R5003: Rule value is empty.
    RuleValueEmpty,
}

impl ErrorCode {
    /// Get the error code string (e.g., "M2003").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ChartCodeInvalid => "C1001",
            Self::ChartTypeMismatch => "C1002",
            Self::ChartLevelInvalid => "C1003",
            Self::ChartParentMissing => "C1004",
            Self::LedgerTypeMismatch => "C1005",
            Self::MappingTypeNotAllowed => "M2001",
            Self::MappingAccountInactive => "M2002",
            Self::DuplicateMapping => "M2003",
            Self::RequiredMappingMissing => "M2004",
            Self::MappingAccountUnknown => "M2005",
            Self::AmountNotApplicable => "F3001",
            Self::PercentageNotApplicable => "F3002",
            Self::BaseNotAllowed => "F3003",
            Self::MissingBaseField => "F3004",
            Self::WindowInverted => "T4001",
            Self::WindowOverlap => "T4002",
            Self::RuleValueNotList => "R5001",
            Self::RuleValueTypeMismatch => "R5002",
            Self::RuleValueEmpty => "R5003",
        }
    }

    /// Check if this finding is a warning rather than an error.
    ///
    /// Warnings never block submission; the back office tolerates
    /// overlapping effective windows.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::WindowOverlap)
    }

    /// Get the severity level.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        if self.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Severity level for validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Blocks submission.
    Error,
    /// Suspicious but submittable.
    Warning,
}

/// A validation finding.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct ValidationError {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Form field the finding attaches to, if field-level.
    pub field: Option<&'static str>,
}

impl ValidationError {
    /// Create a new validation finding.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    /// Attach the finding to a form field.
    #[must_use]
    pub const fn on_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }

    /// Severity of this finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.code.severity()
    }
}

/// Whether any finding in `errors` blocks submission.
#[must_use]
pub fn has_blocking(errors: &[ValidationError]) -> bool {
    errors.iter().any(|e| e.severity() == Severity::Error)
}

/// Read-only view over the reference catalogs a validation pass resolves
/// codes against.
#[derive(Debug, Clone, Copy)]
pub struct CatalogView<'a> {
    /// Chart-of-accounts entries.
    pub chart_of_accounts: &'a [ChartOfAccount],
    /// Ledger accounts.
    pub ledger_accounts: &'a [LedgerAccount],
}

impl CatalogView<'_> {
    /// Look up a chart entry by code.
    #[must_use]
    pub fn chart_entry(&self, code: &str) -> Option<&ChartOfAccount> {
        self.chart_of_accounts.iter().find(|c| c.code == code)
    }

    /// Look up a ledger account by code.
    #[must_use]
    pub fn ledger_account(&self, code: &str) -> Option<&LedgerAccount> {
        self.ledger_accounts.iter().find(|a| a.code == code)
    }
}

/// Validate a full product configuration against the catalogs.
///
/// Runs every rule group over every row and returns all findings, warnings
/// included. Submission should be blocked iff [`has_blocking`] holds.
#[must_use]
pub fn validate_configuration(
    config: &ProductConfiguration,
    catalog: &CatalogView<'_>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for rate in &config.interest_rates {
        temporal::collect_window_findings(&rate.spec.window, "interest rate", &mut errors);
    }
    errors.extend(temporal::check_overlaps(&config.interest_rates, "interest rate"));

    for fee in &config.fees {
        temporal::collect_window_findings(&fee.spec.window, "fee", &mut errors);
        errors.extend(gate::check_fee(&fee.spec));
    }
    errors.extend(temporal::check_overlaps(&config.fees, "fee"));

    for limit in &config.limits {
        temporal::collect_window_findings(&limit.spec.window, "limit", &mut errors);
    }
    errors.extend(temporal::check_overlaps(&config.limits, "limit"));

    for period in &config.periods {
        temporal::collect_window_findings(&period.spec.window, "period", &mut errors);
    }
    errors.extend(temporal::check_overlaps(&config.periods, "period"));

    for penalty in &config.penalties {
        temporal::collect_window_findings(&penalty.spec.window, "penalty", &mut errors);
        errors.extend(gate::check_penalty(&penalty.spec));
    }
    errors.extend(temporal::check_overlaps(&config.penalties, "penalty"));

    for eligibility_rule in &config.eligibility_rules {
        temporal::collect_window_findings(
            &eligibility_rule.spec.window,
            "eligibility rule",
            &mut errors,
        );
        if let Err(e) = rule::validate_rule_value(
            eligibility_rule.spec.operator,
            eligibility_rule.spec.data_type,
            &eligibility_rule.spec.rule_value,
        ) {
            errors.push(e);
        }
    }
    errors.extend(temporal::check_overlaps(
        &config.eligibility_rules,
        "eligibility rule",
    ));

    // Mappings: uniqueness across the stored set, then per-mapping
    // compatibility against the catalog, then category completeness.
    let mut seen = std::collections::HashSet::new();
    for mapping in &config.gl_mappings {
        if !seen.insert(mapping.spec.mapping_type) {
            errors.push(
                ValidationError::new(
                    ErrorCode::DuplicateMapping,
                    format!(
                        "mapping of type {} already exists",
                        mapping.spec.mapping_type
                    ),
                )
                .on_field("mappingType"),
            );
        }
        errors.extend(compat::check_mapping(
            &mapping.spec,
            catalog.ledger_account(&mapping.spec.ledger_account_code),
        ));
    }
    errors.extend(compat::check_required_mappings(
        config.category,
        &config.gl_mappings,
    ));

    errors
}
