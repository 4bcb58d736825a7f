//! Integration tests for the validation crate.
//!
//! Tests cover all rule groups: chart hierarchy, mapping compatibility and
//! uniqueness, the calculation-base gate, temporal validity, and
//! eligibility rule syntax.

use chrono::NaiveDate;
use prodcfg_core::{
    AccountType, ChartOfAccount, EffectiveWindow, EligibilityRuleSpec, FeeCalculationBase,
    FeeSpec, FeeType, GlMappingSpec, GlMappingType, InterestRateSpec, LedgerAccount,
    ProductCategory, ProductConfiguration, RuleDataType, RuleOperator, Stored,
};
use prodcfg_validate::{
    check_chart, has_blocking, validate_configuration, CatalogView, ErrorCode, Severity,
};
use rust_decimal_macros::dec;

// ============================================================================
// Helper Functions
// ============================================================================

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn codes(errors: &[prodcfg_validate::ValidationError]) -> Vec<ErrorCode> {
    errors.iter().map(|e| e.code).collect()
}

struct Fixture {
    charts: Vec<ChartOfAccount>,
    ledgers: Vec<LedgerAccount>,
}

impl Fixture {
    fn new() -> Self {
        let deposits = ChartOfAccount::root("2000", "Customer Deposits", AccountType::Liability);
        let expense = ChartOfAccount::root("5000", "Interest Expense", AccountType::Expense);
        let loans = ChartOfAccount::root("1000", "Loans", AccountType::Asset);
        let ledgers = vec![
            LedgerAccount::new("2000-01", "Deposits EUR", &deposits, "EUR"),
            LedgerAccount::new("5000-01", "Interest Paid EUR", &expense, "EUR"),
            LedgerAccount::new("1000-01", "Loans EUR", &loans, "EUR"),
        ];
        Self {
            charts: vec![deposits, expense, loans],
            ledgers,
        }
    }

    fn catalog(&self) -> CatalogView<'_> {
        CatalogView {
            chart_of_accounts: &self.charts,
            ledger_accounts: &self.ledgers,
        }
    }
}

fn mapping(id: u64, mapping_type: GlMappingType, code: &str) -> Stored<GlMappingSpec> {
    Stored::new(
        id,
        GlMappingSpec {
            mapping_type,
            ledger_account_code: code.to_string(),
        },
    )
}

fn complete_current_account_config() -> ProductConfiguration {
    let mut config = ProductConfiguration::empty(1, ProductCategory::CurrentAccount);
    config
        .gl_mappings
        .push(mapping(1, GlMappingType::LiabilityAccount, "2000-01"));
    config
        .gl_mappings
        .push(mapping(2, GlMappingType::InterestAccount, "5000-01"));
    config
}

// ============================================================================
// Chart hierarchy (C1xxx)
// ============================================================================

#[test]
fn c1002_child_type_must_match_parent() {
    let root = ChartOfAccount::root("1000", "Assets", AccountType::Asset);
    let mut child = root.child("1001", "Loans");
    child.account_type = AccountType::Liability;

    let errors = check_chart(&[root, child]);
    assert_eq!(codes(&errors), vec![ErrorCode::ChartTypeMismatch]);
    assert!(errors[0].message.contains("type must match parent"));
}

#[test]
fn well_formed_two_level_chart_passes() {
    let root = ChartOfAccount::root("1000", "Assets", AccountType::Asset);
    let child = root.child("1001", "Loans");
    assert_eq!(child.level, 2);
    assert!(check_chart(&[root, child]).is_empty());
}

// ============================================================================
// Mapping uniqueness and compatibility (M2xxx)
// ============================================================================

#[test]
fn m2003_second_mapping_of_same_type_is_rejected() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    config
        .gl_mappings
        .push(mapping(3, GlMappingType::LiabilityAccount, "2000-01"));

    let errors = validate_configuration(&config, &fixture.catalog());
    assert!(codes(&errors).contains(&ErrorCode::DuplicateMapping));
    assert!(has_blocking(&errors));
}

#[test]
fn m2001_wrongly_typed_account_is_rejected() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    // An asset-typed ledger account cannot back a REVENUE_ACCOUNT mapping.
    config
        .gl_mappings
        .push(mapping(3, GlMappingType::RevenueAccount, "1000-01"));

    let errors = validate_configuration(&config, &fixture.catalog());
    assert!(codes(&errors).contains(&ErrorCode::MappingTypeNotAllowed));
}

#[test]
fn m2004_missing_required_mapping_for_category() {
    let fixture = Fixture::new();
    // A current account with no LIABILITY_ACCOUNT mapping.
    let mut config = ProductConfiguration::empty(1, ProductCategory::CurrentAccount);
    config
        .gl_mappings
        .push(mapping(1, GlMappingType::InterestAccount, "5000-01"));

    let errors = validate_configuration(&config, &fixture.catalog());
    let missing: Vec<_> = errors
        .iter()
        .filter(|e| e.code == ErrorCode::RequiredMappingMissing)
        .collect();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.contains("LIABILITY_ACCOUNT"));
}

#[test]
fn m2005_unknown_ledger_account_is_rejected() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    config
        .gl_mappings
        .push(mapping(3, GlMappingType::FeeAccount, "no-such-account"));

    let errors = validate_configuration(&config, &fixture.catalog());
    assert!(codes(&errors).contains(&ErrorCode::MappingAccountUnknown));
}

#[test]
fn complete_configuration_passes() {
    let fixture = Fixture::new();
    let config = complete_current_account_config();
    let errors = validate_configuration(&config, &fixture.catalog());
    assert!(errors.is_empty(), "expected no findings, got {errors:?}");
}

// ============================================================================
// Fees (F3xxx) within a full configuration
// ============================================================================

#[test]
fn f3003_transfer_fee_with_balance_base_is_rejected() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    config.fees.push(Stored::new(
        10,
        FeeSpec {
            fee_type: FeeType::Transaction,
            transaction_type: Some(prodcfg_core::TransactionType::Transfer),
            calculation_base: FeeCalculationBase::Balance,
            fee_amount: Some(dec!(1)),
            fee_percentage: None,
            currency: "EUR".to_string(),
            window: EffectiveWindow::starting(date(2024, 1, 1)),
        },
    ));

    let errors = validate_configuration(&config, &fixture.catalog());
    assert!(codes(&errors).contains(&ErrorCode::BaseNotAllowed));
}

// ============================================================================
// Temporal findings (T4xxx) within a full configuration
// ============================================================================

#[test]
fn t4002_overlapping_rates_warn_but_do_not_block() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    for (id, from) in [(20, date(2024, 1, 1)), (21, date(2024, 3, 1))] {
        config.interest_rates.push(Stored::new(
            id,
            InterestRateSpec {
                rate_percent: dec!(2.5),
                balance_from: None,
                balance_to: None,
                window: EffectiveWindow::starting(from),
            },
        ));
    }

    let errors = validate_configuration(&config, &fixture.catalog());
    assert_eq!(codes(&errors), vec![ErrorCode::WindowOverlap]);
    assert_eq!(errors[0].severity(), Severity::Warning);
    assert!(!has_blocking(&errors));
}

#[test]
fn t4001_inverted_window_blocks() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    config.interest_rates.push(Stored::new(
        20,
        InterestRateSpec {
            rate_percent: dec!(2.5),
            balance_from: None,
            balance_to: None,
            window: EffectiveWindow::starting(date(2024, 6, 1)).until(date(2024, 1, 1)),
        },
    ));

    let errors = validate_configuration(&config, &fixture.catalog());
    assert!(codes(&errors).contains(&ErrorCode::WindowInverted));
    assert!(has_blocking(&errors));
}

// ============================================================================
// Eligibility rules (R5xxx) within a full configuration
// ============================================================================

#[test]
fn r5001_in_rule_with_bare_list_is_rejected() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    config.eligibility_rules.push(Stored::new(
        30,
        EligibilityRuleSpec {
            field_name: "residency".to_string(),
            operator: RuleOperator::In,
            data_type: RuleDataType::String,
            rule_value: "DE,FR".to_string(),
            window: EffectiveWindow::starting(date(2024, 1, 1)),
        },
    ));

    let errors = validate_configuration(&config, &fixture.catalog());
    assert_eq!(codes(&errors), vec![ErrorCode::RuleValueNotList]);
    assert_eq!(errors[0].field, Some("ruleValue"));
}

#[test]
fn valid_in_rule_passes() {
    let fixture = Fixture::new();
    let mut config = complete_current_account_config();
    config.eligibility_rules.push(Stored::new(
        30,
        EligibilityRuleSpec {
            field_name: "residency".to_string(),
            operator: RuleOperator::In,
            data_type: RuleDataType::String,
            rule_value: "[\"DE\",\"FR\"]".to_string(),
            window: EffectiveWindow::starting(date(2024, 1, 1)),
        },
    ));

    let errors = validate_configuration(&config, &fixture.catalog());
    assert!(errors.is_empty(), "expected no findings, got {errors:?}");
}
