//! GL mapping type compatibility and uniqueness.
//!
//! A product routes each kind of posting (asset, liability, fee, interest,
//! revenue, expense) to one ledger account. The account's type must belong
//! to the allowed set for the mapping type, the account must be active, and
//! a product holds at most one mapping per type.

use prodcfg_core::{
    AccountType, EntityId, GlMapping, GlMappingSpec, GlMappingType, LedgerAccount, ProductCategory,
};

use crate::{ErrorCode, ValidationError};

/// Account types a ledger account may have to serve a mapping type.
#[must_use]
pub const fn allowed_types(mapping_type: GlMappingType) -> &'static [AccountType] {
    match mapping_type {
        GlMappingType::AssetAccount => &[AccountType::Asset],
        GlMappingType::LiabilityAccount => &[AccountType::Liability],
        GlMappingType::FeeAccount | GlMappingType::InterestAccount => {
            &[AccountType::Expense, AccountType::Revenue]
        }
        GlMappingType::RevenueAccount => &[AccountType::Revenue],
        GlMappingType::ExpenseAccount => &[AccountType::Expense],
    }
}

/// Whether `account` may serve `mapping_type`: active and of an allowed type.
///
/// Used both to filter the selectable account list and to re-validate at
/// submit time against a possibly stale list.
#[must_use]
pub fn is_compatible(mapping_type: GlMappingType, account: &LedgerAccount) -> bool {
    account.is_active() && allowed_types(mapping_type).contains(&account.account_type)
}

/// Whether adding a mapping of `mapping_type` would duplicate an existing
/// one. `excluding` names the row being edited, so an edit does not collide
/// with itself; pass `None` for create.
#[must_use]
pub fn would_duplicate(
    existing: &[GlMapping],
    mapping_type: GlMappingType,
    excluding: Option<EntityId>,
) -> bool {
    existing
        .iter()
        .filter(|m| Some(m.id) != excluding)
        .any(|m| m.spec.mapping_type == mapping_type)
}

/// Validate one mapping against its resolved ledger account.
///
/// `account` is the catalog entry for `spec.ledger_account_code`, or `None`
/// if the code resolved to nothing.
#[must_use]
pub fn check_mapping(
    spec: &GlMappingSpec,
    account: Option<&LedgerAccount>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(account) = account else {
        errors.push(
            ValidationError::new(
                ErrorCode::MappingAccountUnknown,
                format!("ledger account {} not found", spec.ledger_account_code),
            )
            .on_field("ledgerAccountCode"),
        );
        return errors;
    };

    let allowed = allowed_types(spec.mapping_type);
    if !allowed.contains(&account.account_type) {
        let names: Vec<&str> = allowed.iter().map(AccountType::as_str).collect();
        errors.push(
            ValidationError::new(
                ErrorCode::MappingTypeNotAllowed,
                format!(
                    "ledger account {} is {} but {} requires one of: {}",
                    account.code,
                    account.account_type,
                    spec.mapping_type,
                    names.join(", ")
                ),
            )
            .on_field("ledgerAccountCode"),
        );
    }

    if !account.is_active() {
        errors.push(
            ValidationError::new(
                ErrorCode::MappingAccountInactive,
                format!("ledger account {} is not active", account.code),
            )
            .on_field("ledgerAccountCode"),
        );
    }

    errors
}

/// Check that every mapping type required by the product category is
/// present in `mappings`.
#[must_use]
pub fn check_required_mappings(
    category: ProductCategory,
    mappings: &[GlMapping],
) -> Vec<ValidationError> {
    category
        .required_mappings()
        .iter()
        .filter(|required| !mappings.iter().any(|m| m.spec.mapping_type == **required))
        .map(|required| {
            ValidationError::new(
                ErrorCode::RequiredMappingMissing,
                format!("product category requires a {required} mapping"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodcfg_core::{AccountStatus, ChartOfAccount};

    fn ledger(account_type: AccountType, status: AccountStatus) -> LedgerAccount {
        let chart = ChartOfAccount::root("9000", "Test", account_type);
        let mut acct = LedgerAccount::new("9000-01", "Test", &chart, "EUR");
        acct.status = status;
        acct
    }

    #[test]
    fn fee_account_accepts_expense_and_revenue() {
        let expense = ledger(AccountType::Expense, AccountStatus::Active);
        let revenue = ledger(AccountType::Revenue, AccountStatus::Active);
        let asset = ledger(AccountType::Asset, AccountStatus::Active);
        assert!(is_compatible(GlMappingType::FeeAccount, &expense));
        assert!(is_compatible(GlMappingType::FeeAccount, &revenue));
        assert!(!is_compatible(GlMappingType::FeeAccount, &asset));
    }

    #[test]
    fn inactive_account_is_never_compatible() {
        let inactive = ledger(AccountType::Liability, AccountStatus::Inactive);
        assert!(!is_compatible(GlMappingType::LiabilityAccount, &inactive));
    }

    #[test]
    fn duplicate_detection_excludes_edited_row() {
        let existing = vec![GlMapping::new(
            1,
            GlMappingSpec {
                mapping_type: GlMappingType::AssetAccount,
                ledger_account_code: "1000-01".to_string(),
            },
        )];
        assert!(would_duplicate(
            &existing,
            GlMappingType::AssetAccount,
            None
        ));
        // Editing row 1 itself is not a duplicate.
        assert!(!would_duplicate(
            &existing,
            GlMappingType::AssetAccount,
            Some(1)
        ));
        assert!(!would_duplicate(
            &existing,
            GlMappingType::LiabilityAccount,
            None
        ));
    }

    #[test]
    fn unknown_account_reported_once() {
        let spec = GlMappingSpec {
            mapping_type: GlMappingType::AssetAccount,
            ledger_account_code: "missing".to_string(),
        };
        let errors = check_mapping(&spec, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::MappingAccountUnknown);
    }

    #[test]
    fn type_mismatch_names_required_set() {
        let asset = ledger(AccountType::Asset, AccountStatus::Active);
        let spec = GlMappingSpec {
            mapping_type: GlMappingType::FeeAccount,
            ledger_account_code: asset.code.clone(),
        };
        let errors = check_mapping(&spec, Some(&asset));
        assert_eq!(errors[0].code, ErrorCode::MappingTypeNotAllowed);
        assert!(errors[0].message.contains("EXPENSE, REVENUE"));
    }

    #[test]
    fn missing_required_mapping_for_category() {
        let errors = check_required_mappings(ProductCategory::CurrentAccount, &[]);
        let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![
            ErrorCode::RequiredMappingMissing,
            ErrorCode::RequiredMappingMissing
        ]);
        assert!(errors[0].message.contains("LIABILITY_ACCOUNT"));
    }
}
