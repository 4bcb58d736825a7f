//! Chart-of-accounts hierarchy rules.
//!
//! A chart entry's code is bounded, a child carries its parent's account
//! type one level deeper, and a ledger account's type must agree with the
//! chart entry it references.

use prodcfg_core::{ChartOfAccount, LedgerAccount, MAX_CHART_CODE_LEN};
use std::collections::HashMap;

use crate::{ErrorCode, ValidationError};

/// Validate one chart entry against its resolved parent.
///
/// `parent` is the entry for `entry.parent_code`, or `None` when the code
/// resolved to nothing (for a root entry it is ignored).
#[must_use]
pub fn check_chart_entry(
    entry: &ChartOfAccount,
    parent: Option<&ChartOfAccount>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if entry.code.is_empty() || entry.code.len() > MAX_CHART_CODE_LEN {
        errors.push(
            ValidationError::new(
                ErrorCode::ChartCodeInvalid,
                format!(
                    "code must be 1..={MAX_CHART_CODE_LEN} characters, got {}",
                    entry.code.len()
                ),
            )
            .on_field("code"),
        );
    }

    match (&entry.parent_code, parent) {
        (None, _) => {
            if entry.level != 1 {
                errors.push(
                    ValidationError::new(
                        ErrorCode::ChartLevelInvalid,
                        format!("root entry {} must be level 1, got {}", entry.code, entry.level),
                    )
                    .on_field("level"),
                );
            }
        }
        (Some(parent_code), None) => {
            errors.push(
                ValidationError::new(
                    ErrorCode::ChartParentMissing,
                    format!("parent chart entry {parent_code} not found"),
                )
                .on_field("parentCode"),
            );
        }
        (Some(_), Some(parent)) => {
            if entry.account_type != parent.account_type {
                errors.push(
                    ValidationError::new(
                        ErrorCode::ChartTypeMismatch,
                        format!(
                            "type must match parent: {} is {} but parent {} is {}",
                            entry.code, entry.account_type, parent.code, parent.account_type
                        ),
                    )
                    .on_field("accountType"),
                );
            }
            if entry.level != parent.level + 1 {
                errors.push(
                    ValidationError::new(
                        ErrorCode::ChartLevelInvalid,
                        format!(
                            "level must be parent level + 1: {} is level {} under level {}",
                            entry.code, entry.level, parent.level
                        ),
                    )
                    .on_field("level"),
                );
            }
        }
    }

    errors
}

/// Validate a whole chart: every entry against its parent within the set.
#[must_use]
pub fn check_chart(entries: &[ChartOfAccount]) -> Vec<ValidationError> {
    let by_code: HashMap<&str, &ChartOfAccount> =
        entries.iter().map(|e| (e.code.as_str(), e)).collect();

    entries
        .iter()
        .flat_map(|entry| {
            let parent = entry
                .parent_code
                .as_deref()
                .and_then(|code| by_code.get(code).copied());
            check_chart_entry(entry, parent)
        })
        .collect()
}

/// Validate a ledger account against its resolved chart entry.
#[must_use]
pub fn check_ledger_account(
    account: &LedgerAccount,
    chart: Option<&ChartOfAccount>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let Some(chart) = chart else {
        errors.push(
            ValidationError::new(
                ErrorCode::ChartParentMissing,
                format!(
                    "chart entry {} referenced by ledger account {} not found",
                    account.chart_of_account_code, account.code
                ),
            )
            .on_field("chartOfAccountCode"),
        );
        return errors;
    };

    if account.account_type != chart.account_type {
        errors.push(
            ValidationError::new(
                ErrorCode::LedgerTypeMismatch,
                format!(
                    "ledger account {} is {} but chart entry {} is {}",
                    account.code, account.account_type, chart.code, chart.account_type
                ),
            )
            .on_field("accountType"),
        );
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodcfg_core::AccountType;

    #[test]
    fn child_with_wrong_type_is_rejected() {
        let root = ChartOfAccount::root("1000", "Assets", AccountType::Asset);
        let mut child = root.child("1001", "Loans");
        child.account_type = AccountType::Liability;
        let errors = check_chart_entry(&child, Some(&root));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::ChartTypeMismatch);
        assert!(errors[0].message.contains("type must match parent"));
    }

    #[test]
    fn well_formed_child_passes() {
        let root = ChartOfAccount::root("1000", "Assets", AccountType::Asset);
        let child = root.child("1001", "Loans");
        assert!(check_chart_entry(&child, Some(&root)).is_empty());
    }

    #[test]
    fn level_must_follow_parent() {
        let root = ChartOfAccount::root("1000", "Assets", AccountType::Asset);
        let mut child = root.child("1001", "Loans");
        child.level = 5;
        let errors = check_chart_entry(&child, Some(&root));
        assert_eq!(errors[0].code, ErrorCode::ChartLevelInvalid);
    }

    #[test]
    fn root_level_must_be_one() {
        let mut root = ChartOfAccount::root("1000", "Assets", AccountType::Asset);
        root.level = 2;
        let errors = check_chart_entry(&root, None);
        assert_eq!(errors[0].code, ErrorCode::ChartLevelInvalid);
    }

    #[test]
    fn code_length_is_bounded() {
        let root = ChartOfAccount::root("X".repeat(21), "Too long", AccountType::Asset);
        let errors = check_chart_entry(&root, None);
        assert_eq!(errors[0].code, ErrorCode::ChartCodeInvalid);
    }

    #[test]
    fn whole_chart_resolves_parents_by_code() {
        let root = ChartOfAccount::root("1000", "Assets", AccountType::Asset);
        let good = root.child("1001", "Loans");
        let mut orphan = root.child("1002", "Cash");
        orphan.parent_code = Some("nope".to_string());

        let errors = check_chart(&[root, good, orphan]);
        let codes: Vec<_> = errors.iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::ChartParentMissing]);
    }

    #[test]
    fn ledger_account_type_must_match_chart() {
        let chart = ChartOfAccount::root("2000", "Deposits", AccountType::Liability);
        let mut account = LedgerAccount::new("2000-01", "Deposits EUR", &chart, "EUR");
        account.account_type = AccountType::Asset;
        let errors = check_ledger_account(&account, Some(&chart));
        assert_eq!(errors[0].code, ErrorCode::LedgerTypeMismatch);
    }
}
