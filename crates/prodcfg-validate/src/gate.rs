//! Calculation-base field gate for fees and penalties.
//!
//! The calculation base decides which of the two numeric fields (flat
//! amount, percentage) apply. Transaction fees on transfers additionally
//! narrow the set of legal bases. All entry points that can change the
//! base (edit the base, edit the fee type, edit the transaction type)
//! funnel through one idempotent [`normalize_fee`].

use prodcfg_core::{FeeCalculationBase, FeeSpec, FeeType, PenaltySpec, TransactionType};
use rust_decimal::Decimal;

use crate::{ErrorCode, ValidationError};

/// Which numeric fields a calculation base enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    /// Whether the flat amount field applies.
    pub amount_enabled: bool,
    /// Whether the percentage field applies.
    pub percentage_enabled: bool,
}

impl FieldPolicy {
    /// Clear whichever fields the policy disables.
    ///
    /// Called by the submit projection so a value typed before switching
    /// bases never reaches the wire.
    #[must_use]
    pub const fn apply(
        &self,
        amount: Option<Decimal>,
        percentage: Option<Decimal>,
    ) -> (Option<Decimal>, Option<Decimal>) {
        (
            if self.amount_enabled { amount } else { None },
            if self.percentage_enabled {
                percentage
            } else {
                None
            },
        )
    }
}

/// Field applicability for a calculation base.
#[must_use]
pub const fn field_policy(base: FeeCalculationBase) -> FieldPolicy {
    match base {
        FeeCalculationBase::Fixed => FieldPolicy {
            amount_enabled: true,
            percentage_enabled: false,
        },
        FeeCalculationBase::TransactionAmount => FieldPolicy {
            amount_enabled: false,
            percentage_enabled: true,
        },
        FeeCalculationBase::Balance | FeeCalculationBase::OutstandingBalance => FieldPolicy {
            amount_enabled: true,
            percentage_enabled: true,
        },
    }
}

/// Calculation bases legal for a fee kind.
///
/// Transfer transaction fees only support flat or transaction-amount
/// pricing; everything else may use any base.
#[must_use]
pub const fn allowed_bases(
    fee_type: FeeType,
    transaction_type: Option<TransactionType>,
) -> &'static [FeeCalculationBase] {
    match (fee_type, transaction_type) {
        (FeeType::Transaction, Some(TransactionType::Transfer)) => &[
            FeeCalculationBase::Fixed,
            FeeCalculationBase::TransactionAmount,
        ],
        _ => &[
            FeeCalculationBase::Fixed,
            FeeCalculationBase::Balance,
            FeeCalculationBase::TransactionAmount,
            FeeCalculationBase::OutstandingBalance,
        ],
    }
}

/// Normalize a fee draft after any of its gating fields changed.
///
/// Idempotent; the single entry point for "change calculation base",
/// "change fee type", and "change transaction type". Drops the transaction
/// type of non-transaction fees and resets an illegal base to `FIXED`.
/// Typed amounts are kept until submit projection clears them.
pub fn normalize_fee(spec: &mut FeeSpec) {
    if spec.fee_type != FeeType::Transaction {
        spec.transaction_type = None;
    }
    if !allowed_bases(spec.fee_type, spec.transaction_type).contains(&spec.calculation_base) {
        spec.calculation_base = FeeCalculationBase::Fixed;
    }
}

/// Validate a fee's numeric fields against its calculation base.
#[must_use]
pub fn check_fee(spec: &FeeSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !allowed_bases(spec.fee_type, spec.transaction_type).contains(&spec.calculation_base) {
        errors.push(
            ValidationError::new(
                ErrorCode::BaseNotAllowed,
                format!(
                    "calculation base {} is not allowed for {} fees",
                    spec.calculation_base, spec.fee_type
                ),
            )
            .on_field("calculationBase"),
        );
    }

    collect_base_findings(
        spec.calculation_base,
        spec.fee_amount,
        spec.fee_percentage,
        "feeAmount",
        "feePercentage",
        &mut errors,
    );
    errors
}

/// Validate a penalty's numeric fields against its calculation base.
#[must_use]
pub fn check_penalty(spec: &PenaltySpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    collect_base_findings(
        spec.calculation_base,
        spec.amount,
        spec.percentage,
        "amount",
        "percentage",
        &mut errors,
    );
    errors
}

fn collect_base_findings(
    base: FeeCalculationBase,
    amount: Option<Decimal>,
    percentage: Option<Decimal>,
    amount_field: &'static str,
    percentage_field: &'static str,
    errors: &mut Vec<ValidationError>,
) {
    let policy = field_policy(base);

    if amount.is_some() && !policy.amount_enabled {
        errors.push(
            ValidationError::new(
                ErrorCode::AmountNotApplicable,
                format!("amount does not apply with calculation base {base}"),
            )
            .on_field(amount_field),
        );
    }
    if percentage.is_some() && !policy.percentage_enabled {
        errors.push(
            ValidationError::new(
                ErrorCode::PercentageNotApplicable,
                format!("percentage does not apply with calculation base {base}"),
            )
            .on_field(percentage_field),
        );
    }

    // What a base requires: FIXED prices by amount, TRANSACTION_AMOUNT by
    // percentage, the balance bases by at least one of the two.
    let missing = match base {
        FeeCalculationBase::Fixed => amount.is_none().then_some(amount_field),
        FeeCalculationBase::TransactionAmount => {
            percentage.is_none().then_some(percentage_field)
        }
        FeeCalculationBase::Balance | FeeCalculationBase::OutstandingBalance => {
            (amount.is_none() && percentage.is_none()).then_some(amount_field)
        }
    };
    if let Some(field) = missing {
        errors.push(
            ValidationError::new(
                ErrorCode::MissingBaseField,
                format!("calculation base {base} requires a value"),
            )
            .on_field(field),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prodcfg_core::EffectiveWindow;
    use rust_decimal_macros::dec;

    fn fee(base: FeeCalculationBase) -> FeeSpec {
        FeeSpec {
            fee_type: FeeType::Maintenance,
            transaction_type: None,
            calculation_base: base,
            fee_amount: None,
            fee_percentage: None,
            currency: "EUR".to_string(),
            window: EffectiveWindow::starting(
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ),
        }
    }

    #[test]
    fn fixed_disables_percentage() {
        let policy = field_policy(FeeCalculationBase::Fixed);
        assert!(policy.amount_enabled);
        assert!(!policy.percentage_enabled);
    }

    #[test]
    fn policy_apply_clears_disabled_fields() {
        let policy = field_policy(FeeCalculationBase::Fixed);
        let (amount, percentage) = policy.apply(Some(dec!(5)), Some(dec!(1.5)));
        assert_eq!(amount, Some(dec!(5)));
        assert_eq!(percentage, None);

        let policy = field_policy(FeeCalculationBase::TransactionAmount);
        let (amount, percentage) = policy.apply(Some(dec!(5)), Some(dec!(1.5)));
        assert_eq!(amount, None);
        assert_eq!(percentage, Some(dec!(1.5)));
    }

    #[test]
    fn transfer_fee_narrows_bases() {
        let narrowed = allowed_bases(FeeType::Transaction, Some(TransactionType::Transfer));
        assert_eq!(narrowed, &[
            FeeCalculationBase::Fixed,
            FeeCalculationBase::TransactionAmount
        ]);
        let full = allowed_bases(FeeType::Transaction, Some(TransactionType::Deposit));
        assert_eq!(full.len(), 4);
    }

    #[test]
    fn normalize_resets_illegal_base_to_fixed() {
        let mut spec = fee(FeeCalculationBase::Balance);
        spec.fee_type = FeeType::Transaction;
        spec.transaction_type = Some(TransactionType::Transfer);
        normalize_fee(&mut spec);
        assert_eq!(spec.calculation_base, FeeCalculationBase::Fixed);
        // Idempotent: a second pass changes nothing.
        let snapshot = spec.clone();
        normalize_fee(&mut spec);
        assert_eq!(spec, snapshot);
    }

    #[test]
    fn normalize_drops_transaction_type_of_non_transaction_fee() {
        let mut spec = fee(FeeCalculationBase::Fixed);
        spec.transaction_type = Some(TransactionType::Transfer);
        normalize_fee(&mut spec);
        assert_eq!(spec.transaction_type, None);
    }

    #[test]
    fn normalize_keeps_legal_drafts_untouched() {
        let mut spec = fee(FeeCalculationBase::OutstandingBalance);
        spec.fee_amount = Some(dec!(10));
        let snapshot = spec.clone();
        normalize_fee(&mut spec);
        assert_eq!(spec, snapshot);
    }

    #[test]
    fn fixed_fee_requires_amount() {
        let spec = fee(FeeCalculationBase::Fixed);
        let codes: Vec<_> = check_fee(&spec).iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::MissingBaseField]);
    }

    #[test]
    fn stray_percentage_on_fixed_fee_is_flagged() {
        let mut spec = fee(FeeCalculationBase::Fixed);
        spec.fee_amount = Some(dec!(3));
        spec.fee_percentage = Some(dec!(0.5));
        let codes: Vec<_> = check_fee(&spec).iter().map(|e| e.code).collect();
        assert_eq!(codes, vec![ErrorCode::PercentageNotApplicable]);
    }

    #[test]
    fn penalty_follows_same_gate() {
        let spec = PenaltySpec {
            trigger: prodcfg_core::PenaltyTrigger::EarlyClosure,
            calculation_base: FeeCalculationBase::TransactionAmount,
            amount: Some(dec!(25)),
            percentage: None,
            window: EffectiveWindow::starting(
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ),
        };
        let codes: Vec<_> = check_penalty(&spec).iter().map(|e| e.code).collect();
        assert!(codes.contains(&ErrorCode::AmountNotApplicable));
        assert!(codes.contains(&ErrorCode::MissingBaseField));
    }
}
