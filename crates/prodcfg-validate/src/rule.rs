//! Eligibility rule value syntax.
//!
//! A rule value is a string literal whose required syntax depends on the
//! operator: `IN`/`NOT_IN` take a JSON array, every other operator takes a
//! scalar parseable as the declared data type.

use chrono::NaiveDate;
use prodcfg_core::{RuleDataType, RuleOperator};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::{ErrorCode, ValidationError};

/// Validate an eligibility rule value against its operator and data type.
///
/// Attaches to the `ruleValue` field; does not block edits to other
/// fields, only submission.
pub fn validate_rule_value(
    operator: RuleOperator,
    data_type: RuleDataType,
    rule_value: &str,
) -> Result<(), ValidationError> {
    let trimmed = rule_value.trim();
    if trimmed.is_empty() {
        return Err(
            ValidationError::new(ErrorCode::RuleValueEmpty, "rule value must not be empty")
                .on_field("ruleValue"),
        );
    }

    if operator.takes_list() {
        // Element types are not checked beyond JSON validity.
        return match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(value) if value.is_array() => Ok(()),
            _ => Err(ValidationError::new(
                ErrorCode::RuleValueNotList,
                format!("operator {operator} requires a JSON array, e.g. [\"A\",\"B\"]"),
            )
            .on_field("ruleValue")),
        };
    }

    let ok = match data_type {
        RuleDataType::Number => Decimal::from_str(trimmed).is_ok(),
        RuleDataType::Boolean => matches!(trimmed, "true" | "false"),
        RuleDataType::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok(),
        RuleDataType::String | RuleDataType::Enum => true,
    };

    if ok {
        Ok(())
    } else {
        Err(ValidationError::new(
            ErrorCode::RuleValueTypeMismatch,
            format!("\"{trimmed}\" is not a valid {data_type} literal"),
        )
        .on_field("ruleValue"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_operator_takes_json_array() {
        assert!(validate_rule_value(
            RuleOperator::In,
            RuleDataType::String,
            "[\"A\",\"B\"]"
        )
        .is_ok());
        assert!(validate_rule_value(RuleOperator::NotIn, RuleDataType::Number, "[1,2,3]").is_ok());
    }

    #[test]
    fn bare_comma_list_is_rejected() {
        let error =
            validate_rule_value(RuleOperator::In, RuleDataType::String, "A,B").unwrap_err();
        assert_eq!(error.code, ErrorCode::RuleValueNotList);
        assert_eq!(error.field, Some("ruleValue"));
    }

    #[test]
    fn json_object_is_not_a_list() {
        let error =
            validate_rule_value(RuleOperator::In, RuleDataType::String, "{\"a\":1}").unwrap_err();
        assert_eq!(error.code, ErrorCode::RuleValueNotList);
    }

    #[test]
    fn scalar_operators_check_declared_type() {
        assert!(
            validate_rule_value(RuleOperator::GreaterThan, RuleDataType::Number, "17.5").is_ok()
        );
        assert!(validate_rule_value(RuleOperator::Equals, RuleDataType::Boolean, "true").is_ok());
        assert!(
            validate_rule_value(RuleOperator::LessThan, RuleDataType::Date, "2024-06-30").is_ok()
        );

        let error = validate_rule_value(RuleOperator::GreaterThan, RuleDataType::Number, "abc")
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::RuleValueTypeMismatch);
        let error =
            validate_rule_value(RuleOperator::Equals, RuleDataType::Boolean, "yes").unwrap_err();
        assert_eq!(error.code, ErrorCode::RuleValueTypeMismatch);
        let error =
            validate_rule_value(RuleOperator::Equals, RuleDataType::Date, "30/06/2024").unwrap_err();
        assert_eq!(error.code, ErrorCode::RuleValueTypeMismatch);
    }

    #[test]
    fn string_and_enum_accept_any_non_empty_literal() {
        assert!(
            validate_rule_value(RuleOperator::Contains, RuleDataType::String, "gold").is_ok()
        );
        assert!(validate_rule_value(RuleOperator::Equals, RuleDataType::Enum, "RESIDENT").is_ok());
    }

    #[test]
    fn empty_value_is_rejected_for_every_operator() {
        for operator in [RuleOperator::Equals, RuleOperator::In] {
            let error =
                validate_rule_value(operator, RuleDataType::String, "   ").unwrap_err();
            assert_eq!(error.code, ErrorCode::RuleValueEmpty);
        }
    }
}
