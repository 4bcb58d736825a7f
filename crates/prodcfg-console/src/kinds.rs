//! Binding of each row spec to its tab, rows, and submit-time rules.

use prodcfg_client::ReferenceData;
use prodcfg_core::{
    ConfigRow, EligibilityRuleSpec, EntityId, FeeSpec, GlMappingSpec, InterestRateSpec, LimitSpec,
    PenaltySpec, PeriodSpec, ProductConfiguration, Stored,
};
use prodcfg_validate::{
    check_fee, check_mapping, check_penalty, check_window, field_policy, normalize_fee,
    validate_rule_value, would_duplicate, ErrorCode, ValidationError,
};

use crate::form::TabState;

/// Everything submit-time validation may need to resolve a draft against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// The product's current row set.
    pub configuration: &'a ProductConfiguration,
    /// Cached reference catalogs.
    pub reference: &'a ReferenceData,
    /// Row under edit, excluded from uniqueness checks.
    pub editing: Option<EntityId>,
}

/// The per-kind tab states of one product console.
#[derive(Debug, Clone, Default)]
pub struct Tabs {
    /// Interest rates tab.
    pub interest_rates: TabState<InterestRateSpec>,
    /// Fees tab.
    pub fees: TabState<FeeSpec>,
    /// Limits tab.
    pub limits: TabState<LimitSpec>,
    /// Periods tab.
    pub periods: TabState<PeriodSpec>,
    /// Penalties tab.
    pub penalties: TabState<PenaltySpec>,
    /// Eligibility rules tab.
    pub eligibility_rules: TabState<EligibilityRuleSpec>,
    /// GL mappings tab.
    pub gl_mappings: TabState<GlMappingSpec>,
}

/// A row spec the console can drive through its tab.
///
/// Locates the kind's tab and stored rows, projects a draft into the exact
/// payload that goes on the wire, and runs the kind's submit-time rules.
pub trait TabKind: ConfigRow + Clone {
    /// This kind's tab.
    fn tab(tabs: &Tabs) -> &TabState<Self>;
    /// This kind's tab, mutably.
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self>;
    /// This kind's stored rows.
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>];

    /// Pure projection from draft to outgoing payload. Field-clearing
    /// rules live here, not in change handlers.
    #[must_use]
    fn project(self, _cx: &ValidationContext<'_>) -> Self {
        self
    }

    /// Submit-time validation of a projected draft.
    fn validate(&self, cx: &ValidationContext<'_>) -> Vec<ValidationError>;
}

fn window_findings(spec: &impl prodcfg_core::Windowed) -> Vec<ValidationError> {
    check_window(spec.window()).into_iter().collect()
}

impl TabKind for InterestRateSpec {
    fn tab(tabs: &Tabs) -> &TabState<Self> {
        &tabs.interest_rates
    }
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self> {
        &mut tabs.interest_rates
    }
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>] {
        &configuration.interest_rates
    }
    fn validate(&self, _cx: &ValidationContext<'_>) -> Vec<ValidationError> {
        window_findings(self)
    }
}

impl TabKind for FeeSpec {
    fn tab(tabs: &Tabs) -> &TabState<Self> {
        &tabs.fees
    }
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self> {
        &mut tabs.fees
    }
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>] {
        &configuration.fees
    }
    fn project(mut self, _cx: &ValidationContext<'_>) -> Self {
        normalize_fee(&mut self);
        let policy = field_policy(self.calculation_base);
        let (amount, percentage) = policy.apply(self.fee_amount, self.fee_percentage);
        self.fee_amount = amount;
        self.fee_percentage = percentage;
        self
    }
    fn validate(&self, _cx: &ValidationContext<'_>) -> Vec<ValidationError> {
        let mut errors = window_findings(self);
        errors.extend(check_fee(self));
        errors
    }
}

impl TabKind for LimitSpec {
    fn tab(tabs: &Tabs) -> &TabState<Self> {
        &tabs.limits
    }
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self> {
        &mut tabs.limits
    }
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>] {
        &configuration.limits
    }
    fn validate(&self, _cx: &ValidationContext<'_>) -> Vec<ValidationError> {
        window_findings(self)
    }
}

impl TabKind for PeriodSpec {
    fn tab(tabs: &Tabs) -> &TabState<Self> {
        &tabs.periods
    }
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self> {
        &mut tabs.periods
    }
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>] {
        &configuration.periods
    }
    fn validate(&self, _cx: &ValidationContext<'_>) -> Vec<ValidationError> {
        window_findings(self)
    }
}

impl TabKind for PenaltySpec {
    fn tab(tabs: &Tabs) -> &TabState<Self> {
        &tabs.penalties
    }
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self> {
        &mut tabs.penalties
    }
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>] {
        &configuration.penalties
    }
    fn project(mut self, _cx: &ValidationContext<'_>) -> Self {
        let policy = field_policy(self.calculation_base);
        let (amount, percentage) = policy.apply(self.amount, self.percentage);
        self.amount = amount;
        self.percentage = percentage;
        self
    }
    fn validate(&self, _cx: &ValidationContext<'_>) -> Vec<ValidationError> {
        let mut errors = window_findings(self);
        errors.extend(check_penalty(self));
        errors
    }
}

impl TabKind for EligibilityRuleSpec {
    fn tab(tabs: &Tabs) -> &TabState<Self> {
        &tabs.eligibility_rules
    }
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self> {
        &mut tabs.eligibility_rules
    }
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>] {
        &configuration.eligibility_rules
    }
    fn validate(&self, _cx: &ValidationContext<'_>) -> Vec<ValidationError> {
        let mut errors = window_findings(self);
        if let Err(e) = validate_rule_value(self.operator, self.data_type, &self.rule_value) {
            errors.push(e);
        }
        errors
    }
}

impl TabKind for GlMappingSpec {
    fn tab(tabs: &Tabs) -> &TabState<Self> {
        &tabs.gl_mappings
    }
    fn tab_mut(tabs: &mut Tabs) -> &mut TabState<Self> {
        &mut tabs.gl_mappings
    }
    fn rows(configuration: &ProductConfiguration) -> &[Stored<Self>] {
        &configuration.gl_mappings
    }
    fn validate(&self, cx: &ValidationContext<'_>) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if would_duplicate(
            &cx.configuration.gl_mappings,
            self.mapping_type,
            cx.editing,
        ) {
            errors.push(
                ValidationError::new(
                    ErrorCode::DuplicateMapping,
                    format!("mapping of type {} already exists", self.mapping_type),
                )
                .on_field("mappingType"),
            );
        }
        errors.extend(check_mapping(
            self,
            cx.reference.ledger_account(&self.ledger_account_code),
        ));
        errors
    }
}
