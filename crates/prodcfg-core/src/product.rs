//! Product configuration rows and their enums.
//!
//! A bank product carries seven kinds of configuration: interest rates,
//! fees, limits, tenor periods, penalties, eligibility rules, and GL
//! mappings. Each kind except GL mappings is dated by an
//! [`EffectiveWindow`]; GL mappings are keyed by [`GlMappingType`] instead,
//! with at most one mapping per type.
//!
//! Every row kind comes as a `*Spec` payload (the fields the caller
//! controls) and a [`Stored`] wrapper that adds the service-assigned id.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::window::{EffectiveWindow, Windowed};
use crate::EntityId;

/// The seven kinds of product configuration, one tab each in the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKind {
    /// Interest rate rows.
    InterestRates,
    /// Fee rows.
    Fees,
    /// Limit rows.
    Limits,
    /// Tenor period rows.
    Periods,
    /// Penalty rows.
    Penalties,
    /// Eligibility rule rows.
    EligibilityRules,
    /// GL mapping rows.
    GlMappings,
}

impl ConfigKind {
    /// URL path segment under `/products/{id}/`.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::InterestRates => "rates",
            Self::Fees => "fees",
            Self::Limits => "limits",
            Self::Periods => "periods",
            Self::Penalties => "penalties",
            Self::EligibilityRules => "eligibility-rules",
            Self::GlMappings => "gl-mappings",
        }
    }

    /// Human-readable singular label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InterestRates => "interest rate",
            Self::Fees => "fee",
            Self::Limits => "limit",
            Self::Periods => "period",
            Self::Penalties => "penalty",
            Self::EligibilityRules => "eligibility rule",
            Self::GlMappings => "GL mapping",
        }
    }

    /// All kinds, in tab order.
    pub const ALL: [Self; 7] = [
        Self::InterestRates,
        Self::Fees,
        Self::Limits,
        Self::Periods,
        Self::Penalties,
        Self::EligibilityRules,
        Self::GlMappings,
    ];
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A row spec that belongs to one configuration kind.
///
/// Ties each spec type to its API path at the type level, so a request for
/// one kind cannot be sent down another kind's endpoint.
pub trait ConfigRow: Serialize + serde::de::DeserializeOwned {
    /// The configuration kind this spec belongs to.
    const KIND: ConfigKind;
}

impl ConfigRow for InterestRateSpec {
    const KIND: ConfigKind = ConfigKind::InterestRates;
}
impl ConfigRow for FeeSpec {
    const KIND: ConfigKind = ConfigKind::Fees;
}
impl ConfigRow for LimitSpec {
    const KIND: ConfigKind = ConfigKind::Limits;
}
impl ConfigRow for PeriodSpec {
    const KIND: ConfigKind = ConfigKind::Periods;
}
impl ConfigRow for PenaltySpec {
    const KIND: ConfigKind = ConfigKind::Penalties;
}
impl ConfigRow for EligibilityRuleSpec {
    const KIND: ConfigKind = ConfigKind::EligibilityRules;
}
impl ConfigRow for GlMappingSpec {
    const KIND: ConfigKind = ConfigKind::GlMappings;
}

/// A stored entity: a spec plus the id the service assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    /// Service-assigned identifier.
    pub id: EntityId,
    /// The caller-controlled fields.
    #[serde(flatten)]
    pub spec: T,
}

impl<T> Stored<T> {
    /// Wrap a spec with its stored id.
    #[must_use]
    pub const fn new(id: EntityId, spec: T) -> Self {
        Self { id, spec }
    }
}

impl<T: Windowed> Windowed for Stored<T> {
    fn window(&self) -> &EffectiveWindow {
        self.spec.window()
    }
}

/// Kind of GL posting a product mapping routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlMappingType {
    /// Principal/receivable postings.
    AssetAccount,
    /// Deposit/payable postings.
    LiabilityAccount,
    /// Fee postings.
    FeeAccount,
    /// Interest accrual/posting.
    InterestAccount,
    /// Revenue recognition.
    RevenueAccount,
    /// Expense recognition.
    ExpenseAccount,
}

impl GlMappingType {
    /// Wire form of this mapping type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssetAccount => "ASSET_ACCOUNT",
            Self::LiabilityAccount => "LIABILITY_ACCOUNT",
            Self::FeeAccount => "FEE_ACCOUNT",
            Self::InterestAccount => "INTEREST_ACCOUNT",
            Self::RevenueAccount => "REVENUE_ACCOUNT",
            Self::ExpenseAccount => "EXPENSE_ACCOUNT",
        }
    }

    /// All mapping types, in display order.
    pub const ALL: [Self; 6] = [
        Self::AssetAccount,
        Self::LiabilityAccount,
        Self::FeeAccount,
        Self::InterestAccount,
        Self::RevenueAccount,
        Self::ExpenseAccount,
    ];
}

impl fmt::Display for GlMappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of fee charged by a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeType {
    /// Recurring account maintenance fee.
    Maintenance,
    /// Per-transaction fee; carries a [`TransactionType`].
    Transaction,
    /// Account closure fee.
    Closure,
    /// Statement issuance fee.
    Statement,
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maintenance => f.write_str("MAINTENANCE"),
            Self::Transaction => f.write_str("TRANSACTION"),
            Self::Closure => f.write_str("CLOSURE"),
            Self::Statement => f.write_str("STATEMENT"),
        }
    }
}

/// Transaction kind a transaction fee applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Inbound deposits.
    Deposit,
    /// Outbound withdrawals.
    Withdrawal,
    /// Transfers between accounts.
    Transfer,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => f.write_str("DEPOSIT"),
            Self::Withdrawal => f.write_str("WITHDRAWAL"),
            Self::Transfer => f.write_str("TRANSFER"),
        }
    }
}

/// Quantity a fee or penalty is computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeCalculationBase {
    /// Flat amount, independent of any balance.
    Fixed,
    /// Percentage of the account balance.
    Balance,
    /// Percentage of the transaction amount.
    TransactionAmount,
    /// Percentage of the outstanding (loan) balance.
    OutstandingBalance,
}

impl FeeCalculationBase {
    /// Wire form of this calculation base.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Balance => "BALANCE",
            Self::TransactionAmount => "TRANSACTION_AMOUNT",
            Self::OutstandingBalance => "OUTSTANDING_BALANCE",
        }
    }
}

impl fmt::Display for FeeCalculationBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scope of a transaction limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LimitType {
    /// Cap on a single transaction.
    PerTransaction,
    /// Rolling daily cap.
    Daily,
    /// Rolling weekly cap.
    Weekly,
    /// Rolling monthly cap.
    Monthly,
}

/// Unit for a tenor period length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodUnit {
    /// Calendar days.
    Days,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

/// Event that triggers a penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyTrigger {
    /// Closing a term product before maturity.
    EarlyClosure,
    /// Balance fell below the product minimum.
    MinimumBalanceBreach,
    /// Scheduled payment missed.
    LatePayment,
}

/// Comparison operator of an eligibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleOperator {
    /// Exact match.
    Equals,
    /// Negated exact match.
    NotEquals,
    /// Strictly greater.
    GreaterThan,
    /// Greater or equal.
    GreaterThanOrEqual,
    /// Strictly less.
    LessThan,
    /// Less or equal.
    LessThanOrEqual,
    /// Membership in a list; rule value is a JSON array.
    In,
    /// Negated membership; rule value is a JSON array.
    NotIn,
    /// Substring match.
    Contains,
}

impl RuleOperator {
    /// Whether this operator takes a JSON array rule value.
    #[must_use]
    pub const fn takes_list(&self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Wire form of this operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Self::In => "IN",
            Self::NotIn => "NOT_IN",
            Self::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for RuleOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of an eligibility rule value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleDataType {
    /// Any non-empty string.
    String,
    /// Numeric literal.
    Number,
    /// `true` or `false`.
    Boolean,
    /// ISO `YYYY-MM-DD` date.
    Date,
    /// Named enum member, treated as a non-empty string.
    Enum,
}

impl fmt::Display for RuleDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("STRING"),
            Self::Number => f.write_str("NUMBER"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Date => f.write_str("DATE"),
            Self::Enum => f.write_str("ENUM"),
        }
    }
}

/// Category of bank product, which determines the GL mappings the product
/// must carry before accounts can be opened on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    /// Demand deposit account.
    CurrentAccount,
    /// Interest-bearing savings account.
    SavingsAccount,
    /// Fixed-tenor deposit.
    TermDeposit,
    /// Lending product.
    Loan,
}

impl ProductCategory {
    /// The GL mapping types a product of this category must carry.
    #[must_use]
    pub const fn required_mappings(&self) -> &'static [GlMappingType] {
        match self {
            Self::CurrentAccount | Self::SavingsAccount | Self::TermDeposit => {
                &[GlMappingType::LiabilityAccount, GlMappingType::InterestAccount]
            }
            Self::Loan => &[GlMappingType::AssetAccount, GlMappingType::InterestAccount],
        }
    }
}

/// Interest rate row, optionally tiered by balance band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRateSpec {
    /// Annual rate in percent.
    pub rate_percent: Decimal,
    /// Lower balance bound of the tier, `None` for unbounded.
    pub balance_from: Option<Decimal>,
    /// Upper balance bound of the tier, `None` for unbounded.
    pub balance_to: Option<Decimal>,
    /// Effective window.
    #[serde(flatten)]
    pub window: EffectiveWindow,
}

impl Windowed for InterestRateSpec {
    fn window(&self) -> &EffectiveWindow {
        &self.window
    }
}

/// Fee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSpec {
    /// Kind of fee.
    pub fee_type: FeeType,
    /// Transaction kind, only meaningful for [`FeeType::Transaction`].
    pub transaction_type: Option<TransactionType>,
    /// Quantity the fee is computed against.
    pub calculation_base: FeeCalculationBase,
    /// Flat amount; not applicable when the base is `TRANSACTION_AMOUNT`.
    pub fee_amount: Option<Decimal>,
    /// Percentage; not applicable when the base is `FIXED`.
    pub fee_percentage: Option<Decimal>,
    /// Fee currency.
    pub currency: String,
    /// Effective window.
    #[serde(flatten)]
    pub window: EffectiveWindow,
}

impl Windowed for FeeSpec {
    fn window(&self) -> &EffectiveWindow {
        &self.window
    }
}

/// Transaction limit row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitSpec {
    /// Scope of the limit.
    pub limit_type: LimitType,
    /// Cap amount.
    pub amount: Decimal,
    /// Effective window.
    #[serde(flatten)]
    pub window: EffectiveWindow,
}

impl Windowed for LimitSpec {
    fn window(&self) -> &EffectiveWindow {
        &self.window
    }
}

/// Tenor period row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSpec {
    /// Unit of the tenor length.
    pub period_unit: PeriodUnit,
    /// Tenor length in `period_unit`s.
    pub length: u32,
    /// Display label, e.g. "12 months".
    pub label: String,
    /// Effective window.
    #[serde(flatten)]
    pub window: EffectiveWindow,
}

impl Windowed for PeriodSpec {
    fn window(&self) -> &EffectiveWindow {
        &self.window
    }
}

/// Penalty row. Amount and percentage applicability follows the same
/// calculation-base gate as fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltySpec {
    /// Event that triggers the penalty.
    pub trigger: PenaltyTrigger,
    /// Quantity the penalty is computed against.
    pub calculation_base: FeeCalculationBase,
    /// Flat amount; not applicable when the base is `TRANSACTION_AMOUNT`.
    pub amount: Option<Decimal>,
    /// Percentage; not applicable when the base is `FIXED`.
    pub percentage: Option<Decimal>,
    /// Effective window.
    #[serde(flatten)]
    pub window: EffectiveWindow,
}

impl Windowed for PenaltySpec {
    fn window(&self) -> &EffectiveWindow {
        &self.window
    }
}

/// Eligibility rule row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRuleSpec {
    /// Customer attribute the rule tests, e.g. "age" or "residency".
    pub field_name: String,
    /// Comparison operator.
    pub operator: RuleOperator,
    /// Declared type of the rule value.
    pub data_type: RuleDataType,
    /// Literal the attribute is compared against; a JSON array for
    /// `IN`/`NOT_IN`, a scalar otherwise.
    pub rule_value: String,
    /// Effective window.
    #[serde(flatten)]
    pub window: EffectiveWindow,
}

impl Windowed for EligibilityRuleSpec {
    fn window(&self) -> &EffectiveWindow {
        &self.window
    }
}

/// GL mapping row. Undated; uniqueness per [`GlMappingType`] is the
/// product-level invariant instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlMappingSpec {
    /// Kind of posting this mapping routes.
    pub mapping_type: GlMappingType,
    /// Code of the target ledger account; must be active and of an
    /// account type allowed for `mapping_type`.
    pub ledger_account_code: String,
}

/// Stored interest rate row.
pub type InterestRate = Stored<InterestRateSpec>;
/// Stored fee row.
pub type Fee = Stored<FeeSpec>;
/// Stored limit row.
pub type Limit = Stored<LimitSpec>;
/// Stored tenor period row.
pub type Period = Stored<PeriodSpec>;
/// Stored penalty row.
pub type Penalty = Stored<PenaltySpec>;
/// Stored eligibility rule row.
pub type EligibilityRule = Stored<EligibilityRuleSpec>;
/// Stored GL mapping row.
pub type GlMapping = Stored<GlMappingSpec>;

/// The full configuration row set for one product, as returned by a full
/// refetch after any write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfiguration {
    /// The product these rows belong to.
    pub product_id: EntityId,
    /// Product category, which fixes the required GL mappings.
    pub category: ProductCategory,
    /// Interest rate rows.
    #[serde(default)]
    pub interest_rates: Vec<InterestRate>,
    /// Fee rows.
    #[serde(default)]
    pub fees: Vec<Fee>,
    /// Limit rows.
    #[serde(default)]
    pub limits: Vec<Limit>,
    /// Tenor period rows.
    #[serde(default)]
    pub periods: Vec<Period>,
    /// Penalty rows.
    #[serde(default)]
    pub penalties: Vec<Penalty>,
    /// Eligibility rule rows.
    #[serde(default)]
    pub eligibility_rules: Vec<EligibilityRule>,
    /// GL mapping rows.
    #[serde(default)]
    pub gl_mappings: Vec<GlMapping>,
}

impl ProductConfiguration {
    /// An empty configuration for a product.
    #[must_use]
    pub const fn empty(product_id: EntityId, category: ProductCategory) -> Self {
        Self {
            product_id,
            category,
            interest_rates: Vec::new(),
            fees: Vec::new(),
            limits: Vec::new(),
            periods: Vec::new(),
            penalties: Vec::new(),
            eligibility_rules: Vec::new(),
            gl_mappings: Vec::new(),
        }
    }

    /// Look up a mapping by type.
    #[must_use]
    pub fn mapping(&self, mapping_type: GlMappingType) -> Option<&GlMapping> {
        self.gl_mappings
            .iter()
            .find(|m| m.spec.mapping_type == mapping_type)
    }
}
