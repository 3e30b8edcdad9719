//! Profit-sharing rule configuration.
//!
//! This module defines [`ProfitSharingRules`], the single per-project rule
//! record, together with the [`FormulaType`] selector and the tier and group
//! sub-configurations used by some formulas.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The profit-sharing policies the engine knows how to compute.
///
/// # Example
///
/// ```
/// use profit_sharing_engine::models::FormulaType;
///
/// assert_eq!(FormulaType::parse("TIERED"), Some(FormulaType::Tiered));
/// assert_eq!(FormulaType::parse("BOGUS"), None);
/// assert_eq!(FormulaType::FixedPlusPercent.as_str(), "FIXED_PLUS_PERCENT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormulaType {
    /// A constant amount whenever there is profit.
    FixedOnly,
    /// A flat percentage of net profit.
    PercentSimple,
    /// A constant amount plus a flat percentage.
    FixedPlusPercent,
    /// Progressive marginal brackets over net profit.
    Tiered,
    /// A percentage gated by a minimum profit and capped by a maximum share.
    SpecialFormula,
    /// Independent stakeholder cuts, one per group.
    Grouped,
    /// A base fee plus increments unlocked at threshold multiples.
    Dynamic,
}

impl FormulaType {
    /// Every formula type, in catalog order.
    pub const ALL: [FormulaType; 7] = [
        FormulaType::FixedOnly,
        FormulaType::PercentSimple,
        FormulaType::FixedPlusPercent,
        FormulaType::Tiered,
        FormulaType::SpecialFormula,
        FormulaType::Grouped,
        FormulaType::Dynamic,
    ];

    /// Returns the stored identifier for this formula type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormulaType::FixedOnly => "FIXED_ONLY",
            FormulaType::PercentSimple => "PERCENT_SIMPLE",
            FormulaType::FixedPlusPercent => "FIXED_PLUS_PERCENT",
            FormulaType::Tiered => "TIERED",
            FormulaType::SpecialFormula => "SPECIAL_FORMULA",
            FormulaType::Grouped => "GROUPED",
            FormulaType::Dynamic => "DYNAMIC",
        }
    }

    /// Parses a stored identifier. Matching is exact.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ft| ft.as_str() == value)
    }
}

impl fmt::Display for FormulaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bracket of a tiered schedule, covering `[min_profit, max_profit)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierConfig {
    /// Lower bound of the bracket.
    #[serde(default)]
    pub min_profit: Decimal,
    /// Upper bound of the bracket; `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_profit: Option<Decimal>,
    /// Rate applied to the profit falling inside the bracket.
    #[serde(default)]
    pub percent_rate: Decimal,
}

/// A named stakeholder cut used by the grouped formula.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Display name of the group.
    #[serde(default)]
    pub group_name: String,
    /// Rate applied to the full net profit for this group.
    #[serde(default)]
    pub percent_rate: Decimal,
    /// Members of the group. Informational only.
    #[serde(default)]
    pub members: Vec<String>,
}

/// The profit-sharing configuration for one project.
///
/// The record is a superset: every formula reads only the fields it needs and
/// ignores the rest. Missing numeric fields count as zero, a missing
/// `maximum_share` means uncapped and a missing or zero
/// `increment_threshold` falls back to 100000.
///
/// `formula_type` is kept as the stored identifier so that rules written by
/// an older or newer configuration screen still load; it is resolved when a
/// calculation runs.
///
/// # Example
///
/// ```
/// use profit_sharing_engine::models::{FormulaType, ProfitSharingRules};
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     percent_rate: Some(Decimal::from(10)),
///     ..ProfitSharingRules::new(FormulaType::PercentSimple)
/// };
/// assert_eq!(rules.formula(), Some(FormulaType::PercentSimple));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfitSharingRules {
    /// Identifier of the formula to apply (e.g. "TIERED").
    pub formula_type: String,
    /// Constant amount for the fixed formulas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Decimal>,
    /// Percentage for the percent and special formulas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_rate: Option<Decimal>,
    /// Brackets for the tiered formula, in any order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<TierConfig>,
    /// Profit below which the special formula pays nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_profit: Option<Decimal>,
    /// Cap on the special formula's share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_share: Option<Decimal>,
    /// Stakeholder groups for the grouped formula.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupConfig>,
    /// Base fee for the dynamic formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_amount: Option<Decimal>,
    /// Percentage of net profit paid per increment in the dynamic formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_percent: Option<Decimal>,
    /// Profit step that unlocks one increment in the dynamic formula.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub increment_threshold: Option<Decimal>,
}

impl ProfitSharingRules {
    /// Creates an otherwise empty rule set for the given formula.
    pub fn new(formula_type: FormulaType) -> Self {
        Self {
            formula_type: formula_type.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Resolves the stored identifier, if it names a known formula.
    pub fn formula(&self) -> Option<FormulaType> {
        FormulaType::parse(&self.formula_type)
    }
}
