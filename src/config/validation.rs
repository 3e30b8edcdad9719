//! Rule validation for the configuration boundary.
//!
//! The calculation engine accepts any rule set and applies defaults. This
//! module is where stricter checks live: it reports configuration smells as
//! warnings so the configuration screen and the loader can surface them.
//! Only the fields read by the selected formula are inspected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FormulaType, ProfitSharingRules, TierConfig};

/// How serious a rule warning is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Probably intentional, worth a second look.
    Low,
    /// Likely to produce a surprising distribution.
    Medium,
    /// The rules cannot be calculated as configured.
    High,
}

/// A configuration issue found in a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: Severity,
}

impl RuleWarning {
    fn new(code: &str, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            severity,
        }
    }
}

/// Inspects a rule set and returns every warning found.
///
/// An empty list means the rules look sound. Warnings never block a
/// calculation.
///
/// # Example
///
/// ```
/// use profit_sharing_engine::config::validate_rules;
/// use profit_sharing_engine::models::ProfitSharingRules;
///
/// let rules = ProfitSharingRules {
///     formula_type: "PERCENTAGE".to_string(),
///     ..ProfitSharingRules::default()
/// };
/// let warnings = validate_rules(&rules);
/// assert_eq!(warnings[0].code, "UNKNOWN_FORMULA_TYPE");
/// ```
pub fn validate_rules(rules: &ProfitSharingRules) -> Vec<RuleWarning> {
    let mut warnings = Vec::new();

    let Some(formula_type) = rules.formula() else {
        warnings.push(RuleWarning::new(
            "UNKNOWN_FORMULA_TYPE",
            format!("Unknown formula type '{}'", rules.formula_type),
            Severity::High,
        ));
        return warnings;
    };

    match formula_type {
        FormulaType::FixedOnly => {
            check_required(&mut warnings, "fixed_amount", rules.fixed_amount);
        }
        FormulaType::PercentSimple => {
            check_required(&mut warnings, "percent_rate", rules.percent_rate);
        }
        FormulaType::FixedPlusPercent => {
            check_required(&mut warnings, "fixed_amount", rules.fixed_amount);
            check_required(&mut warnings, "percent_rate", rules.percent_rate);
        }
        FormulaType::Tiered => check_tiers(&mut warnings, &rules.tiers),
        FormulaType::SpecialFormula => {
            check_required(&mut warnings, "percent_rate", rules.percent_rate);
            check_non_negative(&mut warnings, "minimum_profit", rules.minimum_profit);
            check_non_negative(&mut warnings, "maximum_share", rules.maximum_share);
        }
        FormulaType::Grouped => {
            if rules.groups.is_empty() {
                warnings.push(RuleWarning::new(
                    "EMPTY_GROUPS",
                    "No groups configured; the share will always be zero",
                    Severity::Medium,
                ));
            }
            for group in &rules.groups {
                check_non_negative(
                    &mut warnings,
                    &format!("groups[{}].percent_rate", group.group_name),
                    Some(group.percent_rate),
                );
            }
            let total_rate = rules
                .groups
                .iter()
                .try_fold(Decimal::ZERO, |total, g| total.checked_add(g.percent_rate));
            match total_rate {
                Some(total_rate) if total_rate <= Decimal::ONE_HUNDRED => {}
                Some(total_rate) => warnings.push(RuleWarning::new(
                    "GROUP_RATES_EXCEED_100",
                    format!(
                        "Group rates add up to {}%; groups are paid independently",
                        total_rate.normalize()
                    ),
                    Severity::Low,
                )),
                None => warnings.push(RuleWarning::new(
                    "GROUP_RATES_EXCEED_100",
                    "Group rates add up to more than the decimal range; groups are paid independently",
                    Severity::Low,
                )),
            }
        }
        FormulaType::Dynamic => {
            check_required(&mut warnings, "base_amount", rules.base_amount);
            check_non_negative(&mut warnings, "increment_percent", rules.increment_percent);
            check_non_negative(&mut warnings, "increment_threshold", rules.increment_threshold);
        }
    }

    warnings
}

fn check_required(warnings: &mut Vec<RuleWarning>, field: &str, value: Option<Decimal>) {
    match value {
        None => warnings.push(RuleWarning::new(
            "MISSING_FIELD",
            format!("'{}' is not set and will be treated as 0", field),
            Severity::Low,
        )),
        Some(_) => check_non_negative(warnings, field, value),
    }
}

fn check_non_negative(warnings: &mut Vec<RuleWarning>, field: &str, value: Option<Decimal>) {
    if let Some(value) = value {
        if value < Decimal::ZERO {
            warnings.push(RuleWarning::new(
                "NEGATIVE_VALUE",
                format!("'{}' is negative ({})", field, value.normalize()),
                Severity::Medium,
            ));
        }
    }
}

fn check_tiers(warnings: &mut Vec<RuleWarning>, tiers: &[TierConfig]) {
    if tiers.is_empty() {
        warnings.push(RuleWarning::new(
            "EMPTY_TIERS",
            "No tiers configured; the share will always be zero",
            Severity::Medium,
        ));
        return;
    }

    let mut sorted: Vec<&TierConfig> = tiers.iter().collect();
    sorted.sort_by(|a, b| a.min_profit.cmp(&b.min_profit));

    for (index, tier) in sorted.iter().enumerate() {
        let label = format!("tier {}", index + 1);
        check_non_negative(warnings, &format!("{} min_profit", label), Some(tier.min_profit));
        check_non_negative(warnings, &format!("{} percent_rate", label), Some(tier.percent_rate));

        if let Some(max_profit) = tier.max_profit {
            if max_profit <= tier.min_profit {
                warnings.push(RuleWarning::new(
                    "TIER_INVERTED",
                    format!(
                        "{} has max_profit {} not above min_profit {}",
                        label,
                        max_profit.normalize(),
                        tier.min_profit.normalize()
                    ),
                    Severity::High,
                ));
            }
        }
    }

    if let Some(first) = sorted.first() {
        if first.min_profit > Decimal::ZERO {
            warnings.push(RuleWarning::new(
                "TIER_GAP",
                format!(
                    "Profit below {} is not covered by any tier",
                    first.min_profit.normalize()
                ),
                Severity::Low,
            ));
        }
    }

    for (index, pair) in sorted.windows(2).enumerate() {
        let (current, next) = (pair[0], pair[1]);
        match current.max_profit {
            None => warnings.push(RuleWarning::new(
                "TIER_OVERLAP",
                format!(
                    "tier {} is unbounded and overlaps every later tier",
                    index + 1
                ),
                Severity::Medium,
            )),
            Some(max_profit) if max_profit > next.min_profit => {
                warnings.push(RuleWarning::new(
                    "TIER_OVERLAP",
                    format!(
                        "tiers {} and {} overlap between {} and {}",
                        index + 1,
                        index + 2,
                        next.min_profit.normalize(),
                        max_profit.normalize()
                    ),
                    Severity::Medium,
                ))
            }
            Some(max_profit) if max_profit < next.min_profit => {
                warnings.push(RuleWarning::new(
                    "TIER_GAP",
                    format!(
                        "Profit between {} and {} is not covered by any tier",
                        max_profit.normalize(),
                        next.min_profit.normalize()
                    ),
                    Severity::Low,
                ))
            }
            Some(_) => {}
        }
    }
}
