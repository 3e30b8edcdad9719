//! Grouped profit sharing.
//!
//! Each configured group takes its own percentage of the full net profit.
//! Groups are independent stakeholder cuts, not a partition: their rates do
//! not need to add up to 100.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{FormulaType, ProfitSharingBreakdown, ProfitSharingInput, ProfitSharingResult};

use super::percent::{OrOverflow, checked_sum, percent_of};

/// Calculates a GROUPED share.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when a group's cut or the combined total leaves the decimal range.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_grouped;
/// use profit_sharing_engine::models::{
///     FormulaType, GroupConfig, ProfitSharingInput, ProfitSharingRules,
/// };
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     groups: vec![
///         GroupConfig { group_name: "A".to_string(), percent_rate: Decimal::from(10), members: vec![] },
///         GroupConfig { group_name: "B".to_string(), percent_rate: Decimal::from(15), members: vec![] },
///     ],
///     ..ProfitSharingRules::new(FormulaType::Grouped)
/// };
/// let input = ProfitSharingInput::from_totals(
///     "prj_001", "Torre Norte", Decimal::from(150_000), Decimal::from(50_000), rules,
/// )?;
///
/// let result = calculate_grouped(&input)?;
/// assert_eq!(result.total_share, Decimal::from(25_000));
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_grouped(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let net_profit = input.net_profit;
    let groups = &input.rules.groups;

    if net_profit <= Decimal::ZERO || groups.is_empty() {
        let details = if groups.is_empty() {
            "Sin grupos configurados: no se calcula participación".to_string()
        } else {
            format!(
                "Sin utilidad neta (${}): no se reparte entre {} grupo(s)",
                net_profit.normalize(),
                groups.len()
            )
        };
        return ProfitSharingResult::from_breakdown(input, FormulaType::Grouped, vec![], details);
    }

    let breakdown = groups
        .iter()
        .map(|group| {
            let amount = percent_of(net_profit, group.percent_rate).or_overflow(input)?;
            let description = if group.members.is_empty() {
                format!("{}: {}%", group.group_name, group.percent_rate.normalize())
            } else {
                format!(
                    "{}: {}% ({} integrante(s))",
                    group.group_name,
                    group.percent_rate.normalize(),
                    group.members.len()
                )
            };
            Ok(ProfitSharingBreakdown::new(description, amount, Some(group.percent_rate)))
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total_rate = checked_sum(groups.iter().map(|group| group.percent_rate)).or_overflow(input)?;
    let parts: Vec<String> = groups
        .iter()
        .zip(&breakdown)
        .map(|(group, line)| format!("{} ${}", group.group_name, line.amount.normalize()))
        .collect();
    let details = format!(
        "Utilidad neta ${} repartida en {} grupo(s) ({}% en total): {}",
        net_profit.normalize(),
        groups.len(),
        total_rate.normalize(),
        parts.join(", ")
    );

    ProfitSharingResult::from_breakdown(input, FormulaType::Grouped, breakdown, details)
}
