//! Tiered (marginal bracket) profit sharing.
//!
//! ## Bracket Structure
//!
//! Each tier covers `[min_profit, max_profit)` with its own rate. Profit is
//! charged bracket by bracket, like progressive tax brackets: money in a
//! higher bracket is charged only at that bracket's rate.
//!
//! - Tiers are sorted by `min_profit` before use; caller order is not trusted.
//! - Gaps between tiers pay nothing for the uncovered profit.
//! - Overlapping tiers charge the overlap once per tier.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    FormulaType, ProfitSharingBreakdown, ProfitSharingInput, ProfitSharingResult, TierConfig,
};

use super::percent::{OrOverflow, checked_sum, percent_of};

/// Calculates a TIERED share.
///
/// Returns a zero share with an empty breakdown when there is no profit or no
/// tier is configured. Otherwise emits one breakdown line per tier that
/// receives a non-zero slice of profit, in ascending tier order.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when a bracket slice or its share leaves the decimal range.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_tiered;
/// use profit_sharing_engine::models::{
///     FormulaType, ProfitSharingInput, ProfitSharingRules, TierConfig,
/// };
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     tiers: vec![
///         TierConfig {
///             min_profit: Decimal::ZERO,
///             max_profit: Some(Decimal::from(50_000)),
///             percent_rate: Decimal::from(5),
///         },
///         TierConfig {
///             min_profit: Decimal::from(50_000),
///             max_profit: None,
///             percent_rate: Decimal::from(10),
///         },
///     ],
///     ..ProfitSharingRules::new(FormulaType::Tiered)
/// };
/// let input = ProfitSharingInput::from_totals(
///     "prj_001", "Torre Norte", Decimal::from(130_000), Decimal::from(50_000), rules,
/// )?;
///
/// // 50000 × 5% + 30000 × 10%
/// let result = calculate_tiered(&input)?;
/// assert_eq!(result.total_share, Decimal::from(5500));
/// assert_eq!(result.breakdown.len(), 2);
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_tiered(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let net_profit = input.net_profit;

    if net_profit <= Decimal::ZERO || input.rules.tiers.is_empty() {
        let details = if input.rules.tiers.is_empty() {
            "Sin tramos configurados: no se calcula participación".to_string()
        } else {
            format!(
                "Sin utilidad neta (${}): no se aplican tramos",
                net_profit.normalize()
            )
        };
        return ProfitSharingResult::from_breakdown(input, FormulaType::Tiered, vec![], details);
    }

    let mut tiers: Vec<&TierConfig> = input.rules.tiers.iter().collect();
    tiers.sort_by(|a, b| a.min_profit.cmp(&b.min_profit));

    let mut breakdown = Vec::new();
    let mut steps = Vec::new();

    for (index, tier) in tiers.iter().enumerate() {
        if net_profit < tier.min_profit {
            continue;
        }

        let upper = match tier.max_profit {
            Some(max_profit) => max_profit.min(net_profit),
            None => net_profit,
        };
        let applicable = upper
            .checked_sub(tier.min_profit)
            .or_overflow(input)?
            .max(Decimal::ZERO);
        if applicable.is_zero() {
            continue;
        }

        let amount = percent_of(applicable, tier.percent_rate).or_overflow(input)?;
        let range = match tier.max_profit {
            Some(max_profit) => format!(
                "${} a ${}",
                tier.min_profit.normalize(),
                max_profit.normalize()
            ),
            None => format!("más de ${}", tier.min_profit.normalize()),
        };

        steps.push(format!(
            "${} × {}% = ${}",
            applicable.normalize(),
            tier.percent_rate.normalize(),
            amount.normalize()
        ));
        breakdown.push(ProfitSharingBreakdown::new(
            format!(
                "Tramo {} ({}): {}% sobre ${}",
                index + 1,
                range,
                tier.percent_rate.normalize(),
                applicable.normalize()
            ),
            amount,
            Some(tier.percent_rate),
        ));
    }

    let total = checked_sum(breakdown.iter().map(|line| line.amount)).or_overflow(input)?;
    let details = if steps.is_empty() {
        format!(
            "Utilidad neta de ${} no alcanza ningún tramo",
            net_profit.normalize()
        )
    } else {
        format!(
            "Utilidad neta ${} en {} tramo(s): {} = ${}",
            net_profit.normalize(),
            steps.len(),
            steps.join(" + "),
            total.normalize()
        )
    };

    ProfitSharingResult::from_breakdown(input, FormulaType::Tiered, breakdown, details)
}
