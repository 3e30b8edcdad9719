//! Flat-percentage profit sharing.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{FormulaType, ProfitSharingBreakdown, ProfitSharingInput, ProfitSharingResult};

use super::percent::{OrOverflow, percent_of};

/// Builds the percentage line item, gated on positive net profit.
///
/// Shared with the fixed-plus-percent formula.
pub(crate) fn percent_component(input: &ProfitSharingInput) -> EngineResult<ProfitSharingBreakdown> {
    let net_profit = input.net_profit;
    let rate = input.rules.percent_rate.unwrap_or(Decimal::ZERO);

    let (amount, percent) = if net_profit > Decimal::ZERO {
        (percent_of(net_profit, rate).or_overflow(input)?, rate)
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    Ok(ProfitSharingBreakdown::new(
        format!("{}% de la utilidad neta", rate.normalize()),
        amount,
        Some(percent),
    ))
}

/// Calculates a PERCENT_SIMPLE share: `net_profit * percent_rate / 100`.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when the product leaves the decimal range.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_percent_simple;
/// use profit_sharing_engine::models::{FormulaType, ProfitSharingInput, ProfitSharingRules};
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     percent_rate: Some(Decimal::from(10)),
///     ..ProfitSharingRules::new(FormulaType::PercentSimple)
/// };
/// let input = ProfitSharingInput::from_totals(
///     "prj_001", "Torre Norte", Decimal::from(90_000), Decimal::from(40_000), rules,
/// )?;
///
/// let result = calculate_percent_simple(&input)?;
/// assert_eq!(result.total_share, Decimal::from(5000));
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_percent_simple(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let line = percent_component(input)?;
    let rate = input.rules.percent_rate.unwrap_or(Decimal::ZERO);

    let details = if input.net_profit > Decimal::ZERO {
        format!(
            "${} × {}% = ${}",
            input.net_profit.normalize(),
            rate.normalize(),
            line.amount.normalize()
        )
    } else {
        format!(
            "Sin utilidad neta (${}): no se aplica el {}%",
            input.net_profit.normalize(),
            rate.normalize()
        )
    };

    ProfitSharingResult::from_breakdown(input, FormulaType::PercentSimple, vec![line], details)
}
