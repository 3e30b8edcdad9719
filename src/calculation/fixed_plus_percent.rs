//! Fixed amount plus percentage profit sharing.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{FormulaType, ProfitSharingInput, ProfitSharingResult};

use super::fixed_only::fixed_component;
use super::percent::OrOverflow;
use super::percent_simple::percent_component;

/// Calculates a FIXED_PLUS_PERCENT share.
///
/// The fixed part and the percentage part are each gated on positive net
/// profit. The breakdown always lists the fixed part first, then the
/// percentage part.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when either part or their sum leaves the decimal range.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_fixed_plus_percent;
/// use profit_sharing_engine::models::{FormulaType, ProfitSharingInput, ProfitSharingRules};
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     fixed_amount: Some(Decimal::from(1000)),
///     percent_rate: Some(Decimal::from(5)),
///     ..ProfitSharingRules::new(FormulaType::FixedPlusPercent)
/// };
/// let input = ProfitSharingInput::from_totals(
///     "prj_001", "Torre Norte", Decimal::from(60_000), Decimal::from(40_000), rules,
/// )?;
///
/// let result = calculate_fixed_plus_percent(&input)?;
/// assert_eq!(result.total_share, Decimal::from(2000));
/// assert_eq!(result.breakdown.len(), 2);
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_fixed_plus_percent(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let fixed = fixed_component(input)?;
    let percent = percent_component(input)?;
    let rate = input.rules.percent_rate.unwrap_or(Decimal::ZERO);
    let total = fixed.amount.checked_add(percent.amount).or_overflow(input)?;

    let details = if input.net_profit > Decimal::ZERO {
        format!(
            "Monto fijo ${} + ${} × {}% (${}) = ${}",
            fixed.amount.normalize(),
            input.net_profit.normalize(),
            rate.normalize(),
            percent.amount.normalize(),
            total.normalize()
        )
    } else {
        format!(
            "Sin utilidad neta (${}): no se paga monto fijo ni porcentaje",
            input.net_profit.normalize()
        )
    };

    ProfitSharingResult::from_breakdown(
        input,
        FormulaType::FixedPlusPercent,
        vec![fixed, percent],
        details,
    )
}
