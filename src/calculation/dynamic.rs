//! Dynamic profit sharing: a base fee plus increments unlocked every time
//! profit crosses a multiple of the increment threshold.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{FormulaType, ProfitSharingBreakdown, ProfitSharingInput, ProfitSharingResult};

use super::percent::{OrOverflow, percent_of, share_of_profit};

/// Threshold used when `increment_threshold` is absent or zero.
pub const DEFAULT_INCREMENT_THRESHOLD: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Description of the base line item.
pub const BASE_AMOUNT_DESCRIPTION: &str = "Monto base";

/// Calculates a DYNAMIC share.
///
/// `increments = floor(net_profit / threshold)` and each increment pays
/// `increment_percent` of the full net profit. The base line is always
/// present when there is profit; the increment line only when at least one
/// increment is unlocked. Without profit nothing is paid, base included.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when the increment count or the increment amount leaves the decimal
/// range. Both grow with profit, so a tiny threshold reaches the limit long
/// before profit itself does.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_dynamic;
/// use profit_sharing_engine::models::{FormulaType, ProfitSharingInput, ProfitSharingRules};
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     base_amount: Some(Decimal::from(500)),
///     increment_percent: Some(Decimal::from(2)),
///     increment_threshold: Some(Decimal::from(100_000)),
///     ..ProfitSharingRules::new(FormulaType::Dynamic)
/// };
/// let input = ProfitSharingInput::from_totals(
///     "prj_001", "Torre Norte", Decimal::from(400_000), Decimal::from(150_000), rules,
/// )?;
///
/// // 2 increments × 2% × 250000 = 10000, plus the 500 base
/// let result = calculate_dynamic(&input)?;
/// assert_eq!(result.total_share, Decimal::from(10_500));
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_dynamic(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let net_profit = input.net_profit;
    let rules = &input.rules;

    if net_profit <= Decimal::ZERO {
        let details = format!(
            "Sin utilidad neta (${}): no se paga monto base ni incrementos",
            net_profit.normalize()
        );
        return ProfitSharingResult::from_breakdown(input, FormulaType::Dynamic, vec![], details);
    }

    let base_amount = rules.base_amount.unwrap_or(Decimal::ZERO);
    let increment_percent = rules.increment_percent.unwrap_or(Decimal::ZERO);
    let threshold = match rules.increment_threshold {
        Some(threshold) if !threshold.is_zero() => threshold,
        _ => DEFAULT_INCREMENT_THRESHOLD,
    };
    let increments = net_profit.checked_div(threshold).or_overflow(input)?.floor();

    let mut breakdown = vec![ProfitSharingBreakdown::new(
        BASE_AMOUNT_DESCRIPTION,
        base_amount,
        Some(share_of_profit(base_amount, net_profit).or_overflow(input)?),
    )];

    let details = if increments > Decimal::ZERO {
        let increment_amount = percent_of(net_profit, increment_percent)
            .and_then(|per_increment| increments.checked_mul(per_increment))
            .or_overflow(input)?;
        let total = base_amount.checked_add(increment_amount).or_overflow(input)?;
        breakdown.push(ProfitSharingBreakdown::new(
            format!(
                "{} incremento(s) de {}% por cada ${}",
                increments.normalize(),
                increment_percent.normalize(),
                threshold.normalize()
            ),
            increment_amount,
            Some(share_of_profit(increment_amount, net_profit).or_overflow(input)?),
        ));
        format!(
            "Base ${} + {} incremento(s) × {}% × ${} (${}) = ${}",
            base_amount.normalize(),
            increments.normalize(),
            increment_percent.normalize(),
            net_profit.normalize(),
            increment_amount.normalize(),
            total.normalize()
        )
    } else {
        format!(
            "Base ${}; utilidad neta ${} no alcanza el umbral de ${} para incrementos",
            base_amount.normalize(),
            net_profit.normalize(),
            threshold.normalize()
        )
    };

    ProfitSharingResult::from_breakdown(input, FormulaType::Dynamic, breakdown, details)
}
