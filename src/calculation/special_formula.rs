//! Special formula: a percentage gated by a minimum profit and capped by a
//! maximum share.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{FormulaType, ProfitSharingBreakdown, ProfitSharingInput, ProfitSharingResult};

use super::percent::{OrOverflow, percent_of, share_of_profit};

/// Calculates a SPECIAL_FORMULA share.
///
/// - Below `minimum_profit` (default 0) nothing is paid and the single
///   breakdown line explains the threshold.
/// - Otherwise `net_profit * percent_rate / 100`, capped at `maximum_share`
///   when one is configured.
///
/// Non-positive profit always pays nothing, even when a negative minimum is
/// configured.
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when the uncapped share leaves the decimal range, even if a cap would
/// have brought it back.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_special_formula;
/// use profit_sharing_engine::models::{FormulaType, ProfitSharingInput, ProfitSharingRules};
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     percent_rate: Some(Decimal::from(20)),
///     minimum_profit: Some(Decimal::from(10_000)),
///     maximum_share: Some(Decimal::from(8_000)),
///     ..ProfitSharingRules::new(FormulaType::SpecialFormula)
/// };
/// let input = ProfitSharingInput::from_totals(
///     "prj_001", "Torre Norte", Decimal::from(90_000), Decimal::from(40_000), rules,
/// )?;
///
/// // 20% of 50000 would be 10000; the cap limits it to 8000
/// let result = calculate_special_formula(&input)?;
/// assert_eq!(result.total_share, Decimal::from(8_000));
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_special_formula(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let net_profit = input.net_profit;
    let rules = &input.rules;
    let rate = rules.percent_rate.unwrap_or(Decimal::ZERO);
    let minimum_profit = rules.minimum_profit.unwrap_or(Decimal::ZERO);

    if net_profit < minimum_profit {
        let line = ProfitSharingBreakdown::new(
            format!(
                "Utilidad neta menor al mínimo de ${}",
                minimum_profit.normalize()
            ),
            Decimal::ZERO,
            Some(Decimal::ZERO),
        );
        let details = format!(
            "Utilidad neta ${} < mínimo ${}: no se paga participación",
            net_profit.normalize(),
            minimum_profit.normalize()
        );
        return ProfitSharingResult::from_breakdown(
            input,
            FormulaType::SpecialFormula,
            vec![line],
            details,
        );
    }

    if net_profit <= Decimal::ZERO {
        let line = ProfitSharingBreakdown::new("Sin utilidad neta", Decimal::ZERO, Some(Decimal::ZERO));
        let details = format!(
            "Sin utilidad neta (${}): no se paga participación",
            net_profit.normalize()
        );
        return ProfitSharingResult::from_breakdown(
            input,
            FormulaType::SpecialFormula,
            vec![line],
            details,
        );
    }

    let uncapped = percent_of(net_profit, rate).or_overflow(input)?;
    let (amount, cap_applied) = match rules.maximum_share {
        Some(maximum_share) if uncapped > maximum_share => (maximum_share, true),
        _ => (uncapped, false),
    };

    let (description, details) = if cap_applied {
        (
            format!(
                "{}% de la utilidad neta (tope aplicado: ${})",
                rate.normalize(),
                amount.normalize()
            ),
            format!(
                "${} × {}% = ${} (tope máximo ${} aplicado)",
                net_profit.normalize(),
                rate.normalize(),
                uncapped.normalize(),
                amount.normalize()
            ),
        )
    } else {
        (
            format!("{}% de la utilidad neta", rate.normalize()),
            format!(
                "${} × {}% = ${} (mínimo ${} alcanzado, sin tope aplicado)",
                net_profit.normalize(),
                rate.normalize(),
                amount.normalize(),
                minimum_profit.normalize()
            ),
        )
    };

    let line = ProfitSharingBreakdown::new(
        description,
        amount,
        Some(share_of_profit(amount, net_profit).or_overflow(input)?),
    );

    ProfitSharingResult::from_breakdown(input, FormulaType::SpecialFormula, vec![line], details)
}
