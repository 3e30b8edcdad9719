//! Fixed-amount profit sharing.
//!
//! Pays the configured `fixed_amount` whenever the project shows a profit.
//! Without profit nothing is paid, even though an amount is configured.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{FormulaType, ProfitSharingBreakdown, ProfitSharingInput, ProfitSharingResult};

use super::percent::{OrOverflow, share_of_profit};

/// Description of the fixed line item.
pub const FIXED_AMOUNT_DESCRIPTION: &str = "Monto fijo";

/// Builds the fixed line item, gated on positive net profit.
///
/// Shared with the fixed-plus-percent formula.
pub(crate) fn fixed_component(input: &ProfitSharingInput) -> EngineResult<ProfitSharingBreakdown> {
    let net_profit = input.net_profit;
    let fixed_amount = input.rules.fixed_amount.unwrap_or(Decimal::ZERO);
    let amount = if net_profit > Decimal::ZERO {
        fixed_amount
    } else {
        Decimal::ZERO
    };

    Ok(ProfitSharingBreakdown::new(
        FIXED_AMOUNT_DESCRIPTION,
        amount,
        Some(share_of_profit(amount, net_profit).or_overflow(input)?),
    ))
}

/// Calculates a FIXED_ONLY share.
///
/// The breakdown always holds exactly one entry, `"Monto fijo"`, whose
/// `percent_of_profit` is the share relative to net profit (zero without
/// profit).
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`](crate::error::EngineError::AmountOverflow)
/// when the relative share leaves the decimal range.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_fixed_only;
/// use profit_sharing_engine::models::{FormulaType, ProfitSharingInput, ProfitSharingRules};
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     fixed_amount: Some(Decimal::from(1500)),
///     ..ProfitSharingRules::new(FormulaType::FixedOnly)
/// };
/// let input = ProfitSharingInput::from_totals(
///     "prj_001", "Torre Norte", Decimal::from(80_000), Decimal::from(50_000), rules,
/// )?;
///
/// let result = calculate_fixed_only(&input)?;
/// assert_eq!(result.total_share, Decimal::from(1500));
/// assert_eq!(result.breakdown[0].percent_of_profit, Some(Decimal::from(5)));
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_fixed_only(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let line = fixed_component(input)?;
    let configured = input.rules.fixed_amount.unwrap_or(Decimal::ZERO);

    let details = if input.net_profit > Decimal::ZERO {
        format!(
            "Monto fijo de ${} sobre utilidad neta de ${}",
            line.amount.normalize(),
            input.net_profit.normalize()
        )
    } else {
        format!(
            "Sin utilidad neta (${}): no se paga el monto fijo de ${}",
            input.net_profit.normalize(),
            configured.normalize()
        )
    };

    ProfitSharingResult::from_breakdown(input, FormulaType::FixedOnly, vec![line], details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProfitSharingRules;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_input(net_profit: &str, fixed_amount: Option<&str>) -> ProfitSharingInput {
        ProfitSharingInput {
            project_id: "prj_001".to_string(),
            project_name: "Torre Norte".to_string(),
            total_income: dec("100000"),
            total_cost: dec("100000") - dec(net_profit),
            net_profit: dec(net_profit),
            rules: ProfitSharingRules {
                fixed_amount: fixed_amount.map(dec),
                ..ProfitSharingRules::new(FormulaType::FixedOnly)
            },
        }
    }

    #[test]
    fn test_pays_fixed_amount_with_profit() {
        let result = calculate_fixed_only(&create_input("20000", Some("1000"))).unwrap();

        assert_eq!(result.total_share, dec("1000"));
        assert_eq!(result.formula_type, FormulaType::FixedOnly);
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].description, "Monto fijo");
        assert_eq!(result.breakdown[0].amount, dec("1000"));
        assert_eq!(result.breakdown[0].percent_of_profit, Some(dec("5")));
    }

    #[test]
    fn test_pays_nothing_without_profit() {
        let result = calculate_fixed_only(&create_input("0", Some("1000"))).unwrap();

        assert_eq!(result.total_share, Decimal::ZERO);
        assert_eq!(result.breakdown.len(), 1);
        assert_eq!(result.breakdown[0].amount, Decimal::ZERO);
        assert_eq!(result.breakdown[0].percent_of_profit, Some(Decimal::ZERO));
        assert!(result.calculation_details.contains("no se paga"));
        assert!(result.calculation_details.contains("1000"));
    }

    #[test]
    fn test_pays_nothing_on_loss() {
        let result = calculate_fixed_only(&create_input("-7500", Some("1000"))).unwrap();

        assert_eq!(result.total_share, Decimal::ZERO);
        assert!(result.calculation_details.contains("-7500"));
    }

    #[test]
    fn test_missing_fixed_amount_defaults_to_zero() {
        let result = calculate_fixed_only(&create_input("20000", None)).unwrap();

        assert_eq!(result.total_share, Decimal::ZERO);
        assert_eq!(result.breakdown.len(), 1);
    }

    #[test]
    fn test_fixed_amount_may_exceed_profit() {
        let result = calculate_fixed_only(&create_input("500", Some("1000"))).unwrap();

        assert_eq!(result.total_share, dec("1000"));
        assert_eq!(result.breakdown[0].percent_of_profit, Some(dec("200")));
    }

    #[test]
    fn test_huge_amount_on_tiny_profit_is_an_error() {
        let input = create_input("0.0001", Some("79228162514264337593543950335"));

        assert!(matches!(
            calculate_fixed_only(&input),
            Err(crate::error::EngineError::AmountOverflow { .. })
        ));
    }
}
