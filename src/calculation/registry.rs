//! Formula registry: resolves a formula type to its strategy and exposes the
//! catalog shown by the rule configuration screen.

use serde::Serialize;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{FormulaType, ProfitSharingInput, ProfitSharingResult};

use super::dynamic::calculate_dynamic;
use super::fixed_only::calculate_fixed_only;
use super::fixed_plus_percent::calculate_fixed_plus_percent;
use super::grouped::calculate_grouped;
use super::percent_simple::calculate_percent_simple;
use super::special_formula::calculate_special_formula;
use super::tiered::calculate_tiered;

/// The common contract every formula strategy implements.
pub type FormulaStrategy = fn(&ProfitSharingInput) -> EngineResult<ProfitSharingResult>;

/// A catalog entry describing one formula type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormulaTypeInfo {
    /// The formula type identifier.
    #[serde(rename = "type")]
    pub formula_type: FormulaType,
    /// Short display label.
    pub label: &'static str,
    /// One-sentence explanation for the configuration form.
    pub description: &'static str,
}

/// Returns the strategy that computes the given formula type.
pub fn strategy_for(formula_type: FormulaType) -> FormulaStrategy {
    match formula_type {
        FormulaType::FixedOnly => calculate_fixed_only,
        FormulaType::PercentSimple => calculate_percent_simple,
        FormulaType::FixedPlusPercent => calculate_fixed_plus_percent,
        FormulaType::Tiered => calculate_tiered,
        FormulaType::SpecialFormula => calculate_special_formula,
        FormulaType::Grouped => calculate_grouped,
        FormulaType::Dynamic => calculate_dynamic,
    }
}

/// Calculates the profit share for one project.
///
/// Resolves `input.rules.formula_type` and delegates to the matching
/// strategy.
///
/// # Errors
///
/// Returns [`EngineError::UnknownFormulaType`] when the stored identifier
/// does not name one of the registered formulas, and
/// [`EngineError::AmountOverflow`] when the figures push an amount out of
/// the decimal range.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate;
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
/// let result = calculate(&input)?;
/// assert_eq!(result.total_share, Decimal::from(5000));
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate(input: &ProfitSharingInput) -> EngineResult<ProfitSharingResult> {
    let formula_type = input.rules.formula().ok_or_else(|| {
        warn!(
            project_id = %input.project_id,
            formula_type = %input.rules.formula_type,
            "Unknown formula type"
        );
        EngineError::UnknownFormulaType {
            project_id: input.project_id.clone(),
            formula_type: input.rules.formula_type.clone(),
        }
    })?;

    strategy_for(formula_type)(input).inspect_err(|err| {
        warn!(
            project_id = %input.project_id,
            formula_type = %formula_type,
            error = %err,
            "Calculation failed"
        );
    })
}

/// Returns the catalog of supported formula types, in declaration order.
pub fn list_formula_types() -> Vec<FormulaTypeInfo> {
    FormulaType::ALL
        .into_iter()
        .map(|formula_type| {
            let (label, description) = match formula_type {
                FormulaType::FixedOnly => (
                    "Solo monto fijo",
                    "Se paga un monto fijo siempre que el proyecto tenga utilidad.",
                ),
                FormulaType::PercentSimple => (
                    "Porcentaje simple",
                    "Se paga un porcentaje fijo de la utilidad neta.",
                ),
                FormulaType::FixedPlusPercent => (
                    "Monto fijo + porcentaje",
                    "Se paga un monto fijo más un porcentaje de la utilidad neta.",
                ),
                FormulaType::Tiered => (
                    "Escalonado",
                    "Cada tramo de utilidad se paga con su propio porcentaje, como tasas marginales.",
                ),
                FormulaType::SpecialFormula => (
                    "Fórmula especial",
                    "Porcentaje de la utilidad a partir de un mínimo, con un tope máximo opcional.",
                ),
                FormulaType::Grouped => (
                    "Por grupos",
                    "Cada grupo recibe su propio porcentaje de la utilidad neta de forma independiente.",
                ),
                FormulaType::Dynamic => (
                    "Dinámico",
                    "Monto base más incrementos cada vez que la utilidad supera un múltiplo del umbral.",
                ),
            };
            FormulaTypeInfo {
                formula_type,
                label,
                description,
            }
        })
        .collect()
}
