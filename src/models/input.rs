//! Calculation input model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::ProfitSharingRules;

/// Everything the engine needs to compute one project's share.
///
/// `net_profit` is taken as given; the engine never re-derives it from
/// income and cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitSharingInput {
    /// Identifier of the project.
    pub project_id: String,
    /// Display name of the project.
    pub project_name: String,
    /// Income recorded for the period.
    pub total_income: Decimal,
    /// Cost recorded for the period.
    pub total_cost: Decimal,
    /// Profit the formulas are applied against.
    pub net_profit: Decimal,
    /// The project's profit-sharing configuration.
    pub rules: ProfitSharingRules,
}

impl ProfitSharingInput {
    /// Builds an input whose net profit is `total_income - total_cost`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] when the difference leaves the
    /// decimal range.
    ///
    /// # Example
    ///
    /// ```
    /// use profit_sharing_engine::models::{FormulaType, ProfitSharingInput, ProfitSharingRules};
    /// use rust_decimal::Decimal;
    ///
    /// let input = ProfitSharingInput::from_totals(
    ///     "prj_001",
    ///     "Torre Norte",
    ///     Decimal::from(120_000),
    ///     Decimal::from(70_000),
    ///     ProfitSharingRules::new(FormulaType::PercentSimple),
    /// )?;
    /// assert_eq!(input.net_profit, Decimal::from(50_000));
    /// # Ok::<(), profit_sharing_engine::error::EngineError>(())
    /// ```
    pub fn from_totals(
        project_id: impl Into<String>,
        project_name: impl Into<String>,
        total_income: Decimal,
        total_cost: Decimal,
        rules: ProfitSharingRules,
    ) -> EngineResult<Self> {
        let project_id = project_id.into();
        let net_profit = total_income
            .checked_sub(total_cost)
            .ok_or_else(|| EngineError::AmountOverflow {
                project_id: project_id.clone(),
            })?;

        Ok(Self {
            project_id,
            project_name: project_name.into(),
            total_income,
            total_cost,
            net_profit,
            rules,
        })
    }
}
