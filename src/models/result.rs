//! Calculation result models for the Profit-Sharing Engine.
//!
//! This module contains the [`ProfitSharingResult`] type and its line items,
//! plus the [`BatchSummary`] used by dashboards to total a batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{FormulaType, ProfitSharingInput};

fn overflow(project_id: &str) -> EngineError {
    EngineError::AmountOverflow {
        project_id: project_id.to_string(),
    }
}

/// A single explainable line item of a computed share.
///
/// # Example
///
/// ```
/// use profit_sharing_engine::models::ProfitSharingBreakdown;
/// use rust_decimal::Decimal;
///
/// let line = ProfitSharingBreakdown::new("Monto fijo", Decimal::from(1000), Some(Decimal::from(5)));
/// assert_eq!(line.description, "Monto fijo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitSharingBreakdown {
    /// What this line pays for.
    pub description: String,
    /// The amount contributed to the total share.
    pub amount: Decimal,
    /// The line's weight relative to net profit, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_of_profit: Option<Decimal>,
}

impl ProfitSharingBreakdown {
    /// Creates a breakdown line.
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        percent_of_profit: Option<Decimal>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            percent_of_profit,
        }
    }
}

/// The outcome of applying one project's formula.
///
/// `total_share` always equals the sum of `breakdown` amounts; results are
/// only built through [`ProfitSharingResult::from_breakdown`] inside the
/// crate to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitSharingResult {
    /// Identifier of the project, echoed from the input.
    pub project_id: String,
    /// Display name of the project, echoed from the input.
    pub project_name: String,
    /// The formula that produced this result.
    pub formula_type: FormulaType,
    /// Net profit the formula was applied against.
    pub net_profit: Decimal,
    /// The amount owed.
    pub total_share: Decimal,
    /// Line items in computation order.
    pub breakdown: Vec<ProfitSharingBreakdown>,
    /// Human-readable summary of the computation for audit display.
    pub calculation_details: String,
}

impl ProfitSharingResult {
    pub(crate) fn from_breakdown(
        input: &ProfitSharingInput,
        formula_type: FormulaType,
        breakdown: Vec<ProfitSharingBreakdown>,
        calculation_details: String,
    ) -> EngineResult<Self> {
        let total_share = breakdown
            .iter()
            .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.amount))
            .ok_or_else(|| overflow(&input.project_id))?;
        Ok(Self {
            project_id: input.project_id.clone(),
            project_name: input.project_name.clone(),
            formula_type,
            net_profit: input.net_profit,
            total_share,
            breakdown,
            calculation_details,
        })
    }
}

/// Aggregated totals across a batch of results.
///
/// # Example
///
/// ```
/// use profit_sharing_engine::models::BatchSummary;
/// use rust_decimal::Decimal;
///
/// let summary = BatchSummary::from_results(&[])?;
/// assert_eq!(summary.project_count, 0);
/// assert_eq!(summary.total_share, Decimal::ZERO);
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of results in the batch.
    pub project_count: usize,
    /// Number of projects with positive net profit.
    pub profitable_projects: usize,
    /// Sum of net profit across the batch.
    pub total_net_profit: Decimal,
    /// Sum of computed shares across the batch.
    pub total_share: Decimal,
}

impl BatchSummary {
    /// Totals a slice of results.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] naming the project whose
    /// figures pushed a running total out of the decimal range.
    pub fn from_results(results: &[ProfitSharingResult]) -> EngineResult<Self> {
        let mut summary = Self {
            project_count: results.len(),
            profitable_projects: 0,
            total_net_profit: Decimal::ZERO,
            total_share: Decimal::ZERO,
        };

        for result in results {
            if result.net_profit > Decimal::ZERO {
                summary.profitable_projects += 1;
            }
            summary.total_net_profit = summary
                .total_net_profit
                .checked_add(result.net_profit)
                .ok_or_else(|| overflow(&result.project_id))?;
            summary.total_share = summary
                .total_share
                .checked_add(result.total_share)
                .ok_or_else(|| overflow(&result.project_id))?;
        }

        Ok(summary)
    }
}
