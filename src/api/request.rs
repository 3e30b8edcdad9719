//! Request types for the Profit-Sharing Engine API.
//!
//! This module defines the JSON request structures for the calculation
//! endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ProfitSharingInput, ProfitSharingRules};

/// Request body for the `/calculate` endpoint.
///
/// `net_profit` may be omitted, in which case it is derived as
/// `total_income - total_cost`. When supplied it is trusted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Identifier of the project.
    pub project_id: String,
    /// Display name of the project.
    #[serde(default)]
    pub project_name: String,
    /// Income recorded for the period.
    #[serde(default)]
    pub total_income: Decimal,
    /// Cost recorded for the period.
    #[serde(default)]
    pub total_cost: Decimal,
    /// Net profit; derived from income and cost when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Decimal>,
    /// The project's profit-sharing rules.
    pub rules: ProfitSharingRules,
}

/// Request body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCalculationRequest {
    /// The projects to calculate, in display order.
    pub inputs: Vec<CalculationRequest>,
}

/// Request body for the `/projects/:project_id/calculate` endpoint.
///
/// The rules come from the loaded configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCalculationRequest {
    /// Income recorded for the period.
    #[serde(default)]
    pub total_income: Decimal,
    /// Cost recorded for the period.
    #[serde(default)]
    pub total_cost: Decimal,
    /// Net profit; derived from income and cost when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Decimal>,
}

/// Derives net profit from income and cost unless the caller supplied it.
fn resolve_net_profit(
    project_id: &str,
    net_profit: Option<Decimal>,
    total_income: Decimal,
    total_cost: Decimal,
) -> EngineResult<Decimal> {
    match net_profit {
        Some(net_profit) => Ok(net_profit),
        None => total_income
            .checked_sub(total_cost)
            .ok_or_else(|| EngineError::AmountOverflow {
                project_id: project_id.to_string(),
            }),
    }
}

impl TryFrom<CalculationRequest> for ProfitSharingInput {
    type Error = EngineError;

    fn try_from(req: CalculationRequest) -> EngineResult<Self> {
        let net_profit = resolve_net_profit(
            &req.project_id,
            req.net_profit,
            req.total_income,
            req.total_cost,
        )?;

        Ok(ProfitSharingInput {
            project_id: req.project_id,
            project_name: req.project_name,
            total_income: req.total_income,
            total_cost: req.total_cost,
            net_profit,
            rules: req.rules,
        })
    }
}

impl ProjectCalculationRequest {
    /// Builds an engine input for a configured project.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AmountOverflow`] when income minus cost leaves
    /// the decimal range.
    pub fn into_input(
        self,
        project_id: &str,
        project_name: &str,
        rules: ProfitSharingRules,
    ) -> EngineResult<ProfitSharingInput> {
        let net_profit =
            resolve_net_profit(project_id, self.net_profit, self.total_income, self.total_cost)?;

        Ok(ProfitSharingInput {
            project_id: project_id.to_string(),
            project_name: project_name.to_string(),
            total_income: self.total_income,
            total_cost: self.total_cost,
            net_profit,
            rules,
        })
    }
}
