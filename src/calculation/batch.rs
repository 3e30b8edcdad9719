//! Batch calculation across many projects.
//!
//! Each project is calculated independently, so the batch is fanned out
//! across the rayon thread pool. Results keep the positional order of the
//! inputs.

use rayon::prelude::*;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{ProfitSharingInput, ProfitSharingResult};

use super::registry::calculate;

/// Calculates the profit share for every input, preserving input order.
///
/// The batch does not partially succeed: if any input fails (an unknown
/// formula type or out-of-range figures) the whole batch returns that error.
///
/// # Examples
///
/// ```
/// use profit_sharing_engine::calculation::calculate_batch;
/// use profit_sharing_engine::models::{FormulaType, ProfitSharingInput, ProfitSharingRules};
/// use rust_decimal::Decimal;
///
/// let rules = ProfitSharingRules {
///     fixed_amount: Some(Decimal::from(1000)),
///     ..ProfitSharingRules::new(FormulaType::FixedOnly)
/// };
/// let inputs = vec![
///     ProfitSharingInput::from_totals("a", "A", Decimal::from(10), Decimal::from(5), rules.clone())?,
///     ProfitSharingInput::from_totals("b", "B", Decimal::from(5), Decimal::from(10), rules)?,
/// ];
///
/// let results = calculate_batch(&inputs)?;
/// assert_eq!(results[0].total_share, Decimal::from(1000));
/// assert_eq!(results[1].total_share, Decimal::ZERO);
/// # Ok::<(), profit_sharing_engine::error::EngineError>(())
/// ```
pub fn calculate_batch(inputs: &[ProfitSharingInput]) -> EngineResult<Vec<ProfitSharingResult>> {
    debug!(projects_count = inputs.len(), "Calculating profit-sharing batch");

    let results = inputs
        .par_iter()
        .map(calculate)
        .collect::<EngineResult<Vec<_>>>()?;

    debug!(projects_count = results.len(), "Profit-sharing batch completed");
    Ok(results)
}
